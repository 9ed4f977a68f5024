use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;
use tripdesk_application::{AppRuntime, TravelApp};
use tripdesk_core::call::CallState;
use tripdesk_core::config::AppConfig;
use tripdesk_core::event::AppEvent;
use tripdesk_core::session::{CredentialTable, MemorySessionStore, SessionManager, SessionStore};
use tripdesk_core::view::View;
use tripdesk_infrastructure::FileSessionStore;

fn quiet_config() -> AppConfig {
    AppConfig {
        carousel_interval_ms: 0,
        ..AppConfig::default()
    }
}

fn runtime_with(
    config: AppConfig,
    store: Arc<dyn SessionStore>,
) -> (AppRuntime, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sessions = SessionManager::new(Arc::new(CredentialTable::demo()), store);
    let app = TravelApp::new(config, sessions, Arc::new(tx));
    (AppRuntime::new(app), rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn call_state(runtime: &AppRuntime) -> CallState {
    runtime.dispatch(|app| app.call_state()).await
}

#[tokio::test(start_paused = true)]
async fn test_agent_gets_rung_three_seconds_after_login() {
    let (runtime, mut rx) = runtime_with(quiet_config(), Arc::new(MemorySessionStore::new()));
    runtime.start().await;

    runtime
        .dispatch(|app| app.submit_login("agent1", "password123"))
        .await
        .unwrap();
    assert_eq!(runtime.armed_timers(), 1);

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(call_state(&runtime).await, CallState::Idle);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(call_state(&runtime).await, CallState::Ringing);
    assert!(drain(&mut rx).contains(&AppEvent::IncomingCall { visible: true }));
    assert_eq!(runtime.armed_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_accepted_call_goes_active_after_connect_delay() {
    let (runtime, _rx) = runtime_with(quiet_config(), Arc::new(MemorySessionStore::new()));
    runtime.start().await;
    runtime
        .dispatch(|app| app.submit_login("agent", "password123"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(3_100)).await;

    runtime.dispatch(|app| app.accept_call()).await.unwrap();
    assert_eq!(call_state(&runtime).await, CallState::Connecting);

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(call_state(&runtime).await, CallState::Connecting);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(call_state(&runtime).await, CallState::Active);
}

#[tokio::test(start_paused = true)]
async fn test_ending_while_connecting_never_reaches_active() {
    let (runtime, mut rx) = runtime_with(quiet_config(), Arc::new(MemorySessionStore::new()));
    runtime.start().await;
    runtime
        .dispatch(|app| app.submit_login("customer", "password123"))
        .await
        .unwrap();
    runtime.dispatch(|app| app.start_call()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    runtime.dispatch(|app| app.end_call()).await.unwrap();
    assert_eq!(runtime.armed_timers(), 0);

    tokio::time::sleep(Duration::from_millis(5_000)).await;
    assert_eq!(call_state(&runtime).await, CallState::Idle);
    let reached_active = drain(&mut rx).iter().any(|e| {
        matches!(
            e,
            AppEvent::CallStateChanged {
                to: CallState::Active,
                ..
            }
        )
    });
    assert!(!reached_active);
}

#[tokio::test(start_paused = true)]
async fn test_logout_before_ring_cancels_it() {
    let (runtime, _rx) = runtime_with(quiet_config(), Arc::new(MemorySessionStore::new()));
    runtime.start().await;
    runtime
        .dispatch(|app| app.submit_login("agent2", "password123"))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    runtime.dispatch(|app| app.logout()).await;
    assert_eq!(runtime.armed_timers(), 0);

    tokio::time::sleep(Duration::from_millis(5_000)).await;
    assert_eq!(call_state(&runtime).await, CallState::Idle);
    assert_eq!(runtime.dispatch(|app| app.view()).await, View::HomePage);
}

#[tokio::test(start_paused = true)]
async fn test_restored_agent_session_rings_from_file_slot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("currentUser.json");

    {
        let (runtime, _rx) = runtime_with(quiet_config(), Arc::new(FileSessionStore::new(path.clone())));
        runtime
            .dispatch(|app| app.submit_login("agent1", "password123"))
            .await
            .unwrap();
        runtime.shutdown();
    }

    let (runtime, _rx) = runtime_with(quiet_config(), Arc::new(FileSessionStore::new(path)));
    assert!(runtime.start().await);
    let display_name = runtime
        .dispatch(|app| app.session().map(|s| s.display_name.clone()))
        .await;
    assert_eq!(display_name.as_deref(), Some("Sarah Wilson"));

    tokio::time::sleep(Duration::from_millis(3_100)).await;
    assert_eq!(call_state(&runtime).await, CallState::Ringing);
}

#[tokio::test(start_paused = true)]
async fn test_carousel_auto_scrolls_and_wraps() {
    let (runtime, _rx) = runtime_with(AppConfig::default(), Arc::new(MemorySessionStore::new()));
    runtime.start().await;

    let mut seen = Vec::new();
    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(5_010)).await;
        seen.push(runtime.dispatch(|app| app.carousel().index()).await);
    }
    assert_eq!(seen, vec![1, 2, 3, 0]);

    runtime.shutdown();
    assert_eq!(runtime.armed_timers(), 0);
}
