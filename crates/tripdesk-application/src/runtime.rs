//! Async driver for `TravelApp`.
//!
//! Turns the root's timer requests into tokio sleeps and feeds expiries back
//! in. The app sits behind one mutex, so commands and timer expiries are
//! applied one at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tripdesk_core::timer::{Schedule, TimerKey, TimerKind, TimerRequest};

use crate::app::TravelApp;

struct ArmedTimer {
    key: TimerKey,
    handle: JoinHandle<()>,
}

/// Shared handle to a running application.
///
/// Cheap to clone. Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct AppRuntime {
    app: Arc<Mutex<TravelApp>>,
    timers: Arc<StdMutex<HashMap<TimerKind, ArmedTimer>>>,
}

impl AppRuntime {
    pub fn new(app: TravelApp) -> Self {
        Self {
            app: Arc::new(Mutex::new(app)),
            timers: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Runs `TravelApp::start` and arms whatever it asked for.
    pub async fn start(&self) -> bool {
        self.dispatch(TravelApp::start).await
    }

    /// Runs one command against the app, then arms/cancels the timers it requested.
    pub async fn dispatch<R>(&self, f: impl FnOnce(&mut TravelApp) -> R) -> R {
        let mut app = self.app.lock().await;
        let result = f(&mut app);
        self.drain(&mut app);
        result
    }

    /// Number of timers currently armed.
    pub fn armed_timers(&self) -> usize {
        self.timers.lock().map(|t| t.len()).unwrap_or(0)
    }

    /// Aborts every outstanding timer.
    pub fn shutdown(&self) {
        if let Ok(mut timers) = self.timers.lock() {
            for (_, timer) in timers.drain() {
                timer.handle.abort();
            }
        }
        tracing::debug!("[Runtime] Timers stopped");
    }

    async fn fire(&self, key: TimerKey) {
        self.dispatch(|app| app.fire(key)).await;
    }

    fn drain(&self, app: &mut TravelApp) {
        for schedule in app.take_schedule() {
            match schedule {
                Schedule::Arm(request) => self.arm(request),
                Schedule::Cancel(kind) => self.cancel(kind),
            }
        }
    }

    fn arm(&self, request: TimerRequest) {
        let key = request.key;
        // Held across the spawn so the task cannot `forget` itself before it is recorded.
        let Ok(mut timers) = self.timers.lock() else {
            tracing::error!("[Runtime] Timer table poisoned, dropping {}", key.kind);
            return;
        };

        let runtime = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(request.delay).await;
            runtime.forget(key);
            runtime.fire(key).await;
        });

        if let Some(previous) = timers.insert(key.kind, ArmedTimer { key, handle }) {
            previous.handle.abort();
        }
        tracing::debug!(
            "[Runtime] Armed {} #{} ({:?})",
            key.kind,
            key.ticket,
            request.delay
        );
    }

    fn cancel(&self, kind: TimerKind) {
        if let Ok(mut timers) = self.timers.lock() {
            if let Some(timer) = timers.remove(&kind) {
                timer.handle.abort();
                tracing::debug!("[Runtime] Cancelled {} #{}", kind, timer.key.ticket);
            }
        }
    }

    /// Drops the table entry of a timer that has just expired, unless it was
    /// already replaced by a newer one.
    fn forget(&self, key: TimerKey) {
        if let Ok(mut timers) = self.timers.lock() {
            if timers.get(&key.kind).is_some_and(|t| t.key == key) {
                timers.remove(&key.kind);
            }
        }
    }
}
