use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::booking::Trip;
use crate::call::{CallState, MuteFlags};
use crate::session::Session;
use crate::view::{DashboardTab, View};

/// State-change notifications published by the application root.
///
/// A presentation layer renders from these; nothing in the core depends on
/// how they are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A session became active (`Some`) or was cleared (`None`).
    SessionChanged { session: Option<Session> },
    ViewChanged { view: View },
    TabChanged { tab: DashboardTab },
    CallStateChanged { from: CallState, to: CallState },
    /// Show (`true`) or dismiss (`false`) the incoming-call notification.
    IncomingCall { visible: bool },
    MuteChanged { mute: MuteFlags },
    TripBooked { trip: Trip },
    CarouselMoved { index: usize },
    /// A user-facing notice, e.g. the message shown after declining a call.
    Notice { message: String },
}

/// Receives `AppEvent`s.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: AppEvent);
}

impl EventSink for mpsc::UnboundedSender<AppEvent> {
    fn publish(&self, event: AppEvent) {
        // Receiver dropped means nobody is rendering; nothing to do.
        let _ = self.send(event);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: AppEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_tagged() {
        let event = AppEvent::CallStateChanged {
            from: CallState::Connecting,
            to: CallState::Active,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "call_state_changed", "from": "connecting", "to": "active"})
        );
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.publish(AppEvent::IncomingCall { visible: true });
        assert_eq!(rx.recv().await, Some(AppEvent::IncomingCall { visible: true }));
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<AppEvent>();
        drop(rx);
        tx.publish(AppEvent::CarouselMoved { index: 1 });
    }
}
