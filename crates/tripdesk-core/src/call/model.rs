//! Call lifecycle types.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The simulated lifecycle of a single video-call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CallState {
    #[default]
    Idle,
    /// Incoming call shown to an agent, waiting for accept/decline.
    Ringing,
    /// Connect delay running; the loader is on screen.
    Connecting,
    /// Call window live.
    Active,
    /// Teardown bookkeeping. Never observed at rest.
    Ended,
}

impl CallState {
    /// Whether a call session exists (mute controls are on screen).
    pub fn in_call(self) -> bool {
        matches!(self, CallState::Connecting | CallState::Active)
    }
}

/// Events that drive the call state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CallTrigger {
    IncomingCall,
    Accept,
    Decline,
    Start,
    ConnectElapsed,
    End,
}

/// One edge taken by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTransition {
    pub from: CallState,
    pub to: CallState,
}

/// Local media mute flags. Only meaningful while a call session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteFlags {
    pub audio_muted: bool,
    pub video_muted: bool,
}

impl MuteFlags {
    /// Label for the audio mute button.
    pub fn audio_label(&self) -> &'static str {
        if self.audio_muted {
            "Unmute Audio"
        } else {
            "Mute Audio"
        }
    }

    /// Label for the video mute button.
    pub fn video_label(&self) -> &'static str {
        if self.video_muted {
            "Unmute Video"
        } else {
            "Mute Video"
        }
    }
}
