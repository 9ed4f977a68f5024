use std::time::Duration;

use thiserror::Error;

use super::model::{CallState, CallTransition, CallTrigger, MuteFlags};
use crate::timer::{Schedule, TicketCounter, TimerKey, TimerKind, TimerRequest};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// No edge leaves `state` on `trigger`.
    #[error("Cannot {trigger} while call is {state}")]
    InvalidTransition {
        state: CallState,
        trigger: CallTrigger,
    },

    /// The edge exists but the signed-in role may not take it.
    #[error("Cannot {trigger}: {reason}")]
    NotPermitted {
        trigger: CallTrigger,
        reason: String,
    },
}

/// Result of feeding one trigger to the simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStep {
    /// Edges taken, in order. `end` yields two (`→ Ended`, `Ended → Idle`).
    pub transitions: Vec<CallTransition>,
    /// Timer work for the driver, if any.
    pub schedule: Option<Schedule>,
}

impl CallStep {
    fn single(from: CallState, to: CallState) -> Self {
        Self {
            transitions: vec![CallTransition { from, to }],
            schedule: None,
        }
    }

    pub fn final_state(&self) -> Option<CallState> {
        self.transitions.last().map(|t| t.to)
    }
}

/// The call state machine.
///
/// Pure and synchronous: it never sleeps. Entering `Connecting` arms a
/// connect timer through the returned `CallStep`, and the driver reports the
/// expiry back through [`CallSimulator::connect_elapsed`]. The expiry only
/// takes effect if the machine is still `Connecting` on the same ticket.
#[derive(Debug)]
pub struct CallSimulator {
    state: CallState,
    mute: MuteFlags,
    connect_delay: Duration,
    pending_connect: Option<TimerKey>,
    tickets: TicketCounter,
}

impl CallSimulator {
    pub fn new(connect_delay: Duration) -> Self {
        Self {
            state: CallState::Idle,
            mute: MuteFlags::default(),
            connect_delay,
            pending_connect: None,
            tickets: TicketCounter::default(),
        }
    }

    pub fn state(&self) -> CallState {
        self.state
    }

    pub fn mute(&self) -> MuteFlags {
        self.mute
    }

    /// Key of the connect timer currently armed, if any.
    pub fn pending_connect(&self) -> Option<TimerKey> {
        self.pending_connect
    }

    /// Idle → Ringing.
    pub fn ring(&mut self) -> Result<CallStep, CallError> {
        self.expect(CallState::Idle, CallTrigger::IncomingCall)?;
        Ok(self.go(CallState::Ringing))
    }

    /// Ringing → Connecting.
    pub fn accept(&mut self) -> Result<CallStep, CallError> {
        self.expect(CallState::Ringing, CallTrigger::Accept)?;
        Ok(self.begin_connecting())
    }

    /// Ringing → Idle. No call session is created.
    pub fn decline(&mut self) -> Result<CallStep, CallError> {
        self.expect(CallState::Ringing, CallTrigger::Decline)?;
        Ok(self.go(CallState::Idle))
    }

    /// Idle → Connecting, skipping Ringing.
    pub fn start(&mut self) -> Result<CallStep, CallError> {
        self.expect(CallState::Idle, CallTrigger::Start)?;
        Ok(self.begin_connecting())
    }

    /// Connecting | Active → Ended → Idle.
    ///
    /// Ending during `Connecting` disarms the connect timer; a late expiry
    /// is then ignored by [`connect_elapsed`](Self::connect_elapsed).
    pub fn end(&mut self) -> Result<CallStep, CallError> {
        if !self.state.in_call() {
            return Err(CallError::InvalidTransition {
                state: self.state,
                trigger: CallTrigger::End,
            });
        }

        let mut step = self.go(CallState::Ended);
        self.mute = MuteFlags::default();
        if self.pending_connect.take().is_some() {
            step.schedule = Some(Schedule::Cancel(TimerKind::ConnectDelay));
        }
        step.transitions.extend(self.go(CallState::Idle).transitions);
        Ok(step)
    }

    /// Connect timer expired.
    ///
    /// Returns `None` when the expiry is stale: the call was ended, or a
    /// newer connect attempt replaced the ticket.
    pub fn connect_elapsed(&mut self, key: TimerKey) -> Option<CallStep> {
        if self.state != CallState::Connecting || self.pending_connect != Some(key) {
            tracing::debug!(
                "[Call] Ignoring stale connect timer #{} (state: {})",
                key.ticket,
                self.state
            );
            return None;
        }
        self.pending_connect = None;
        Some(self.go(CallState::Active))
    }

    /// Flips the audio flag. No-op outside a call.
    pub fn toggle_audio(&mut self) -> Option<MuteFlags> {
        if !self.state.in_call() {
            return None;
        }
        self.mute.audio_muted = !self.mute.audio_muted;
        tracing::debug!(
            "[Call] Audio {}",
            if self.mute.audio_muted { "muted" } else { "unmuted" }
        );
        Some(self.mute)
    }

    /// Flips the video flag. No-op outside a call.
    pub fn toggle_video(&mut self) -> Option<MuteFlags> {
        if !self.state.in_call() {
            return None;
        }
        self.mute.video_muted = !self.mute.video_muted;
        tracing::debug!(
            "[Call] Video {}",
            if self.mute.video_muted { "muted" } else { "unmuted" }
        );
        Some(self.mute)
    }

    fn expect(&self, state: CallState, trigger: CallTrigger) -> Result<(), CallError> {
        if self.state == state {
            Ok(())
        } else {
            Err(CallError::InvalidTransition {
                state: self.state,
                trigger,
            })
        }
    }

    fn begin_connecting(&mut self) -> CallStep {
        let mut step = self.go(CallState::Connecting);
        self.mute = MuteFlags::default();
        let key = self.tickets.issue(TimerKind::ConnectDelay);
        self.pending_connect = Some(key);
        step.schedule = Some(Schedule::Arm(TimerRequest {
            key,
            delay: self.connect_delay,
        }));
        step
    }

    fn go(&mut self, to: CallState) -> CallStep {
        let from = self.state;
        self.state = to;
        tracing::info!("[Call] {} -> {}", from, to);
        CallStep::single(from, to)
    }
}
