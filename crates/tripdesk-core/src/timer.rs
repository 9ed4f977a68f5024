//! Timer requests emitted by the application root.
//!
//! The root never sleeps. It hands out `TimerRequest`s, and whoever drives it
//! feeds expiries back as `TimerKey`s. Each key carries the ticket that was
//! current when the timer was armed, so a late expiry can be recognised and
//! dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TimerKind {
    /// Delay between an agent's session starting and the inbound call ringing.
    IncomingCall,
    /// Simulated connection setup after a call is started or accepted.
    ConnectDelay,
    /// Carousel auto-advance tick.
    CarouselAdvance,
}

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerKey {
    pub kind: TimerKind,
    pub ticket: u64,
}

/// A timer the driver should arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub key: TimerKey,
    pub delay: Duration,
}

/// Instructions for the timer driver, drained after every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Arm a timer, replacing any outstanding timer of the same kind.
    Arm(TimerRequest),
    /// Drop the outstanding timer of this kind, if any.
    Cancel(TimerKind),
}

/// Monotonic ticket source.
#[derive(Debug, Default)]
pub struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub fn issue(&mut self, kind: TimerKind) -> TimerKey {
        self.next += 1;
        TimerKey {
            kind,
            ticket: self.next,
        }
    }
}
