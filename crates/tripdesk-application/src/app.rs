use std::sync::Arc;

use thiserror::Error;
use tripdesk_core::booking::{BookingError, BookingRequest, Trip, TripLedger};
use tripdesk_core::call::{CallError, CallSimulator, CallState, CallStep, CallTrigger, MuteFlags};
use tripdesk_core::carousel::Carousel;
use tripdesk_core::config::AppConfig;
use tripdesk_core::event::{AppEvent, EventSink};
use tripdesk_core::session::{LoginError, Role, Session, SessionManager};
use tripdesk_core::timer::{Schedule, TicketCounter, TimerKey, TimerKind, TimerRequest};
use tripdesk_core::view::{DashboardTab, View};

/// Message shown to an agent after declining a call.
pub const DECLINE_NOTICE: &str = "Call declined. The customer will be notified.";
/// Message shown after a successful booking.
pub const BOOKED_NOTICE: &str =
    "Trip booked successfully! You can view it in the \"My Trips\" section.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error("Please log in first.")]
    NotLoggedIn,
}

pub type Result<T> = std::result::Result<T, AppError>;

/// The application root.
///
/// Owns every piece of mutable state: the signed-in session, the current view,
/// the call simulator, the trip ledger and the carousel. All methods are
/// synchronous. Delayed work is requested through [`take_schedule`], and
/// expiries come back through [`fire`], which re-checks that the timer still
/// belongs to the state that armed it.
///
/// [`take_schedule`]: TravelApp::take_schedule
/// [`fire`]: TravelApp::fire
pub struct TravelApp {
    config: AppConfig,
    sessions: SessionManager,
    session: Option<Session>,
    view: View,
    tab: DashboardTab,
    call: CallSimulator,
    trips: TripLedger,
    carousel: Carousel,
    tickets: TicketCounter,
    pending_ring: Option<TimerKey>,
    pending_carousel: Option<TimerKey>,
    schedule: Vec<Schedule>,
    events: Arc<dyn EventSink>,
}

impl TravelApp {
    pub fn new(config: AppConfig, sessions: SessionManager, events: Arc<dyn EventSink>) -> Self {
        let call = CallSimulator::new(config.connect_delay());
        let carousel = Carousel::new(config.carousel_items, config.carousel_visible);
        Self {
            config,
            sessions,
            session: None,
            view: View::HomePage,
            tab: DashboardTab::default(),
            call,
            trips: TripLedger::with_demo_trips(),
            carousel,
            tickets: TicketCounter::default(),
            pending_ring: None,
            pending_carousel: None,
            schedule: Vec::new(),
            events,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn tab(&self) -> DashboardTab {
        self.tab
    }

    pub fn call_state(&self) -> CallState {
        self.call.state()
    }

    pub fn mute(&self) -> MuteFlags {
        self.call.mute()
    }

    pub fn incoming_call_visible(&self) -> bool {
        self.call.state() == CallState::Ringing
    }

    pub fn trips(&self) -> &[Trip] {
        self.trips.trips()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Drains the timer work requested since the last call.
    pub fn take_schedule(&mut self) -> Vec<Schedule> {
        std::mem::take(&mut self.schedule)
    }

    // ============================================================================
    // Startup / session
    // ============================================================================

    /// Restores the persisted session, if any, and starts carousel auto-scroll.
    ///
    /// Returns true when a session was restored.
    pub fn start(&mut self) -> bool {
        self.arm_carousel();
        match self.sessions.restore() {
            Some(session) => {
                self.activate(session);
                true
            }
            None => {
                self.show(View::HomePage);
                false
            }
        }
    }

    /// Handles the login form. Surrounding whitespace is ignored.
    pub fn submit_login(&mut self, identity: &str, secret: &str) -> Result<Session> {
        let session = self.sessions.login(identity.trim(), secret.trim())?;
        self.tear_down_call();
        self.activate(session.clone());
        Ok(session)
    }

    pub fn logout(&mut self) {
        self.sessions.logout();
        self.tear_down_call();
        self.cancel_ring();
        if self.session.take().is_some() {
            self.publish(AppEvent::SessionChanged { session: None });
        }
        self.show(View::HomePage);
    }

    fn activate(&mut self, session: Session) {
        self.cancel_ring();
        let role = session.role;
        self.session = Some(session.clone());
        self.publish(AppEvent::SessionChanged {
            session: Some(session),
        });
        self.tab = DashboardTab::default();
        self.show(role.dashboard());

        if role.receives_calls() {
            let key = self.tickets.issue(TimerKind::IncomingCall);
            self.pending_ring = Some(key);
            self.schedule.push(Schedule::Arm(TimerRequest {
                key,
                delay: self.config.ring_delay(),
            }));
            tracing::debug!("[Session] Inbound call armed (#{})", key.ticket);
        }
    }

    fn cancel_ring(&mut self) {
        if self.pending_ring.take().is_some() {
            self.schedule.push(Schedule::Cancel(TimerKind::IncomingCall));
        }
    }

    fn show(&mut self, view: View) {
        self.view = view;
        self.publish(AppEvent::ViewChanged { view });
    }

    // ============================================================================
    // Dashboard
    // ============================================================================

    pub fn switch_tab(&mut self, tab: DashboardTab) -> Result<()> {
        self.require_session()?;
        self.tab = tab;
        self.publish(AppEvent::TabChanged { tab });
        Ok(())
    }

    /// Handles the booking form and switches to the trip list on success.
    pub fn book_trip(&mut self, request: &BookingRequest) -> Result<Trip> {
        self.require_session()?;
        let trip = self.trips.book(request)?.clone();
        self.publish(AppEvent::TripBooked { trip: trip.clone() });
        self.publish(AppEvent::Notice {
            message: BOOKED_NOTICE.to_string(),
        });
        self.switch_tab(DashboardTab::MyTrips)?;
        Ok(trip)
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(AppError::NotLoggedIn)
    }

    // ============================================================================
    // Carousel
    // ============================================================================

    pub fn carousel_next(&mut self) -> bool {
        let moved = self.carousel.next();
        if moved {
            self.publish_carousel();
        }
        moved
    }

    pub fn carousel_prev(&mut self) -> bool {
        let moved = self.carousel.prev();
        if moved {
            self.publish_carousel();
        }
        moved
    }

    fn publish_carousel(&self) {
        self.publish(AppEvent::CarouselMoved {
            index: self.carousel.index(),
        });
    }

    fn arm_carousel(&mut self) {
        let Some(delay) = self.config.carousel_interval() else {
            return;
        };
        let key = self.tickets.issue(TimerKind::CarouselAdvance);
        self.pending_carousel = Some(key);
        self.schedule
            .push(Schedule::Arm(TimerRequest { key, delay }));
    }

    // ============================================================================
    // Call controls
    // ============================================================================

    /// Customer-initiated video chat.
    pub fn start_call(&mut self) -> Result<()> {
        let session = self.require_session()?;
        if session.role != Role::Customer {
            return Err(CallError::NotPermitted {
                trigger: CallTrigger::Start,
                reason: "only customers can start a video chat".to_string(),
            }
            .into());
        }
        let step = self.call.start()?;
        self.apply(step);
        Ok(())
    }

    pub fn accept_call(&mut self) -> Result<()> {
        self.require_session()?;
        let step = self.call.accept()?;
        self.apply(step);
        Ok(())
    }

    pub fn decline_call(&mut self) -> Result<()> {
        self.require_session()?;
        let step = self.call.decline()?;
        self.apply(step);
        self.publish(AppEvent::Notice {
            message: DECLINE_NOTICE.to_string(),
        });
        Ok(())
    }

    /// Ends the call from either side (end button, close button, backdrop).
    pub fn end_call(&mut self) -> Result<()> {
        let step = self.call.end()?;
        self.apply(step);
        Ok(())
    }

    /// No-op outside a call.
    pub fn toggle_audio(&mut self) -> Option<MuteFlags> {
        let mute = self.call.toggle_audio()?;
        self.publish(AppEvent::MuteChanged { mute });
        Some(mute)
    }

    /// No-op outside a call.
    pub fn toggle_video(&mut self) -> Option<MuteFlags> {
        let mute = self.call.toggle_video()?;
        self.publish(AppEvent::MuteChanged { mute });
        Some(mute)
    }

    fn tear_down_call(&mut self) {
        match self.call.state() {
            CallState::Ringing => {
                if let Ok(step) = self.call.decline() {
                    self.apply(step);
                }
            }
            CallState::Connecting | CallState::Active => {
                if let Ok(step) = self.call.end() {
                    self.apply(step);
                }
            }
            CallState::Idle | CallState::Ended => {}
        }
    }

    fn apply(&mut self, step: CallStep) {
        for transition in &step.transitions {
            if transition.from == CallState::Ringing {
                self.publish(AppEvent::IncomingCall { visible: false });
            }
            self.publish(AppEvent::CallStateChanged {
                from: transition.from,
                to: transition.to,
            });
            match transition.to {
                CallState::Ringing => self.publish(AppEvent::IncomingCall { visible: true }),
                CallState::Connecting | CallState::Ended => self.publish(AppEvent::MuteChanged {
                    mute: self.call.mute(),
                }),
                CallState::Idle | CallState::Active => {}
            }
        }
        if let Some(schedule) = step.schedule {
            self.schedule.push(schedule);
        }
    }

    // ============================================================================
    // Timers
    // ============================================================================

    /// Reports a timer expiry.
    ///
    /// Expiries whose ticket no longer matches the armed one are ignored.
    pub fn fire(&mut self, key: TimerKey) {
        match key.kind {
            TimerKind::IncomingCall => self.fire_ring(key),
            TimerKind::ConnectDelay => {
                if let Some(step) = self.call.connect_elapsed(key) {
                    self.apply(step);
                }
            }
            TimerKind::CarouselAdvance => {
                if self.pending_carousel != Some(key) {
                    tracing::debug!("[Carousel] Ignoring stale tick #{}", key.ticket);
                    return;
                }
                self.carousel.advance();
                self.publish_carousel();
                self.arm_carousel();
            }
        }
    }

    fn fire_ring(&mut self, key: TimerKey) {
        if self.pending_ring != Some(key) {
            tracing::debug!("[Call] Ignoring stale inbound call #{}", key.ticket);
            return;
        }
        self.pending_ring = None;

        let is_agent = self
            .session
            .as_ref()
            .is_some_and(|s| s.role.receives_calls());
        if !is_agent {
            return;
        }
        match self.call.ring() {
            Ok(step) => self.apply(step),
            Err(e) => tracing::info!("[Call] Inbound call dropped: {}", e),
        }
    }

    fn publish(&self, event: AppEvent) {
        self.events.publish(event);
    }
}
