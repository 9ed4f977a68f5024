//! Terminal rendering of app events and listings.

use colored::Colorize;
use tripdesk_core::booking::{Trip, TripStatus};
use tripdesk_core::call::CallState;
use tripdesk_core::event::AppEvent;
use tripdesk_core::session::CredentialTable;

pub fn event(event: &AppEvent) {
    match event {
        AppEvent::SessionChanged {
            session: Some(session),
        } => println!(
            "{}",
            format!("Welcome, {} ({})", session.display_name, session.role).bright_green()
        ),
        AppEvent::SessionChanged { session: None } => {
            println!("{}", "Signed out.".bright_black())
        }
        AppEvent::ViewChanged { view } => println!("{}", format!("[page] {}", view).bright_black()),
        AppEvent::TabChanged { tab } => println!("{}", format!("[tab] {}", tab).bright_black()),
        AppEvent::IncomingCall { visible: true } => println!(
            "{}",
            "Incoming video call! `call accept` or `call decline`"
                .bright_yellow()
                .bold()
        ),
        AppEvent::IncomingCall { visible: false } => {}
        AppEvent::CallStateChanged { to, .. } => match to {
            CallState::Connecting => println!("{}", "Connecting video chat...".yellow()),
            CallState::Active => println!(
                "{}",
                "Video chat connected. `mute audio`, `mute video`, `call end`".bright_cyan()
            ),
            CallState::Ended => println!("{}", "Video chat ended.".bright_black()),
            CallState::Idle | CallState::Ringing => {}
        },
        AppEvent::MuteChanged { mute } => println!(
            "{}",
            format!("[{}] [{}]", mute.audio_label(), mute.video_label()).cyan()
        ),
        AppEvent::TripBooked { trip } => {
            println!("{}", format!("Booked trip #{}", trip.id).bright_green())
        }
        AppEvent::CarouselMoved { index } => {
            println!("{}", format!("[carousel] position {}", index).bright_black())
        }
        AppEvent::Notice { message } => println!("{}", message.bright_blue()),
    }
}

pub fn trips(trips: &[Trip]) {
    if trips.is_empty() {
        println!(
            "{}",
            "No trips booked yet. Book your first trip!".bright_black()
        );
        return;
    }
    for trip in trips {
        let status = match trip.status {
            TripStatus::Confirmed => trip.status.to_string().green(),
            TripStatus::Pending => trip.status.to_string().magenta(),
        };
        println!("{}", format!("#{} {}", trip.id, trip.destination).bold());
        println!("  Travel Date: {}", Trip::format_date(trip.travel_date));
        println!("  Return Date: {}", Trip::format_date(trip.return_date));
        println!("  Travelers:   {}", trip.travelers);
        println!("  Status:      {}", status);
    }
}

pub fn accounts(credentials: &CredentialTable) {
    for account in credentials.accounts() {
        println!(
            "  {:<10} {:<9} {}",
            account.identity,
            account.role.to_string(),
            account.display_name
        );
    }
    if let Some(secret) = credentials.shared_secret() {
        println!("{}", format!("Password for all accounts: {}", secret).bright_black());
    }
}
