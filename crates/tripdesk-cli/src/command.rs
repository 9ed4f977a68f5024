//! REPL command parsing.

use tripdesk_core::booking::BookingRequest;
use tripdesk_core::view::DashboardTab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { identity: String, secret: String },
    Logout,
    Status,
    Accounts,
    Tab(DashboardTab),
    Book(BookingRequest),
    Trips,
    StartCall,
    AcceptCall,
    DeclineCall,
    EndCall,
    MuteAudio,
    MuteVideo,
    Next,
    Prev,
    Help,
    Quit,
}

/// Top-level command words, for completion.
pub const COMMAND_WORDS: &[&str] = &[
    "login", "logout", "status", "accounts", "tab", "book", "trips", "call", "mute", "next",
    "prev", "help", "quit",
];

pub const HELP: &str = "\
login <identity> <password>        sign in (try `accounts`)
logout                             sign out
status                             show session, view and call state
accounts                           list demo accounts
tab <book-trip|my-trips>           switch dashboard tab
book <destination> <travel-date> <return-date> <travelers>
                                   book a trip (dates as YYYY-MM-DD)
trips                              list booked trips
call <start|accept|decline|end>    video call controls
mute <audio|video>                 toggle mute during a call
next | prev                        scroll the destination carousel
quit                               exit";

impl Command {
    /// Parses one REPL line. `Err` holds a usage hint.
    pub fn parse(line: &str) -> Result<Self, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Err("Type `help` for commands.".to_string());
        };

        match (head, args) {
            ("login", [identity, secret]) => Ok(Command::Login {
                identity: identity.to_string(),
                secret: secret.to_string(),
            }),
            ("login", [identity]) => Ok(Command::Login {
                identity: identity.to_string(),
                secret: String::new(),
            }),
            ("login", _) => Err("usage: login <identity> <password>".to_string()),
            ("logout", []) => Ok(Command::Logout),
            ("status", []) => Ok(Command::Status),
            ("accounts", []) => Ok(Command::Accounts),
            ("tab", [tab]) => tab
                .parse::<DashboardTab>()
                .map(Command::Tab)
                .map_err(|_| "usage: tab <book-trip|my-trips>".to_string()),
            ("book", args) => Ok(Command::Book(booking_request(args))),
            ("trips", []) => Ok(Command::Trips),
            ("call", ["start"]) => Ok(Command::StartCall),
            ("call", ["accept"]) => Ok(Command::AcceptCall),
            ("call", ["decline"]) => Ok(Command::DeclineCall),
            ("call", ["end"]) | ("call", ["close"]) => Ok(Command::EndCall),
            ("call", _) => Err("usage: call <start|accept|decline|end>".to_string()),
            ("mute", ["audio"]) => Ok(Command::MuteAudio),
            ("mute", ["video"]) => Ok(Command::MuteVideo),
            ("mute", _) => Err("usage: mute <audio|video>".to_string()),
            ("next", []) => Ok(Command::Next),
            ("prev", []) => Ok(Command::Prev),
            ("help", _) => Ok(Command::Help),
            ("quit", _) | ("exit", _) => Ok(Command::Quit),
            (other, _) => Err(format!("Unknown command '{}'. Type `help`.", other)),
        }
    }
}

/// The last three words are travel date, return date and travelers; anything
/// before them is the destination. Short input leaves trailing fields empty
/// so validation can name the first missing one.
fn booking_request(args: &[&str]) -> BookingRequest {
    if args.len() >= 4 {
        let (destination, rest) = args.split_at(args.len() - 3);
        return BookingRequest::new(destination.join(" "), rest[0], rest[1], rest[2]);
    }
    let field = |i: usize| args.get(i).copied().unwrap_or_default();
    BookingRequest::new(field(0), field(1), field(2), field(3))
}
