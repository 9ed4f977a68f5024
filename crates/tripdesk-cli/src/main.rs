use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use tripdesk_application::{AppRuntime, TravelApp};
use tripdesk_core::config::AppConfig;
use tripdesk_core::event::AppEvent;
use tripdesk_core::session::{CredentialTable, MemorySessionStore, SessionManager, SessionStore};
use tripdesk_infrastructure::{ConfigLoader, FileSessionStore};

mod command;
mod render;

use command::{Command, COMMAND_WORDS, HELP};

#[derive(Parser)]
#[command(name = "tripdesk")]
#[command(about = "TRIPDESK - demo travel desk with simulated video calls", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/tripdesk/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session slot file (overrides the config file)
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, conflicts_with = "session_file")]
    ephemeral: bool,

    /// Log filter used when RUST_LOG is unset (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,
}

/// rustyline helper that completes and highlights command words.
#[derive(Clone)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = COMMAND_WORDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((head, rest)) if COMMAND_WORDS.contains(&head) => {
                Owned(format!("{} {}", head.bright_cyan(), rest))
            }
            None if COMMAND_WORDS.contains(&line) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMAND_WORDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new(path.clone()),
        None => ConfigLoader::default_location()?,
    };
    let mut config = loader
        .load()
        .with_context(|| format!("Failed to load config from {:?}", loader.path()))?;
    if let Some(path) = &cli.session_file {
        config.session_file = Some(path.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn session_store(cli: &Cli, config: &AppConfig) -> Result<Arc<dyn SessionStore>> {
    if cli.ephemeral {
        return Ok(Arc::new(MemorySessionStore::new()));
    }
    let store = match &config.session_file {
        Some(path) => FileSessionStore::new(path.clone()),
        None => FileSessionStore::default_location()?,
    };
    tracing::info!("[Bootstrap] Session slot at {:?}", store.path());
    Ok(Arc::new(store))
}

/// Runs one parsed command. Returns false when the REPL should exit.
async fn execute(runtime: &AppRuntime, credentials: &CredentialTable, command: Command) -> bool {
    let outcome = match command {
        Command::Quit => return false,
        Command::Help => {
            println!("{}", HELP.bright_black());
            Ok(())
        }
        Command::Accounts => {
            render::accounts(credentials);
            Ok(())
        }
        Command::Login { identity, secret } => runtime
            .dispatch(|app| app.submit_login(&identity, &secret).map(|_| ()))
            .await,
        Command::Logout => {
            runtime.dispatch(|app| app.logout()).await;
            Ok(())
        }
        Command::Status => {
            let status = runtime
                .dispatch(|app| {
                    format!(
                        "user: {}\npage: {}  tab: {}\ncall: {}  [{}] [{}]",
                        app.session()
                            .map(|s| format!("{} ({})", s.display_name, s.role))
                            .unwrap_or_else(|| "-".to_string()),
                        app.view(),
                        app.tab(),
                        app.call_state(),
                        app.mute().audio_label(),
                        app.mute().video_label(),
                    )
                })
                .await;
            println!("{}", status);
            Ok(())
        }
        Command::Tab(tab) => runtime.dispatch(|app| app.switch_tab(tab)).await,
        Command::Book(request) => runtime
            .dispatch(|app| app.book_trip(&request).map(|_| ()))
            .await,
        Command::Trips => {
            let trips = runtime.dispatch(|app| app.trips().to_vec()).await;
            render::trips(&trips);
            Ok(())
        }
        Command::StartCall => runtime.dispatch(|app| app.start_call()).await,
        Command::AcceptCall => runtime.dispatch(|app| app.accept_call()).await,
        Command::DeclineCall => runtime.dispatch(|app| app.decline_call()).await,
        Command::EndCall => runtime.dispatch(|app| app.end_call()).await,
        Command::MuteAudio => {
            if runtime.dispatch(|app| app.toggle_audio()).await.is_none() {
                println!("{}", "No call in progress.".bright_black());
            }
            Ok(())
        }
        Command::MuteVideo => {
            if runtime.dispatch(|app| app.toggle_video()).await.is_none() {
                println!("{}", "No call in progress.".bright_black());
            }
            Ok(())
        }
        Command::Next => {
            runtime.dispatch(|app| app.carousel_next()).await;
            Ok(())
        }
        Command::Prev => {
            runtime.dispatch(|app| app.carousel_prev()).await;
            Ok(())
        }
    };

    if let Err(e) = outcome {
        println!("{}", e.to_string().red());
    }
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log_level);

    // ===== Backend Initialization =====
    let credentials = Arc::new(CredentialTable::demo());
    let store = session_store(&cli, &config)?;
    let sessions = SessionManager::new(credentials.clone(), store);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let app = TravelApp::new(config, sessions, Arc::new(event_tx));
    let runtime = AppRuntime::new(app);

    let renderer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            render::event(&event);
        }
    });

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== TRIPDESK ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands or 'quit' to exit.".bright_black());
    println!();

    runtime.start().await;

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match Command::parse(trimmed) {
                    Ok(command) => {
                        if !execute(&runtime, &credentials, command).await {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                    }
                    Err(hint) => println!("{}", hint.yellow()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    runtime.shutdown();
    drop(runtime);
    // Aborted timer tasks may still hold the app for a moment; don't wait on them.
    let _ = tokio::time::timeout(std::time::Duration::from_millis(200), renderer).await;

    Ok(())
}
