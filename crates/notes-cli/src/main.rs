//! notes - a terminal client for a notes REST API.
//!
//! Lists, creates, views and deletes notes using a bearer token stored
//! locally. Run `notes login` once with a token issued by the backend.

mod config;
mod render;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use notes_core::auth::{check_at, FileCredentialStore, KeyringCredentialStore, TokenStatus};
use notes_core::{
    CredentialStore, NotesClient, NotesPage, Outcome, ReqwestTransport, SettingsLoader, TokenGuard,
};

use config::{Config, StoreKind};
use render::{TerminalNavigator, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(about = "Manage notes on a notes API from the terminal")]
struct Cli {
    /// Location of settings.json (URL or file path)
    #[arg(long, env = "NOTES_SETTINGS", global = true)]
    settings: Option<String>,

    /// Where the token is stored
    #[arg(long, env = "NOTES_STORE", value_enum, global = true)]
    store: Option<StoreKind>,

    /// Print views and notifications as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List the newest 20 notes
    List,
    /// Create a note, then list notes again
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a note, then list notes again
    Delete { id: i64 },
    /// Show a single note
    View { id: i64 },
    /// Store a token issued by the backend
    Login {
        /// Token to store (prompted for if omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show whether the stored token is usable
    Status,
}

/// Initialize the tracing subscriber for logging
fn init_tracing(verbose: bool) {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn open_store(kind: StoreKind) -> Result<Arc<dyn CredentialStore>> {
    Ok(match kind {
        StoreKind::File => Arc::new(
            FileCredentialStore::in_data_dir().context("Failed to locate session storage")?,
        ),
        StoreKind::Keyring => Arc::new(KeyringCredentialStore::new()),
    })
}

fn exit_code(outcome: Outcome) -> ExitCode {
    match outcome {
        Outcome::Completed => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::from(1),
        Outcome::Reauthenticate => ExitCode::from(2),
    }
}

fn login(store: &dyn CredentialStore, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => rpassword::prompt_password("Token: ").context("Failed to read token")?,
    };
    let token = token.trim();

    if let Err(e) = check_at(token, chrono::Utc::now()) {
        bail!("Refusing to store token: {}", e);
    }
    store.set(token)?;
    println!("Token stored.");
    Ok(())
}

fn print_status(guard: &TokenGuard) -> Outcome {
    match guard.status() {
        TokenStatus::Missing => {
            println!("Not logged in.");
            Outcome::Reauthenticate
        }
        TokenStatus::Invalid(e) => {
            println!("Stored token is not usable: {}", e);
            Outcome::Reauthenticate
        }
        TokenStatus::Valid(claims) => {
            let expires = claims
                .expires_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| claims.exp.to_string());
            match claims.sub {
                Some(sub) => println!("Logged in as {} until {}.", sub, expires),
                None => println!("Logged in until {}.", expires),
            }
            Outcome::Completed
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let store = open_store(config.store(cli.store))?;
    let navigator = Arc::new(TerminalNavigator::new(config.login_location()));
    let guard = TokenGuard::new(store.clone(), navigator);

    let command = cli.command.unwrap_or(Command::List);
    match command {
        Command::Login { token } => {
            login(store.as_ref(), token)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Logout => {
            store.clear()?;
            println!("Logged out.");
            return Ok(ExitCode::SUCCESS);
        }
        Command::Status => return Ok(exit_code(print_status(&guard))),
        _ => {}
    }

    let transport = Arc::new(ReqwestTransport::new()?);
    let settings = SettingsLoader::new(
        config.settings_location(cli.settings.as_deref()),
        transport.clone(),
    );
    let client = NotesClient::new(transport, guard, settings);
    let page = NotesPage::new(client, Arc::new(TerminalRenderer::new(cli.json)));

    info!(?command, "Running notes action");
    let outcome = match command {
        Command::Create { title, content } => page.create_note(&title, &content).await,
        Command::Delete { id } => page.delete_note(id).await,
        Command::View { id } => page.view_note(id).await,
        _ => page.load_notes().await,
    };

    Ok(exit_code(outcome))
}
