//! faqbot-daemon - headless FAQ bot behind an HTTP API.
//!
//! Loads the FAQ store, then serves the chat commands over HTTP until a
//! `faq_stop` command or Ctrl-C. Exiting on `faq_stop` is deliberate: run
//! the daemon under a supervisor and the command becomes a remote restart.

mod http;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use faqbot_core::FaqStore;

#[derive(Parser)]
#[command(name = "faqbot-daemon")]
#[command(about = "FAQ store daemon with an HTTP invoke API")]
#[command(version)]
struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 8787)]
    port: u16,

    /// Path to the FAQ store file
    #[arg(long, default_value = "./faq.json")]
    data: PathBuf,

    /// File holding the bearer token required for mutating commands
    #[arg(long)]
    token_file: Option<PathBuf>,
}

fn load_token(path: &Path) -> Result<String, String> {
    let token = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read token file {}: {}", path.display(), e))?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(format!("Token file {} is empty", path.display()));
    }
    Ok(token)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let auth_token = match &args.token_file {
        Some(path) => match load_token(path) {
            Ok(token) => Some(token),
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::warn!("no token file configured, mutating commands are open to everyone");
            None
        }
    };

    let store = match FaqStore::open(&args.data) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to open faq store at {}: {}", args.data.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = http::serve(store, auth_token, &args.host, args.port).await {
        log::error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// ============================================================================
// TESTS
// ============================================================================
