mod api;
mod cli;
mod config;
mod error;
mod history;
mod timeout;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::api::{GoogleTranslateClient, HuggingFaceImageClient, OpenRouterClient};
use crate::cli::chat::{ChatContext, SessionSettings};
use crate::history::HistoryStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input to send as a single chat turn, then exit
    #[arg(short, long)]
    input: Option<String>,

    /// Chat model identifier
    #[arg(short, long, default_value = config::DEFAULT_MODEL)]
    model: String,

    /// Style descriptor prefixed to image prompts
    #[arg(short, long, default_value = config::DEFAULT_IMAGE_STYLE)]
    style: String,

    /// Translate input to English and replies back to the base language
    #[arg(short, long)]
    translate: bool,

    /// Base language replies are translated back into
    #[arg(short, long, default_value = config::DEFAULT_BASE_LANGUAGE)]
    lang: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starting Polyglot Chat CLI");

    let chat_api = match OpenRouterClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to initialize chat client: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    let image_api = match HuggingFaceImageClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to initialize image client: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let history = HistoryStore::load(HistoryStore::default_path()?)?;

    let settings = SessionSettings {
        model: cli.model,
        style: cli.style,
        translate: cli.translate,
        base_lang: cli.lang,
    };

    let interactive = cli.input.is_none();
    let mut chat_context = ChatContext::new(
        Box::new(io::stdout()),
        history,
        Box::new(chat_api),
        Box::new(image_api),
        Box::new(GoogleTranslateClient::new()),
        settings,
        cli.input,
        interactive,
    );
    chat_context.run().await
}
