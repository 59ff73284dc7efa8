//! Command-line client for Petting Zootopia.
//!
//! Runs the same tools as the server, in-process, against the upstream APIs.
//!
//! # Usage
//!
//! ```bash
//! # Fetch one image
//! cargo run --bin zoo -- fetch duck
//!
//! # Let the configured selector pick a tool
//! cargo run --bin zoo -- ask "show me a cute cat"
//!
//! # Upstream API health
//! cargo run --bin zoo -- health
//!
//! # List tools
//! cargo run --bin zoo -- tools
//!
//! # Interactive session
//! cargo run --bin zoo -- chat
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`petting_zootopia::config`]), notably
//! `AI_BACKEND`, `OLLAMA_URL`, `OLLAMA_MODEL` and `ANTHROPIC_API_KEY` for
//! `ask` and `chat`.
//!
//! `fetch` exits with status 1 when no image could be fetched.

use petting_zootopia::config;
use petting_zootopia::domain::gateways::HttpTransport;
use petting_zootopia::infrastructure::http::ReqwestTransport;
use petting_zootopia::infrastructure::selector::{self, select_with_fallback};
use petting_zootopia::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const NO_TOOL_MESSAGE: &str =
    "Sorry, I don't have tools for that request! Try asking for a duck, dog, or cat.";

/// Random animal pictures from the terminal.
#[derive(Parser)]
#[command(name = "zoo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one animal image URL
    Fetch {
        /// duck, dog or cat
        animal: String,
    },

    /// Route a free-text request to a tool
    Ask {
        /// e.g. "I want a duck!"
        query: String,
    },

    /// Check the upstream animal APIs
    Health,

    /// List available tools
    Tools,

    /// Interactive session (type `quit` to exit)
    Chat,
}

/// Exits non-zero when `fetch` cannot produce an image.
#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_from_env().context("Invalid configuration")?;

    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let selector = selector::from_config(&config, transport.client().clone());
    let transport: Arc<dyn HttpTransport> = Arc::new(transport);
    let state = AppState::new(transport, selector, config);

    match cli.command {
        Commands::Fetch { animal } => return Ok(fetch(&state, &animal).await),
        Commands::Ask { query } => ask(&state, &query).await,
        Commands::Health => health(&state).await,
        Commands::Tools => tools(&state),
        Commands::Chat => chat(&state).await?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn fetch(state: &AppState, animal: &str) -> ExitCode {
    match state.animal_service.fetch_animal(animal).await {
        Ok(image) => {
            println!("{}", image.url.bright_green());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.user_message().red());
            ExitCode::FAILURE
        }
    }
}

/// Routes `query` through the selector and prints the tool output.
async fn ask(state: &AppState, query: &str) {
    let choice = select_with_fallback(state.selector.as_ref(), query, &state.tools.specs()).await;

    let Some(tool) = choice.tool else {
        println!("{}", NO_TOOL_MESSAGE.yellow());
        return;
    };

    println!("{} {}", "→".bright_blue(), tool.cyan());

    match state.tools.call(&tool, Some(&choice.parameters)).await {
        Ok(output) if output.is_error => println!("{}", output.content.red()),
        Ok(output) => println!("{}", output.content.bright_green()),
        Err(e) => println!("{}", e.to_string().red()),
    }
}

async fn health(state: &AppState) {
    let health = state.health_service.check_all().await;

    println!("{}", "Upstream API health".bright_blue().bold());
    println!();

    for line in health.report().lines() {
        if line.contains("UNHEALTHY") {
            println!("{}", line.red());
        } else if line.contains("HEALTHY") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

fn tools(state: &AppState) {
    println!("{}", "Available tools".bright_blue().bold());
    println!();

    for tool in state.tools.list() {
        println!("  {:<14} {}", tool.name.cyan(), tool.description);
    }
}

async fn chat(state: &AppState) -> Result<()> {
    println!(
        "{} {}",
        "Petting Zootopia".bright_blue().bold(),
        format!("({} routing)", state.selector.name()).dimmed()
    );
    println!("Ask for a duck, dog or cat. Type {} to exit.", "quit".bold());
    println!();

    loop {
        let query: String = Input::new().with_prompt("you").interact_text()?;
        let query = query.trim();

        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            println!("{}", "Bye!".bright_blue());
            break;
        }

        if query.is_empty() {
            continue;
        }

        ask(state, query).await;
        println!();
    }

    Ok(())
}
