mod cmd;
mod config;
mod context;
mod derive;
mod domain;
mod error;
mod infra;
mod services;
mod session;
mod store;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::helpdesk::HelpdeskClient;

#[derive(Parser)]
#[command(name = "triagectl", author, version, about = "Helpdesk ticket client with automated triage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tickets with priority tier and assignee.
    Tickets,
    /// Show one ticket in detail.
    Show(ShowArgs),
    /// List the assignable employers.
    Employers,
    /// Create a ticket and have the service triage it immediately.
    Create(CreateArgs),
    /// Request triage for an existing, untriaged ticket.
    Triage(TriageArgs),
    /// Interactive console session.
    Console,
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ShowArgs {
    /// Ticket id.
    id: String,
}

#[derive(Args)]
struct CreateArgs {
    /// Reporter user id; falls back to the configured default.
    #[arg(short, long)]
    user_id: Option<String>,
    /// Ticket title.
    #[arg(short, long)]
    title: String,
    /// Ticket description.
    #[arg(short, long)]
    description: String,
}

#[derive(Args)]
struct TriageArgs {
    /// Ticket id.
    id: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Tickets => cmd::ticket::list(&app_context()?).await,
        Commands::Show(args) => cmd::ticket::show(&app_context()?, &args.id).await,
        Commands::Employers => cmd::ticket::employers(&app_context()?).await,
        Commands::Create(args) => {
            cmd::ticket::create(&app_context()?, args.user_id, args.title, args.description).await
        }
        Commands::Triage(args) => cmd::ticket::triage(&app_context()?, &args.id).await,
        Commands::Console => cmd::console::run(&app_context()?).await,
    }
}

fn app_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    let helpdesk = Arc::new(HelpdeskClient::new(config.base_url.clone()));
    Ok(AppContext::new(config, helpdesk))
}
