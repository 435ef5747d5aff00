// Backoffice CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: Support text/json/yaml output formats for scripting.
// Design Decision: Pages go to stdout, toasts and logs to stderr.

mod app;
mod commands;
mod components;
mod output;
mod pages;
mod routes;
mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use backoffice_client::{ApiClient, ClientConfig, TransportMode, DEFAULT_API_URL};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use components::FilePrinter;
use session::Session;

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(about = "Backoffice CLI - Manage blog content, candidates and staff accounts")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "BACKOFFICE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token from a previous sign-in
    #[arg(long, env = "BACKOFFICE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Id of the user the token belongs to, printed at sign-in
    #[arg(long, env = "BACKOFFICE_USER_ID")]
    pub user_id: Option<String>,

    /// Backend to talk to: the real API or an in-memory demo backend
    #[arg(long, env = "BACKOFFICE_TRANSPORT", default_value = "http", value_parser = ["http", "fake"])]
    pub transport: String,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json", "yaml"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    /// Also print each rendered page to this file
    #[arg(long)]
    pub print_to: Option<PathBuf>,

    #[command(subcommand)]
    pub command: commands::Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "backoffice=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let transport: TransportMode = cli.transport.parse()?;
    let mut config = ClientConfig::new(&cli.api_url).with_transport(transport);
    config.api_token = cli.token.clone();
    let client = ApiClient::from_config(&config)?;
    tracing::debug!(transport = client.transport_name(), "starting");

    let output = output::OutputFormat::from_str(&cli.output);
    let session = Session::from_token(cli.token).with_user_id(cli.user_id);
    let mut app = App::new(client, session, output, cli.quiet);
    if let Some(path) = cli.print_to {
        app = app.with_printer(Box::new(FilePrinter::new(path)));
    }

    let action = cli.command.into_action()?;
    app.run(action, &mut io::stdout().lock(), &mut io::stderr().lock())
        .await
}
