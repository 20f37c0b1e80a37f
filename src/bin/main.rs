//! Notion Gallery CLI
//!
//! Usage:
//!   notion-gallery serve [--config <file>] [--host <host>] [--port <port>]
//!   notion-gallery options <platform|status> [--config <file>]
//!
//! Examples:
//!   notion-gallery serve --port 8080
//!   notion-gallery options status --config gallery.toml

use clap::{Parser, Subcommand, ValueEnum};
use notion_gallery::config::{Settings, SettingsError};
use notion_gallery::notion::{NotionApi, NotionClient};
use notion_gallery::options::OptionCategory;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "notion-gallery")]
#[command(about = "Serve a Notion database as an image gallery")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Path to a gallery.toml (defaults to the usual search locations)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Interface to bind, overrides the config
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides the config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the filter options derived from the database schema
    Options {
        /// Which filter to list
        category: CategoryArg,

        /// Path to a gallery.toml (defaults to the usual search locations)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum CategoryArg {
    Platform,
    Status,
}

impl From<CategoryArg> for OptionCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Platform => OptionCategory::Platform,
            CategoryArg::Status => OptionCategory::Status,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,notion_gallery=debug")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve { config, host, port } => runtime.block_on(cmd_serve(config, host, port)),
        Commands::Options { category, config } => {
            runtime.block_on(cmd_options(category.into(), config))
        }
    }
}

fn load_settings(config: Option<PathBuf>) -> Result<Settings, SettingsError> {
    match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

async fn cmd_serve(config: Option<PathBuf>, host: Option<String>, port: Option<u16>) -> ExitCode {
    let mut settings = match load_settings(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    match notion_gallery::web::serve(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn cmd_options(category: OptionCategory, config: Option<PathBuf>) -> ExitCode {
    let settings = match load_settings(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(database_id) = settings.notion.database_id() else {
        eprintln!("Database ID not configured");
        return ExitCode::FAILURE;
    };

    let client = match NotionClient::new(&settings.notion) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create Notion client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match client.retrieve_database(database_id).await {
        Ok(schema) => {
            for option in category.extract(&schema) {
                println!("{}", option);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error fetching {} options: {}", category, e);
            if e.is_unauthorized() {
                eprintln!("Check NOTION_INTEGRATION_SECRET and that the integration can access the database.");
            }
            ExitCode::FAILURE
        }
    }
}
