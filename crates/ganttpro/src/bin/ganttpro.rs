//! GanttPro import CLI.
//!
//! Runs the import HTTP service or imports a work breakdown from a file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ganttpro::{server, Config, GanttProClient, HierarchyImporter, ImportRequest};

/// GanttPro import - create GanttPro projects from a task breakdown.
#[derive(Parser)]
#[command(name = "ganttpro")]
#[command(about = "Import hierarchical task lists into GanttPro")]
struct Cli {
    /// GanttPro API key (or set `GANTTPRO_API_KEY` env var).
    #[arg(long, env = "GANTTPRO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// GanttPro API root (or set `GANTTPRO_BASE_URL` env var).
    #[arg(long, env = "GANTTPRO_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the import HTTP endpoint.
    Serve {
        /// Listen port (or set `GANTTPRO_PORT` env var).
        #[arg(long, env = "GANTTPRO_PORT")]
        port: Option<u16>,
    },

    /// Import a JSON file with `projectName` and `tasks`.
    Import {
        /// Path to the request file.
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "ganttpro=debug"
    } else {
        "ganttpro=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let mut config = Config::default();
    if let Some(key) = cli.api_key.filter(|k| !k.is_empty()) {
        config.api_key = Some(key);
    }
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Commands::Import { file } => import_file(&config, &file).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting GanttPro import service...");

    let port = config.port;
    let state = server::AppState::from_config(config)?;
    let app = server::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(port = port, "GanttPro import service listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn import_file(config: &Config, file: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let request: ImportRequest =
        serde_json::from_str(&contents).context("Failed to parse import request")?;
    request.validate()?;

    let api_key = config.require_api_key()?;
    let client = GanttProClient::with_options(api_key, &config.base_url, config.request_timeout())?;

    let report = HierarchyImporter::new(&client).run(&request).await?;

    for result in report.results.iter().filter(|r| r.outcome.is_failed()) {
        warn!(task = %result.name, "Task was not created");
    }

    let summary = report.summary(&request.project_name);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
