//! `advisor` binary.
//!
//! Environment:
//! - `ADVISOR_CONFIG`: config file path (default `./advisor.toml` when present)
//! - `HOST`, `PORT`: override `[server]`
//! - `RUST_LOG`: log filter (default `info`)

use advisor_core::ConfidenceInput;
use advisor_ingest::Document;
use advisor_server::config::{config_path, init_config, load_config, Config, DEFAULT_CONFIG_FILE};
use advisor_server::http::{create_router, AppState};
use advisor_server::{AdviceRequest, Advisor};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "advisor", version, about = "Daily Student Priority Advisor")]
struct Cli {
    /// Path to advisor.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Decide today's priority for a planning file (JSON or syllabus text)
    Decide {
        /// Planning snapshot JSON or sectioned syllabus text
        #[arg(long)]
        snapshot: PathBuf,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        today: Option<String>,

        /// low / medium / high, or a number in 0.0-1.0
        #[arg(long)]
        confidence: Option<String>,

        /// Multiplier on assignment and exam weights (default 1.0)
        #[arg(long)]
        coefficient: Option<f64>,

        #[arg(long, default_value = "Student")]
        student: String,
    },

    /// Write a default advisor.toml
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::InitConfig = cli.command {
        let path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        return init_config(&path);
    }

    let path = config_path(cli.config);
    let mut cfg = load_config(path.as_deref())?;
    cfg.apply_env_overrides();

    match cli.command {
        Command::Serve { host, port } => serve(cfg, host, port).await,
        Command::Decide {
            snapshot,
            today,
            confidence,
            coefficient,
            student,
        } => {
            let bytes = std::fs::read(&snapshot)
                .with_context(|| format!("read {}", snapshot.display()))?;
            let mut doc = Document::new(bytes);
            if let Some(name) = snapshot.file_name().and_then(|n| n.to_str()) {
                doc = doc.with_filename(name);
            }

            let request = AdviceRequest {
                student_name: Some(student),
                current_date: today,
                confidence: confidence.map(parse_confidence_arg),
                module_coefficient: coefficient,
                document: Some(doc),
                ..Default::default()
            };

            let advisor = Advisor::from_config(&cfg)?;
            let response = advisor.advise(request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::InitConfig => Ok(()),
    }
}

async fn serve(mut cfg: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(h) = host {
        cfg.server.host = h;
    }
    if let Some(p) = port {
        cfg.server.port = p;
    }

    let advisor = Advisor::from_config(&cfg)?;
    let state = AppState::new(advisor, cfg.server.max_upload_bytes);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .with_context(|| format!("bad listen address {}:{}", cfg.server.host, cfg.server.port))?;

    info!(llm = cfg.llm.enabled, timezone = %cfg.calendar.timezone, "starting advisor");
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn parse_confidence_arg(raw: String) -> ConfidenceInput {
    match raw.trim().parse::<f64>() {
        Ok(v) => ConfidenceInput::Score(v),
        Err(_) => ConfidenceInput::Label(raw),
    }
}
