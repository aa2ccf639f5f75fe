mod display;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use clausewise_ai::gemini::{DEFAULT_MODEL, DEFAULT_TIMEOUT};
use clausewise_ai::{GeminiClient, GeminiConfig};
use clausewise_client::UploadClient;
use clausewise_core::{AnalysisResult, Checklist, ChecklistKind};
use clausewise_host::{Analyzer, AnalyzerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clausewise", version, about = "Clause extraction and expiry checks for contracts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a local document and print the result
    Analyze {
        file: PathBuf,
        #[command(flatten)]
        checklist: ChecklistArgs,
        /// Date used for expiry status (YYYY-MM-DD, defaults to today UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Print the raw JSON result instead of cards
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        gemini: GeminiArgs,
    },
    /// Run the upload endpoint
    Serve {
        #[arg(long, env = "CLAUSEWISE_ADDR", default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
        #[command(flatten)]
        checklist: ChecklistArgs,
        #[command(flatten)]
        gemini: GeminiArgs,
    },
    /// Upload a document to a running server
    Upload {
        file: PathBuf,
        #[arg(long, env = "CLAUSEWISE_URL", default_value = "http://127.0.0.1:8080/analyze")]
        url: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the checklist categories
    Checklist {
        #[command(flatten)]
        checklist: ChecklistArgs,
    },
}

#[derive(Args)]
struct ChecklistArgs {
    /// Built-in checklist
    #[arg(long, env = "CLAUSEWISE_CHECKLIST", default_value = "loan")]
    checklist: ChecklistKind,
    /// JSON checklist to use instead of a built-in one
    #[arg(long, env = "CLAUSEWISE_CHECKLIST_FILE")]
    checklist_file: Option<PathBuf>,
}

impl ChecklistArgs {
    fn load(&self) -> anyhow::Result<Checklist> {
        let Some(path) = &self.checklist_file else {
            return Ok(self.checklist.checklist());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let checklist: Checklist = serde_json::from_str(&raw)
            .with_context(|| format!("parsing checklist {}", path.display()))?;
        checklist.validate()?;
        info!(name = %checklist.name, entries = checklist.entries.len(), "loaded checklist");
        Ok(checklist)
    }
}

#[derive(Args)]
struct GeminiArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "CLAUSEWISE_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl GeminiArgs {
    fn client(self) -> anyhow::Result<GeminiClient> {
        let api_key = self
            .api_key
            .context("no Gemini API key (set GEMINI_API_KEY or pass --api-key)")?;
        let mut config = GeminiConfig::new(api_key);
        config.model = self.model;
        config.timeout = Duration::from_secs(self.timeout_secs);
        Ok(GeminiClient::new(config)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    info!("clausewise v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Analyze {
            file,
            checklist,
            today,
            json,
            gemini,
        } => {
            let analyzer = Analyzer::new(
                AnalyzerConfig::new(checklist.load()?),
                Arc::new(gemini.client()?),
            );
            analyze(&analyzer, &file, today, json).await
        }
        Command::Serve {
            addr,
            checklist,
            gemini,
        } => {
            let analyzer = Analyzer::new(
                AnalyzerConfig::new(checklist.load()?),
                Arc::new(gemini.client()?),
            );
            clausewise_host::server::serve(addr, Arc::new(analyzer)).await
        }
        Command::Upload { file, url, json } => {
            let result = UploadClient::new(url).upload(&file).await?;
            print_result(&result, json)
        }
        Command::Checklist { checklist } => {
            print!("{}", display::format_checklist(&checklist.load()?));
            Ok(())
        }
    }
}

async fn analyze(
    analyzer: &Analyzer,
    file: &Path,
    today: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.pdf");
    let today = today.unwrap_or_else(|| Utc::now().date_naive());

    match analyzer.handle_on(bytes, filename, today).await {
        Ok(result) => print_result(&result, json),
        Err(e) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&e.envelope())?);
            }
            Err(e.into())
        }
    }
}

fn print_result(result: &AnalysisResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", display::format_result(result));
    }
    Ok(())
}
