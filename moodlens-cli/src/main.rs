use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use moodlens::export::{self, Export};
use moodlens::{AnalysisApi, ClientConfig, ServiceClient, Session};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod http;
mod output;
mod storage;

use http::ReqwestTransport;
use storage::FileStorage;

type CliSession = Session<ServiceClient<ReqwestTransport>, FileStorage>;

#[derive(Parser, Debug)]
#[command(name = "moodlens")]
#[command(
    author,
    version,
    about = "Sentiment, emotion and aspect analysis from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Base URL of the analysis service (overrides config and MOODLENS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory holding history and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct TextInput {
    /// Text to analyze (words are joined with spaces)
    text: Vec<String>,

    /// Read the text from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl TextInput {
    fn read(&self) -> Result<String> {
        match self.file {
            Some(ref path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            None => Ok(self.text.join(" ")),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sentiment, emotion, aspects and insights for a text
    ///
    /// Several texts may be separated by ';', ',' or newlines; only the first
    /// is analyzed.
    Analyze(TextInput),

    /// Sentiment only
    Sentiment(TextInput),

    /// Emotion only
    Emotion(TextInput),

    /// Aspect-level sentiment only
    Aspects(TextInput),

    /// Analyze up to 50 texts in one request
    Bulk {
        /// Texts to analyze
        texts: Vec<String>,

        /// Read one text per line from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Also save the results as JSON
        #[arg(long = "export")]
        save: bool,

        /// Output directory for --export
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Fetch a web page through the service and analyze its text
    Url {
        /// http(s) URL of the page
        url: String,
    },

    /// Show or edit stored history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Summary statistics over stored history
    Stats,

    /// Save results as JSON files
    Export {
        #[command(subcommand)]
        target: ExportTarget,

        /// Output directory (defaults to config output_dir, then the current directory)
        #[arg(short, long, global = true)]
        output_dir: Option<PathBuf>,
    },

    /// List sample texts, or print one by name
    Examples {
        /// Sample label (positive, negative, neutral, mixed) or scenario
        name: Option<String>,
    },

    /// Show or initialize the config file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List entries, newest first
    List,
    /// Remove an entry by id
    Remove { id: String },
    /// Delete all entries
    Clear,
}

#[derive(Subcommand, Debug)]
enum ExportTarget {
    /// Analyze a text and save its sentiment result
    #[command(name = "result")]
    SingleResult(TextInput),
    /// Save the full history
    History,
    /// Save the SDG impact report built from history
    Report {
        /// Analyze this text first and lead the report with it
        #[arg(long)]
        text: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with the effective settings
    Init,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "moodlens=debug,moodlens_cli=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(args: &GlobalArgs) -> Result<ClientConfig> {
    let mut config = match args.config {
        Some(ref path) => config::load_config_from(path)?
            .with_env_override(std::env::var(moodlens::config::API_URL_ENV).ok())?,
        None => config::load_config()?,
    };
    if let Some(ref url) = args.api_url {
        config = config.with_api_url(url.clone())?;
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(secs)?;
    }
    if let Some(ref dir) = args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    Ok(config)
}

fn open_session(config: &ClientConfig) -> Result<CliSession> {
    let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))
        .context("Failed to create HTTP client")?;
    let client = ServiceClient::new(config.api_url.clone(), transport);

    let data_dir = match config.data_dir {
        Some(ref dir) => dir.clone(),
        None => config::default_data_dir()?,
    };
    debug!("History stored in {}", data_dir.display());

    Ok(Session::new(client, FileStorage::new(data_dir), now_ms))
}

fn write_export(export: &Export, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(&export.filename);
    std::fs::write(&path, &export.contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_text(input: &TextInput) -> Result<String> {
    let text = input.read()?;
    if text.trim().is_empty() {
        return Err(anyhow!(moodlens::analyze::EMPTY_INPUT_MESSAGE));
    }
    Ok(text.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let config = resolve_config(&cli.global)?;
    info!(api_url = %config.api_url, timeout_secs = config.timeout_secs, "Using analysis service");

    let json = cli.global.json;
    let output_dir_or = |dir: Option<PathBuf>| -> PathBuf {
        dir.or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    };

    match cli.command {
        Commands::Analyze(input) => {
            let mut session = open_session(&config)?;
            let analysis = session.analyze(&input.read()?).await?;
            if json {
                print_json(&analysis)?;
            } else {
                print!("{}", output::comprehensive(&analysis));
            }
        }

        Commands::Sentiment(input) => {
            let mut session = open_session(&config)?;
            let result = session.analyze_sentiment(&input.read()?).await?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", output::sentiment(&result));
            }
        }

        Commands::Emotion(input) => {
            let text = require_text(&input)?;
            let session = open_session(&config)?;
            let result = session.api().analyze_emotion(&text).await?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", output::emotion(&result));
            }
        }

        Commands::Aspects(input) => {
            let text = require_text(&input)?;
            let session = open_session(&config)?;
            let result = session.api().analyze_aspects(&text).await?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", output::aspects(&result));
            }
        }

        Commands::Bulk {
            mut texts,
            file,
            save,
            output_dir,
        } => {
            if let Some(path) = file {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                texts.extend(contents.lines().map(str::to_string));
            }

            let session = open_session(&config)?;
            let result = session.analyze_bulk(&texts).await?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", output::bulk(&result));
            }

            if save {
                let export = export::export_batch(&result.results, now_ms())?;
                let path = write_export(&export, &output_dir_or(output_dir))?;
                eprintln!("Saved {}", path.display());
            }
        }

        Commands::Url { url } => {
            let mut session = open_session(&config)?;
            let analysis = session.analyze_url(&url).await?;
            if json {
                print_json(&analysis)?;
            } else {
                print!("{}", output::comprehensive(&analysis));
            }
        }

        Commands::History { action } => {
            let mut session = open_session(&config)?;
            match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => {
                    let items = session.history().get_all();
                    if json {
                        print_json(&items)?;
                    } else {
                        print!("{}", output::history(&items));
                    }
                }
                HistoryAction::Remove { id } => {
                    let before = session.history().len();
                    session.history_mut().remove_by_id(&id)?;
                    let removed = before - session.history().len();
                    if removed == 0 {
                        return Err(anyhow!("No history entry with id {}", id));
                    }
                    eprintln!("Removed {}", id);
                }
                HistoryAction::Clear => {
                    session.history_mut().clear()?;
                    eprintln!("History cleared");
                }
            }
        }

        Commands::Stats => {
            let session = open_session(&config)?;
            let items = session.history().get_all();
            if json {
                print_json(&moodlens::HistoryStats::from_items(&items))?;
            } else {
                print!("{}", output::stats(&items));
            }
        }

        Commands::Export { target, output_dir } => {
            let dir = output_dir_or(output_dir);
            let mut session = open_session(&config)?;

            let export = match target {
                ExportTarget::SingleResult(input) => {
                    let text = input.read()?;
                    let result = session.analyze_sentiment(&text).await?;
                    export::export_result(text.trim(), &result, now_ms())?
                }
                ExportTarget::History => export::export_history(&session.history().get_all(), now_ms())?,
                ExportTarget::Report { text } => {
                    let current = match text {
                        Some(text) => Some(session.analyze(&text).await?),
                        None => None,
                    };
                    let history = session.history().get_all();
                    let history = export::history_without(current.as_ref(), &history);
                    export::export_impact_report(current.as_ref(), history, now_ms())?
                }
            };

            let path = write_export(&export, &dir)?;
            println!("{}", path.display());
        }

        Commands::Examples { name } => match name {
            Some(name) => {
                let text = moodlens::samples::find(&name)
                    .ok_or_else(|| anyhow!("Unknown example '{}'", name))?;
                println!("{}", text);
            }
            None => print!("{}", output::examples()),
        },

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => print!("{}", config.to_yaml_string()?),
            ConfigAction::Path => println!("{}", config::config_path()?.display()),
            ConfigAction::Init => {
                let path = match cli.global.config {
                    Some(ref path) => {
                        config::save_config_to(&config, path)?;
                        path.clone()
                    }
                    None => config::save_config(&config)?,
                };
                eprintln!("Wrote {}", path.display());
            }
        },
    }

    Ok(())
}
