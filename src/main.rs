use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use netmapper::insights::{generate_insights, GeminiClient, PromptOptions};
use netmapper::render::{Details, Outline, Overview, EMPTY_NETWORK, OVERVIEW_TOP};
use netmapper::settings::Settings;
use netmapper::{TokenizerPolicy, Workspace};

#[derive(Parser)]
#[command(name = "netmapper", about = "Map a contacts export by company")]
struct Cli {
    /// Optional TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Row tokenizer (overrides settings)
    #[arg(long, global = true, value_enum)]
    tokenizer: Option<TokenizerPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals and the largest companies
    Stats {
        file: PathBuf,
        /// Companies to list
        #[arg(short = 'n', long, default_value_t = OVERVIEW_TOP)]
        top: usize,
    },
    /// Company tree as an outline or JSON
    Tree {
        file: PathBuf,
        /// Company branches to keep (overrides settings)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Print JSON instead of an outline
        #[arg(long)]
        json: bool,
    },
    /// Details for one company or contact
    Show {
        file: PathBuf,
        /// Exact company name
        company: String,
        /// Contact display name ("First Last")
        contact: Option<String>,
    },
    /// Ask the text generation service about the network
    Insights { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(policy) = cli.tokenizer {
        settings.tokenizer = policy;
    }

    match cli.command {
        Commands::Stats { file, top } => {
            let mut workspace = Workspace::new(settings.pipeline());
            let network = workspace.load(&read_input(&file)?);
            if network.is_empty() {
                println!("{}", EMPTY_NETWORK);
                return Ok(());
            }
            print!(
                "{}",
                Overview {
                    summary: &network.summary,
                    top
                }
            );
        }
        Commands::Tree { file, limit, json } => {
            if let Some(n) = limit {
                settings.tree_limit = n;
            }
            let mut workspace = Workspace::new(settings.pipeline());
            let network = workspace.load(&read_input(&file)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&network.tree)?);
            } else if network.is_empty() {
                println!("{}", EMPTY_NETWORK);
            } else {
                print!("{}", Outline(&network.tree));
            }
        }
        Commands::Show {
            file,
            company,
            contact,
        } => {
            let mut workspace = Workspace::new(settings.pipeline());
            let network = workspace.load(&read_input(&file)?);
            let node = match &contact {
                Some(name) => network.tree.find_contact(&company, name),
                None => network.tree.find_company(&company),
            };
            let Some(node) = node else {
                bail!(
                    "No node named {:?} in the top {} companies",
                    contact.as_deref().unwrap_or(&company),
                    settings.tree_limit
                );
            };
            print!("{}", Details(node));
        }
        Commands::Insights { file } => {
            let mut workspace = Workspace::new(settings.pipeline());
            let network = workspace.load(&read_input(&file)?);
            if network.is_empty() {
                println!("{}", EMPTY_NETWORK);
                return Ok(());
            }
            let client = GeminiClient::from_settings(&settings.insights)?;
            let opts = PromptOptions::from(&settings.insights);
            let text = generate_insights(&client, &network.connections, &opts).await;
            workspace.set_insights(text);
            println!("{}", workspace.insights().unwrap_or_default());
        }
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "Done");
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
