use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use parlacorpus::{
    AssembleConfig, BundestagClient, DataLayout, HttpConfig, Language, LinkCollectorConfig,
    PoliticianName, SpeechCrawlConfig, clean_directory, execute_assembly,
    execute_link_collection, execute_speech_crawl,
};

#[derive(Parser)]
#[command(name = "parlacorpus")]
#[command(author, version, about = "Parliamentary speech corpus builder", long_about = None)]
struct Cli {
    /// Root directory for link lists, raw inputs and corpus files
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect links to all plenary protocols of the current period
    Links {
        /// Listing endpoint (defaults to PARLACORPUS_LISTING_URL or the open-data listing)
        #[arg(long)]
        listing_url: Option<String>,

        /// Links requested per listing page
        #[arg(long, default_value = "10")]
        page_size: usize,
    },

    /// Extract a politician's speeches from every collected protocol
    Speeches {
        /// Full name, e.g. "Angela Merkel"
        politician: PoliticianName,
    },

    /// Strip timestamp lines from every subtitle file in a directory
    Clean {
        /// Directory of raw subtitle files
        directory: PathBuf,
    },

    /// Build training and validation files for a politician
    Assemble {
        /// Full name, e.g. "Christian Lindner"
        politician: PoliticianName,

        /// Maximum characters per speech sample
        #[arg(long, default_value = "250")]
        max_chars: usize,

        /// Fraction of samples used for training
        #[arg(long, default_value = "0.8")]
        train_split: f64,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Sentence splitting language for speeches
        #[arg(long, value_enum, default_value_t = Language::German)]
        language: Language,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let layout = DataLayout::new(cli.data_dir);

    match cli.command {
        Commands::Links {
            listing_url,
            page_size,
        } => collect_links(&layout, listing_url, page_size).await,
        Commands::Speeches { politician } => crawl_speeches(&layout, &politician).await,
        Commands::Clean { directory } => {
            info!("Cleaning subtitle files in {:?}", directory);
            clean_directory(&directory)?;
            Ok(())
        }
        Commands::Assemble {
            politician,
            max_chars,
            train_split,
            seed,
            language,
        } => {
            let config = AssembleConfig {
                max_chars_per_sample: max_chars,
                train_split,
                seed,
                language,
            };
            let result = execute_assembly(&politician, &layout, &config)
                .with_context(|| format!("Failed to assemble corpus for {politician}"))?;

            info!("Training data written to {:?}", result.training_path);
            info!("Validation data written to {:?}", result.validation_path);
            if result.dropped_utterances > 0 {
                info!(
                    "{} unterminated utterances were dropped",
                    result.dropped_utterances
                );
            }
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn collect_links(
    layout: &DataLayout,
    listing_url: Option<String>,
    page_size: usize,
) -> Result<()> {
    if page_size == 0 {
        anyhow::bail!("page size must be at least 1");
    }

    let mut http_config = HttpConfig::from_env();
    if let Some(url) = listing_url {
        http_config.listing_url = url;
    }
    http_config.page_size = page_size;

    let config = LinkCollectorConfig {
        offset_step: page_size,
        ..Default::default()
    };

    let client = BundestagClient::new(http_config)?;
    let links_path = layout.links_file();

    info!("Collecting protocol links into {:?}", links_path);
    execute_link_collection(&client, &config, &links_path).await?;
    Ok(())
}

async fn crawl_speeches(layout: &DataLayout, politician: &PoliticianName) -> Result<()> {
    let client = BundestagClient::new(HttpConfig::from_env())?;
    let config = SpeechCrawlConfig {
        links_path: layout.links_file(),
        output_path: layout.speech_collection(politician),
    };

    info!("Writing speeches to {:?}", config.output_path);
    execute_speech_crawl(&client, politician, &config).await?;
    Ok(())
}
