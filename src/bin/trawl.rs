//! CLI binary for trawl.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trawl::{
    AggregationSession, Aggregator, CrawlSummary, ImageDescriptor, Provider, ProgressReporter,
    TrawlConfig,
};

/// trawl: search many providers at once, then crawl the best results for images.
#[derive(Parser)]
#[command(name = "trawl", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search every configured provider and print the ranked results.
    Search {
        /// Query text.
        #[arg(required = true)]
        query: Vec<String>,

        /// Crawl allow-listed results for images after ranking.
        #[arg(long)]
        images: bool,

        /// Print machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List bundled providers with their score bands.
    Providers,

    /// Write the default configuration file.
    InitConfig {
        /// Destination (defaults to the platform config directory).
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep HTTP internals quiet unless RUST_LOG asks for them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("trawl=info,trawl_search=info,reqwest=warn,hyper=warn")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            query,
            images,
            json,
        } => {
            let config = TrawlConfig::load(cli.config.as_deref())?;
            run_search(config, &query.join(" "), images, json).await
        }
        Command::Providers => {
            list_providers();
            Ok(())
        }
        Command::InitConfig { path } => init_config(path.or(cli.config)),
    }
}

async fn run_search(
    config: TrawlConfig,
    query: &str,
    with_images: bool,
    json: bool,
) -> anyhow::Result<()> {
    let aggregator = Aggregator::from_config(config)?;
    let Some(mut session) = aggregator.submit(query).await? else {
        println!("Nothing to search for.");
        return Ok(());
    };

    if !json {
        print_results(&session);
    }

    let mut summary = None;
    if with_images {
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("  {msg} [{bar:30}] {pos}/{len}") {
            pb.set_style(style);
        }
        if json {
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }

        let progress_bar = pb.clone();
        let reporter = ProgressReporter::new(
            Box::new(move |progress| {
                progress_bar.set_length(progress.total as u64);
                progress_bar.set_position(progress.done as u64);
                progress_bar.set_message(progress.current_label);
            }),
            Box::new(move |_| pb.finish_and_clear()),
        );

        let images = aggregator.crawl_images(&mut session, &reporter).await?;
        let result = CrawlSummary::from_images(images);
        if !json {
            print_images(images);
            println!("{}", result.label());
        }
        summary = Some(result);
    }

    if json {
        let output = serde_json::json!({
            "query": session.query(),
            "results": session.ranked_results(),
            "images": session.crawled_images(),
            "status": summary.map(|s| s.label()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn print_results(session: &AggregationSession) {
    if session.ranked_results().is_empty() {
        println!("No results for \"{}\".", session.query());
        return;
    }
    for (i, result) in session.ranked_results().iter().enumerate() {
        println!(
            "{:>2}. {} {} [{}]",
            i + 1,
            result.icon_tag,
            result.title,
            result.score
        );
        println!("    {}", result.url);
        if !result.description.is_empty() {
            println!("    {}", result.description);
        }
    }
}

fn print_images(images: &[ImageDescriptor]) {
    for image in images {
        println!("{} {}  ({})", image.icon_tag, image.url, image.source_url);
    }
}

fn list_providers() {
    for provider in Provider::all() {
        let band = match provider {
            Provider::DuckDuckGo => "10/9/8".to_owned(),
            other => other.base_score().to_string(),
        };
        println!(
            "{} {:<14} {:<20} score {}",
            provider.icon_tag(),
            provider.name(),
            provider.engine_label(),
            band
        );
    }
}

fn init_config(path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(TrawlConfig::default_config_path);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    TrawlConfig::default().save_to_file(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
