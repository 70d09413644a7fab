use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cinesim::config::Config;
use cinesim::engine::SimilarityEngine;
use cinesim::items::{loader, ItemTable};
use cinesim::recommend::filter::{Catalogue, RecommendationFilter};

/// Cinesim: content-based movie recommendations.
///
/// Compares movies by the text of their overview, genres, keywords, cast
/// and director, and suggests the closest matches to a movie you like.
#[derive(Parser)]
#[command(name = "cinesim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build (or reuse) the similarity matrix for the item table
    Build {
        /// Ignore the saved store and rebuild from scratch
        #[arg(long)]
        refresh: bool,
    },

    /// Recommend movies similar to a title
    Recommend {
        /// Exact title of a movie you like
        title: String,

        /// Candidates to rank before filtering (default: 50)
        #[arg(long, default_value = "50")]
        top_n: usize,

        /// Max movies to display after filtering (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Only keep movies in any of these genres (repeatable)
        #[arg(long = "genre")]
        genres: Vec<String>,

        /// Earliest release year
        #[arg(long)]
        min_year: Option<i32>,

        /// Latest release year
        #[arg(long)]
        max_year: Option<i32>,

        /// Minimum popularity
        #[arg(long)]
        min_popularity: Option<f64>,

        /// Maximum popularity
        #[arg(long)]
        max_popularity: Option<f64>,
    },

    /// Show the genres, years and popularity range available for filtering
    Filters,

    /// Show system status (item table, store age and freshness)
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinesim=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Build { refresh } => {
            let table = load_table(&config)?;
            let mut engine = SimilarityEngine::new(config.store(), config.threads);

            println!("Preparing similarity matrix for {} movies...", table.len());
            let (matrix, source) = load_or_build(&mut engine, &table, refresh)?;

            cinesim::output::terminal::display_build_summary(
                matrix.len(),
                source,
                &config.store_path.display().to_string(),
            );
        }

        Commands::Recommend {
            title,
            top_n,
            limit,
            genres,
            min_year,
            max_year,
            min_popularity,
            max_popularity,
        } => {
            let table = load_table(&config)?;
            let mut engine = SimilarityEngine::new(config.store(), config.threads);
            let (matrix, _) = load_or_build(&mut engine, &table, false)?;

            let ranked = cinesim::recommend::recommend_scored(&title, &table, &matrix, top_n);
            info!(title = %title, ranked = ranked.len(), "Ranked recommendations");

            let filter = RecommendationFilter {
                genres,
                year_range: range(min_year, max_year, i32::MIN, i32::MAX),
                popularity_range: range(min_popularity, max_popularity, f64::MIN, f64::MAX),
            };
            let mut shown = filter.apply_scored(&ranked, &table);
            shown.truncate(limit);

            cinesim::output::terminal::display_recommendations(&title, &shown, top_n, ranked.len());
        }

        Commands::Filters => {
            let table = load_table(&config)?;
            let catalogue = Catalogue::from_table(&table);
            cinesim::output::terminal::display_catalogue(&catalogue, table.len());
        }

        Commands::Status => {
            cinesim::status::show(&config);
        }
    }

    Ok(())
}

/// Load the configured item table, with a hint when it's missing.
fn load_table(config: &Config) -> Result<ItemTable> {
    loader::load_items(&config.items_path, config.sample_items_path.as_deref()).context(
        "Could not load movies. Set CINESIM_ITEMS_PATH (or CINESIM_SAMPLE_ITEMS_PATH) \
         to a JSON array of {id, title, combined_features} records.",
    )
}

/// Run load-or-build with a progress bar over similarity rows.
fn load_or_build(
    engine: &mut SimilarityEngine,
    table: &ItemTable,
    refresh: bool,
) -> Result<(
    std::sync::Arc<cinesim::similarity::SimilarityMatrix>,
    cinesim::engine::MatrixSource,
)> {
    let pb = ProgressBar::new(table.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  [{bar:40.cyan/blue}] {pos}/{len} rows ({eta})")
            .expect("valid template")
            .progress_chars("=> "),
    );

    let result = engine.load_or_build(table, refresh, Some(&pb));
    pb.finish_and_clear();

    let (matrix, source) = result?;
    if matrix.is_empty() {
        println!("{}", "Warning: the item table is empty.".yellow());
    }
    Ok((matrix, source))
}

/// Inclusive range from optional bounds; `None` when neither bound is set.
fn range<T: Copy>(min: Option<T>, max: Option<T>, lowest: T, highest: T) -> Option<(T, T)> {
    if min.is_none() && max.is_none() {
        None
    } else {
        Some((min.unwrap_or(lowest), max.unwrap_or(highest)))
    }
}
