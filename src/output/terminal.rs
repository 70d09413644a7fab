// Colored terminal output for recommendations, catalogues and builds.
//
// main.rs delegates all formatting here so the command handlers stay
// focused on orchestration.

use colored::Colorize;

use crate::engine::MatrixSource;
use crate::items::Item;
use crate::recommend::filter::Catalogue;
use crate::recommend::Recommendation;

/// Display a filtered, ranked recommendation list.
pub fn display_recommendations(
    query: &str,
    shown: &[(&Recommendation, &Item)],
    requested: usize,
    ranked: usize,
) {
    println!(
        "\n{}",
        format!("=== Movies similar to \"{}\" ===", super::column_text(query, 60)).bold()
    );
    println!();

    if shown.is_empty() {
        println!("  No movies match the selected filters.");
        if ranked == 0 {
            println!(
                "  {}",
                "The title was not found in the item table.".dimmed()
            );
        }
        return;
    }

    println!(
        "  {:>4}  {:<48} {:>6}  {:>5}",
        "Rank".dimmed(),
        "Title".dimmed(),
        "Year".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(68).dimmed());

    for (i, (rec, item)) in shown.iter().enumerate() {
        let year = if item.release_year > 0 {
            item.release_year.to_string()
        } else {
            "?".to_string()
        };
        println!(
            "  {:>4}. {:<48} {:>6}  {}",
            i + 1,
            super::column_text(&item.title, 48),
            year,
            colorize_score(rec.score),
        );
    }

    println!();
    println!(
        "  {}",
        format!("{ranked} of {requested} requested candidates ranked, {} shown after filters", shown.len())
            .dimmed()
    );
}

/// Display the genres and ranges a table can be filtered by.
pub fn display_catalogue(catalogue: &Catalogue, items: usize) {
    println!(
        "\n{}",
        format!("=== Filters ({items} movies) ===").bold()
    );
    println!();

    match catalogue.year_bounds {
        Some((lo, hi)) => println!("  Release years: {lo} - {hi}"),
        None => println!("  Release years: {}", "unknown".dimmed()),
    }
    match catalogue.popularity_bounds {
        Some((lo, hi)) => println!("  Popularity:    {lo:.1} - {hi:.1}"),
        None => println!("  Popularity:    {}", "unknown".dimmed()),
    }

    if catalogue.genres.is_empty() {
        println!("  Genres:        {}", "none".dimmed());
    } else {
        println!("  Genres ({}):", catalogue.genres.len());
        for chunk in catalogue.genres.chunks(6) {
            println!("    {}", chunk.join(", "));
        }
    }
    println!();
}

/// One-line summary after load-or-build.
pub fn display_build_summary(items: usize, source: MatrixSource, store_path: &str) {
    let how = match source {
        MatrixSource::Cache => "reused from memory".normal(),
        MatrixSource::Store => "loaded from store".green(),
        MatrixSource::Built => "built and saved".bright_yellow(),
    };
    println!(
        "Similarity matrix for {} movies {} ({})",
        items,
        how,
        store_path.dimmed()
    );
}

/// Colorize a similarity score by strength.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.3}");
    if score >= 0.5 {
        text.bright_green()
    } else if score >= 0.2 {
        text.bright_yellow()
    } else if score > 0.0 {
        text.normal()
    } else {
        text.dimmed()
    }
}
