// System status display: item table, store artifact, manifest freshness.

use colored::Colorize;

use crate::config::Config;
use crate::items::loader;
use crate::store::SimilarityStore;

/// Display system status to the terminal.
pub fn show(config: &Config) {
    // Item table
    let loaded = loader::resolve_items_path(&config.items_path, config.sample_items_path.as_deref())
        .and_then(|path| loader::read_table(path).map(|table| (path, table)));
    let table = match loaded {
        Ok((path, table)) => {
            let sample_note = if path == config.items_path.as_path() {
                String::new()
            } else {
                format!(" {}", "(sample fallback)".yellow())
            };
            println!(
                "Item table: {} ({} movies){}",
                path.display(),
                table.len(),
                sample_note
            );
            Some(table)
        }
        Err(e) => {
            println!("Item table: {}", "unavailable".red());
            println!("  {e}");
            None
        }
    };

    // Store artifact
    let store = SimilarityStore::new(config.store());
    if !store.exists() {
        println!("Similarity store: not built yet");
        println!("  Run `cinesim build` to create it");
        return;
    }

    let file_size = std::fs::metadata(store.path())
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Similarity store: {} ({})", store.path().display(), file_size);

    match store.manifest() {
        Some(manifest) => {
            println!(
                "  Built {} for {} movies, {} terms",
                manifest.built_at.format("%Y-%m-%d %H:%M UTC"),
                manifest.item_count,
                manifest.vocabulary_size
            );
            if let Some(table) = &table {
                if table.fingerprint() == manifest.fingerprint {
                    println!("  {}", "Up to date with the item table".green());
                } else {
                    println!(
                        "  {} Run `cinesim build` to rebuild it",
                        "Stale:".yellow()
                    );
                }
            }
        }
        None => {
            println!("  {}", "No manifest; freshness checked by size only".dimmed());
        }
    }
}

/// Artifact sizes grow with N², so large tables reach gigabytes.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
