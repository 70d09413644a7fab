// Output formatting: terminal display of recommendations and builds.

pub mod terminal;

// Longest prefix that still leaves room for the ellipsis.
fn fit_column(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        None => text,
        Some(_) => {
            let keep = width.saturating_sub(1);
            let end = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
            &text[..end]
        }
    }
}

/// Fit `text` into a column `width` characters wide. Longer text is cut on
/// a character boundary and ends in "…", so the result never exceeds
/// `width` characters (titles are often non-ASCII).
pub fn column_text(text: &str, width: usize) -> String {
    let fitted = fit_column(text, width);
    if fitted.len() == text.len() {
        text.to_string()
    } else {
        format!("{fitted}…")
    }
}
