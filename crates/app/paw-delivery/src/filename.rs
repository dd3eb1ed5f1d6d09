//! Download filename derivation.

const MAX_STEM_CHARS: usize = 50;

/// Derive a filesystem-safe filename from a book title.
///
/// Characters outside `[A-Za-z0-9 _-]` are stripped, whitespace runs
/// collapse to single underscores, the stem is truncated to 50 characters,
/// and `_{book_id}.pdf` is appended.
pub fn generate_filename(title: &str, book_id: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let stem: String = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_STEM_CHARS)
        .collect();
    format!("{stem}_{book_id}.pdf")
}
