//! Garment Sizes
//!
//! Canonical size ordering used to sort size breakdowns. Labels are kept exactly as recorded;
//! only ranking is case-insensitive.

use std::cmp::Ordering;

/// Label used for roster entries with no recorded size.
pub const UNKNOWN_SIZE: &str = "N/A";

/// Canonical sizes, smallest first. Aliases share a rank.
const CANONICAL_SIZES: &[(&str, u8)] = &[
    ("YXS", 0),
    ("YS", 1),
    ("YM", 2),
    ("YL", 3),
    ("YXL", 4),
    ("XXS", 5),
    ("2XS", 5),
    ("XS", 6),
    ("S", 7),
    ("M", 8),
    ("L", 9),
    ("XL", 10),
    ("XXL", 11),
    ("2XL", 11),
    ("XXXL", 12),
    ("3XL", 12),
    ("XXXXL", 13),
    ("4XL", 13),
];

/// Position of a size in the canonical table, or `None` for sizes outside it.
pub fn size_rank(label: &str) -> Option<u8> {
    let label = label.trim();

    CANONICAL_SIZES
        .iter()
        .find(|(size, _)| size.eq_ignore_ascii_case(label))
        .map(|&(_, rank)| rank)
}

/// Collapse a missing or blank size into [`UNKNOWN_SIZE`].
pub fn normalize_size(size: Option<&str>) -> String {
    match size.map(str::trim) {
        Some(size) if !size.is_empty() => size.to_string(),
        _ => UNKNOWN_SIZE.to_string(),
    }
}

/// Compare two size labels.
///
/// Canonical sizes sort by rank and always before unknown sizes; unknown sizes (including
/// [`UNKNOWN_SIZE`]) sort alphabetically among themselves.
pub fn compare_sizes(a: &str, b: &str) -> Ordering {
    match (size_rank(a), size_rank(b)) {
        (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
