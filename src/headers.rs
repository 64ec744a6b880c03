//! Header normalization: unique display names and SQL-safe identifiers.
//!
//! Raw headers arrive as they appear in the source, which means they can be
//! blank, padded with whitespace, or duplicated. [`normalize`] produces a
//! stable sequence of unique display names and reports which base names had
//! to be renamed; [`sanitize_unique`] turns those names into bracket-safe
//! SQL identifiers, re-running the same suffixing so sanitization itself
//! cannot reintroduce duplicates.

use std::collections::{BTreeSet, HashSet};

pub const UNNAMED_COLUMN: &str = "UnnamedColumn";

#[derive(Debug, Clone)]
pub struct NormalizedHeaders {
    /// Final display names, one per input header, in source order.
    pub names: Vec<String>,
    /// Base names that collided and were renamed with a numeric suffix.
    pub collisions: BTreeSet<String>,
}

/// Produces unique, non-blank display names from the raw header sequence.
///
/// Blank or absent headers become [`UNNAMED_COLUMN`]; a name already taken
/// gets `_2`, `_3`, ... appended until unused. Output length and order always
/// match the input. Collisions are surfaced for a warning, never an error.
pub fn normalize<'a, I>(raw: I) -> NormalizedHeaders
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut names = Vec::new();
    let mut taken = HashSet::new();
    let mut collisions = BTreeSet::new();

    for header in raw {
        let trimmed = header.map(str::trim).unwrap_or("");
        let candidate = if trimmed.is_empty() {
            UNNAMED_COLUMN.to_string()
        } else {
            trimmed.to_string()
        };

        let unique = if taken.contains(&candidate) {
            collisions.insert(candidate.clone());
            next_free_name(&candidate, &taken)
        } else {
            candidate
        };

        taken.insert(unique.clone());
        names.push(unique);
    }

    NormalizedHeaders { names, collisions }
}

fn next_free_name(base: &str, taken: &HashSet<String>) -> String {
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Replaces every character outside `[A-Za-z0-9_]` with an underscore.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect()
}

/// Sanitizes each display name into a SQL identifier, deduplicating again
/// because distinct names can collapse to the same identifier (`A/B` and
/// `A B` both sanitize to `A_B`).
pub fn sanitize_unique(names: &[String]) -> Vec<String> {
    let mut identifiers = Vec::with_capacity(names.len());
    let mut taken = HashSet::new();

    for name in names {
        let sanitized = sanitize_identifier(name);
        let unique = if taken.contains(&sanitized) {
            next_free_name(&sanitized, &taken)
        } else {
            sanitized
        };
        taken.insert(unique.clone());
        identifiers.push(unique);
    }

    identifiers
}
