//! Column type inference: candidate counting and threshold-based decision.
//!
//! Each column is classified independently from its cleaned cell values.
//! Candidate counts are tallied per type (a value may match several
//! candidates), then resolved in a fixed priority order. A candidate only
//! wins when its count reaches the configured threshold *and* every
//! non-blank value matched it; a single stray value pushes the column back
//! to text rather than silently losing data to a narrower type.

use std::fmt;

use crate::value::{RawValue, parse_naive_date, parse_naive_datetime};

pub const DEFAULT_THRESHOLD: usize = 500;
pub const NVARCHAR_MAX_LENGTH: usize = 255;

/// Text length assigned to a column whose cells are all empty.
const EMPTY_COLUMN_TEXT_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Int,
    Bit,
    Float,
    DateTime,
    Nvarchar(usize),
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Int => write!(f, "INT"),
            SqlType::Bit => write!(f, "BIT"),
            SqlType::Float => write!(f, "FLOAT"),
            SqlType::DateTime => write!(f, "DATETIME"),
            SqlType::Nvarchar(len) => write!(f, "NVARCHAR({len})"),
        }
    }
}

#[derive(Debug, Default)]
struct TypeCandidate {
    non_blank: usize,
    integer_matches: usize,
    float_matches: usize,
    datetime_matches: usize,
    boolean_matches: usize,
    max_char_len: usize,
}

impl TypeCandidate {
    fn update(&mut self, value: &str) {
        self.non_blank += 1;
        self.max_char_len = self.max_char_len.max(value.chars().count());

        if is_integer_literal(value) {
            self.integer_matches += 1;
        }
        if is_float_literal(value) {
            self.float_matches += 1;
        }
        if is_datetime_literal(value) {
            self.datetime_matches += 1;
        }
        if is_boolean_token(value) {
            self.boolean_matches += 1;
        }
    }

    /// A candidate qualifies only when it reaches the threshold and covers
    /// every non-blank value.
    fn qualifies(&self, matches: usize, threshold: usize) -> bool {
        matches >= threshold && matches == self.non_blank
    }

    fn decide(&self, threshold: usize) -> SqlType {
        if self.qualifies(self.integer_matches, threshold) {
            SqlType::Int
        } else if self.qualifies(self.boolean_matches, threshold) {
            SqlType::Bit
        } else if self.qualifies(self.float_matches, threshold) {
            SqlType::Float
        } else if self.qualifies(self.datetime_matches, threshold) {
            SqlType::DateTime
        } else {
            SqlType::Nvarchar(self.max_char_len.clamp(1, NVARCHAR_MAX_LENGTH))
        }
    }
}

/// Optional leading `-` followed by one or more ASCII digits, nothing else.
fn is_integer_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional leading `-`, digits, a literal `.`, digits, nothing else.
fn is_float_literal(value: &str) -> bool {
    let body = value.strip_prefix('-').unwrap_or(value);
    match body.split_once('.') {
        Some((int_part, frac_part)) => {
            !int_part.is_empty()
                && !frac_part.is_empty()
                && int_part.bytes().all(|b| b.is_ascii_digit())
                && frac_part.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn is_datetime_literal(value: &str) -> bool {
    parse_naive_date(value).is_ok() || parse_naive_datetime(value).is_ok()
}

fn is_boolean_token(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "0" | "1"
    )
}

/// Infers the SQL type for one column. Never fails: anything that does not
/// classify cleanly falls through to `NVARCHAR`.
pub fn infer(column_name: &str, values: &[RawValue], threshold: usize) -> SqlType {
    let mut candidate = TypeCandidate::default();
    for value in values {
        let Some(text) = value.to_text() else {
            continue;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        candidate.update(trimmed);
    }

    if candidate.non_blank == 0 {
        return empty_column_fallback(column_name);
    }

    candidate.decide(threshold)
}

/// A column with no usable values is typed from its name alone: names that
/// mention dates get `DATETIME`, everything else a fixed-width text column.
fn empty_column_fallback(column_name: &str) -> SqlType {
    let lowered = column_name.to_ascii_lowercase();
    if lowered.contains("data") || lowered.contains("date") {
        SqlType::DateTime
    } else {
        SqlType::Nvarchar(EMPTY_COLUMN_TEXT_LENGTH)
    }
}
