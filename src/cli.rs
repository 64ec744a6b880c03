use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;

use crate::infer::DEFAULT_THRESHOLD;

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate CREATE TABLE statements from tabular data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer column types from a dataset and emit a CREATE TABLE statement
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Input file (CSV, TSV, or JSON array of objects); '-' reads from stdin
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination .sql file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Table name for the CREATE TABLE statement (defaults to the input file stem)
    #[arg(short = 't', long = "table")]
    pub table: Option<String>,
    /// Minimum matching values required to classify a column as a non-text type
    #[arg(long, default_value_t = DEFAULT_THRESHOLD.to_string())]
    pub threshold: String,
    /// Input format (inferred from the file extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<SourceFormat>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum SourceFormat {
    Csv,
    Json,
}

/// Resolves the threshold argument, falling back to the default when the
/// value is not a positive integer. Bad input is a warning, not an error.
pub fn resolve_threshold(raw: &str) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            warn!("Invalid threshold '{raw}'; using default {DEFAULT_THRESHOLD}");
            DEFAULT_THRESHOLD
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_threshold_accepts_positive_integers() {
        assert_eq!(resolve_threshold("2"), 2);
        assert_eq!(resolve_threshold(" 500 "), 500);
    }

    #[test]
    fn resolve_threshold_falls_back_on_bad_input() {
        assert_eq!(resolve_threshold("abc"), DEFAULT_THRESHOLD);
        assert_eq!(resolve_threshold("0"), DEFAULT_THRESHOLD);
        assert_eq!(resolve_threshold("-3"), DEFAULT_THRESHOLD);
    }

    #[test]
    fn parse_delimiter_supports_named_tokens() {
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert!(parse_delimiter("ab").is_err());
    }
}
