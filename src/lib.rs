pub mod cli;
pub mod headers;
pub mod infer;
pub mod io_utils;
pub mod rows;
pub mod sql;
pub mod value;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use crate::cli::{Cli, Commands, GenerateArgs};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_tablegen", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => handle_generate(&args),
    }
}

fn handle_generate(args: &GenerateArgs) -> Result<()> {
    let threshold = cli::resolve_threshold(&args.threshold);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let dataset = rows::load(&args.input, args.format, args.delimiter, encoding)
        .with_context(|| format!("Loading dataset from {:?}", args.input))?;
    info!(
        "Loaded {} row(s) across {} column(s) from '{}'",
        dataset.row_count,
        dataset.headers.len(),
        args.input.display()
    );

    let normalized = headers::normalize(dataset.headers.iter().map(|h| Some(h.as_str())));
    for base in &normalized.collisions {
        warn!("Duplicate column name '{base}' renamed with a numeric suffix");
    }
    let identifiers = headers::sanitize_unique(&normalized.names);

    let mut columns = Vec::with_capacity(identifiers.len());
    for ((name, identifier), values) in normalized
        .names
        .iter()
        .zip(&identifiers)
        .zip(&dataset.columns)
    {
        let sql_type = infer::infer(name, values, threshold);
        debug!("Column '{name}' resolved to {sql_type}");
        columns.push(sql::ColumnDef {
            identifier: identifier.clone(),
            sql_type,
        });
    }

    let table = args
        .table
        .clone()
        .unwrap_or_else(|| table_name_from_input(&args.input));
    let statement = sql::render_create_table(&headers::sanitize_identifier(&table), &columns);
    io_utils::write_output(args.output.as_deref(), &format!("{statement}\n"))
        .context("Writing CREATE TABLE statement")?;
    info!("Generated CREATE TABLE for {} column(s)", columns.len());
    Ok(())
}

fn table_name_from_input(path: &Path) -> String {
    if io_utils::is_dash(path) {
        return "GeneratedTable".to_string();
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "GeneratedTable".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn table_name_defaults_from_file_stem() {
        assert_eq!(table_name_from_input(&PathBuf::from("people.csv")), "people");
        assert_eq!(table_name_from_input(&PathBuf::from("-")), "GeneratedTable");
    }
}
