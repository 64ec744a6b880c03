//! CREATE TABLE statement assembly.

use itertools::Itertools;

use crate::infer::SqlType;

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub identifier: String,
    pub sql_type: SqlType,
}

/// Renders the final statement. Identifiers and the table name are expected
/// to be sanitized already; clauses appear in source column order, one per
/// line, indented by four spaces.
pub fn render_create_table(table: &str, columns: &[ColumnDef]) -> String {
    let clauses = columns
        .iter()
        .map(|column| format!("    [{}] {}", column.identifier, column.sql_type))
        .join(",\n");
    format!("CREATE TABLE [{table}] (\n{clauses}\n);")
}
