//! Export table schema definitions

use crate::{Error, Result};

/// Default destination table
pub const DEFAULT_TABLE: &str = "consumption";

/// Column definitions, in record order
pub const COLUMNS: &[(&str, &str)] = &[
    ("Petrol_tax", "FLOAT"),
    ("Average_income", "INT"),
    ("Paved_Highways", "INT"),
    ("Population_Driver_licence_percent", "FLOAT"),
    ("Petrol_Consumption", "INT"),
];

/// Reject anything that is not a plain SQL identifier.
///
/// Table names are interpolated into statements, so they are never quoted
/// user text.
pub fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(Error::InvalidTable(table.to_string()))
    }
}

/// SQL to create the export table
pub fn create_table(table: &str) -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|(name, ty)| format!("    {} {}", name, ty))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        table,
        columns.join(",\n")
    )
}

/// SQL to remove every row from the export table
pub fn delete_all(table: &str) -> String {
    format!("DELETE FROM {}", table)
}

/// SQL to insert one record
pub fn insert_row(table: &str) -> String {
    let names: Vec<&str> = COLUMNS.iter().map(|(name, _)| *name).collect();
    format!(
        "INSERT INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5)",
        table,
        names.join(", ")
    )
}

/// SQL to read the table back in insertion order
pub fn select_all(table: &str) -> String {
    let names: Vec<&str> = COLUMNS.iter().map(|(name, _)| *name).collect();
    format!("SELECT {} FROM {} ORDER BY rowid", names.join(", "), table)
}
