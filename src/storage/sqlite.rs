//! SQLite export implementation

use std::path::Path;
use rusqlite::{Connection, params};
use crate::Result;
use crate::record::Record;
use super::schema;

/// A destination that accepts a full replacement of a table's rows.
///
/// Implementations either write every record or fail the whole call.
pub trait TableSink {
    /// Replace all rows of `table` with `records`, returning the number of
    /// rows written.
    fn replace_table(&mut self, table: &str, records: &[Record]) -> Result<usize>;
}

/// SQLite-backed export target
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create the export table if it does not exist yet
    pub fn ensure_table(&self, table: &str) -> Result<()> {
        schema::validate_table_name(table)?;
        self.conn.execute(&schema::create_table(table), [])?;
        Ok(())
    }

    /// Read every row of the table back as records
    pub fn fetch_all(&self, table: &str) -> Result<Vec<Record>> {
        schema::validate_table_name(table)?;
        let mut stmt = self.conn.prepare(&schema::select_all(table))?;

        let records = stmt
            .query_map([], |row| {
                Ok(Record::new(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Count rows in the table
    pub fn count_rows(&self, table: &str) -> Result<usize> {
        schema::validate_table_name(table)?;
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl TableSink for SqliteSink {
    fn replace_table(&mut self, table: &str, records: &[Record]) -> Result<usize> {
        schema::validate_table_name(table)?;

        let tx = self.conn.transaction()?;
        tx.execute(&schema::create_table(table), [])?;
        let removed = tx.execute(&schema::delete_all(table), [])?;
        {
            let mut stmt = tx.prepare(&schema::insert_row(table))?;
            for record in records {
                stmt.execute(params![
                    record.petrol_tax,
                    record.average_income,
                    record.paved_highways,
                    record.driver_license_percent,
                    record.petrol_consumption,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!(
            "Replaced {} rows of {} with {} records",
            removed,
            table,
            records.len()
        );
        Ok(records.len())
    }
}
