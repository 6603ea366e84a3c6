//! # Petrolbook - Petrol Consumption Record Manager
//!
//! A small record store for petrol-consumption statistics.
//!
//! Petrolbook provides:
//! - A fixed five-column `Record` schema with typed coercion from raw text
//! - `RecordStore`: ordered, index-addressed CRUD backed by a CSV snapshot
//! - Full-table export to SQLite
//! - Terminal bar charts and scatter plots
//! - An interactive numbered menu

pub mod record;
pub mod store;
pub mod storage;
pub mod chart;
pub mod menu;
pub mod ui;
pub mod output;
pub mod config;


// Re-exports for convenient access
pub use record::{Field, Record, Value, ValueKind};
pub use store::RecordStore;
pub use storage::{SqliteSink, TableSink};
pub use chart::{Chart, ChartKind};

/// Result type alias for Petrolbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Petrolbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Snapshot format error: {0}")]
    Format(String),

    #[error("Type error: {field} expects {kind}, got '{value}'")]
    Type {
        field: Field,
        kind: ValueKind,
        value: String,
    },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Index {index} out of range (store has {len} records)")]
    Index { index: usize, len: usize },

    #[error("No data available")]
    EmptyStore,

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
