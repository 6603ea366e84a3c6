//! Storage Layer - snapshot file and SQL export
//!
//! The record store persists to a CSV snapshot after every mutation.
//! Exports go to a relational table that is replaced wholesale:
//! - consumption(Petrol_tax, Average_income, Paved_Highways,
//!   Population_Driver_licence_percent, Petrol_Consumption)

pub mod schema;
pub mod snapshot;
pub mod sqlite;

pub use sqlite::{SqliteSink, TableSink};
