//! Record store - ordered, index-addressed records backed by a CSV snapshot
//!
//! A record's identity is its position. Positions are always `0..len`:
//! deletion and sorting shift the remaining records so no gaps appear.
//! Every mutating operation rewrites the snapshot before returning.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::record::{Field, Record, Value};
use crate::storage::{snapshot, TableSink};
use crate::{Error, Result};

/// In-memory record collection persisted to a snapshot file.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl RecordStore {
    /// Load the snapshot at `path`, or create an empty one if it is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let records = if path.exists() {
            let records = snapshot::read(&path)?;
            tracing::debug!("Loaded {} records from {}", records.len(), path.display());
            records
        } else {
            tracing::info!("Snapshot {} not found, creating a new one", path.display());
            snapshot::write(&path, &[])?;
            Vec::new()
        };

        Ok(Self { path, records })
    }

    /// Where this store persists its snapshot
    pub fn snapshot_path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in current order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Snapshot view of `(index, record)` pairs in current order
    pub fn get_all(&self) -> Vec<(usize, Record)> {
        self.records.iter().cloned().enumerate().collect()
    }

    pub fn get(&self, index: usize) -> Result<&Record> {
        self.records.get(index).ok_or(Error::Index {
            index,
            len: self.records.len(),
        })
    }

    /// Append a record and return its index.
    pub fn add(&mut self, record: Record) -> Result<usize> {
        self.records.push(record);
        self.persist()?;
        Ok(self.records.len() - 1)
    }

    /// Replace one field of the record at `index` with coerced `raw` text.
    pub fn update(&mut self, index: usize, field: Field, raw: &str) -> Result<()> {
        self.update_many(index, &[(field, raw)])
    }

    /// Apply several field edits to one record.
    ///
    /// Every edit is coerced before anything changes, so a single bad value
    /// leaves the record as it was.
    pub fn update_many<S: AsRef<str>>(&mut self, index: usize, edits: &[(Field, S)]) -> Result<()> {
        self.check_index(index)?;

        let coerced = edits
            .iter()
            .map(|(field, raw)| field.coerce(raw.as_ref()).map(|value| (*field, value)))
            .collect::<Result<Vec<_>>>()?;

        let mut updated = self.records[index].clone();
        for (field, value) in coerced {
            updated.set(field, value)?;
        }
        self.records[index] = updated;

        self.persist()
    }

    /// Remove the record at `index`; later records move down by one.
    pub fn delete(&mut self, index: usize) -> Result<Record> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Drop every record, keeping the header-only snapshot.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.persist()
    }

    /// Stable sort by one of the sortable fields. The new order is persisted.
    pub fn sort_by(&mut self, field: Field, ascending: bool) -> Result<()> {
        if !field.is_sortable() {
            return Err(Error::InvalidField(format!(
                "{} cannot be used for sorting",
                field
            )));
        }

        self.records.sort_by(|a, b| {
            let ordering = compare_values(a.get(field), b.get(field));
            if ascending { ordering } else { ordering.reverse() }
        });

        self.persist()
    }

    /// Arithmetic mean of `field` across all records.
    pub fn average(&self, field: Field) -> Result<f64> {
        if self.records.is_empty() {
            return Err(Error::EmptyStore);
        }

        let sum: f64 = self.records.iter().map(|r| r.get(field).as_f64()).sum();
        Ok(sum / self.records.len() as f64)
    }

    /// Replace `table` in `sink` with the current records.
    pub fn export<S: TableSink + ?Sized>(&self, sink: &mut S, table: &str) -> Result<usize> {
        let written = sink.replace_table(table, &self.records)?;
        tracing::info!("Exported {} records to table {}", written, table);
        Ok(written)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(Error::Index {
                index,
                len: self.records.len(),
            })
        }
    }

    fn persist(&self) -> Result<()> {
        snapshot::write(&self.path, &self.records)?;
        tracing::debug!(
            "Saved {} records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn compare_values(a: Value, b: Value) -> Ordering {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(&b),
        (a, b) => a.as_f64().total_cmp(&b.as_f64()),
    }
}
