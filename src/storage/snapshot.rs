//! CSV snapshot of the record store.
//!
//! The header row names the five columns in fixed order; each following row
//! is one record in its canonical text form. Writes always replace the whole
//! file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::record::Record;
use crate::{Error, Result};

/// CSV column headers in deterministic order.
pub const HEADERS: &[&str] = &[
    "Petrol_tax",
    "Average_income",
    "Paved_Highways",
    "Population_Driver_licence_percent",
    "Petrol_Consumption",
];

/// Read every record from a snapshot file.
pub fn read(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    read_from(file)
}

/// Read records from any reader holding snapshot text.
pub fn read_from<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for (row_index, row) in csv_reader.records().enumerate() {
        let row = row?;
        if row.len() != HEADERS.len() {
            return Err(Error::Format(format!(
                "row {} has {} cells, expected {}",
                row_index,
                row.len(),
                HEADERS.len()
            )));
        }

        let cells = [&row[0], &row[1], &row[2], &row[3], &row[4]];
        let record = Record::from_raw(&cells).inspect_err(|e| {
            tracing::warn!("Snapshot row {} rejected: {}", row_index, e);
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Overwrite a snapshot file with the given records.
pub fn write(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_to(file, records)
}

/// Write snapshot text to any writer.
pub fn write_to<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != HEADERS {
        return Err(Error::Format(format!(
            "expected columns [{}], found [{}]",
            HEADERS.join(", "),
            found.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new(9.0, 3571, 1976, 0.525, 541),
            Record::new(7.5, 4870, 2351, 0.529, 414),
            Record::new(8.0, 4399, 431, 0.544, 464),
        ]
    }

    #[test]
    fn test_headers_follow_field_order() {
        let columns: Vec<&str> = Field::all().iter().map(|f| f.column()).collect();
        assert_eq!(columns, HEADERS);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petrol_consumption.csv");

        write(&path, &sample_records()).unwrap();
        let loaded = read(&path).unwrap();
        assert_eq!(loaded, sample_records());
    }

    #[test]
    fn test_write_canonical_text() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &sample_records()[..1]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Petrol_tax,Average_income,Paved_Highways,Population_Driver_licence_percent,Petrol_Consumption"
        );
        assert_eq!(lines[1], "9.0,3571,1976,0.525,541");
    }

    #[test]
    fn test_empty_snapshot_is_header_only() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(read_from(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_header_mismatch() {
        let text = "tax,income,highways,license,consumption\n9.0,3571,1976,0.525,541\n";
        assert!(matches!(read_from(text.as_bytes()), Err(Error::Format(_))));

        let reordered = "Average_income,Petrol_tax,Paved_Highways,Population_Driver_licence_percent,Petrol_Consumption\n";
        assert!(matches!(read_from(reordered.as_bytes()), Err(Error::Format(_))));

        let missing = "Petrol_tax,Average_income,Paved_Highways,Population_Driver_licence_percent\n";
        assert!(matches!(read_from(missing.as_bytes()), Err(Error::Format(_))));
    }

    #[test]
    fn test_short_row_rejected() {
        let text = "Petrol_tax,Average_income,Paved_Highways,Population_Driver_licence_percent,Petrol_Consumption\n9.0,3571\n";
        assert!(matches!(read_from(text.as_bytes()), Err(Error::Format(_))));
    }

    #[test]
    fn test_non_numeric_cell() {
        let text = "Petrol_tax,Average_income,Paved_Highways,Population_Driver_licence_percent,Petrol_Consumption\n9.0,3571,many,0.525,541\n";
        assert!(matches!(
            read_from(text.as_bytes()),
            Err(Error::Type { field: Field::PavedHighways, .. })
        ));
    }

    #[test]
    fn test_reads_float_rendered_integers() {
        let text = "Petrol_tax,Average_income,Paved_Highways,Population_Driver_licence_percent,Petrol_Consumption\n9.0,3571.0,1976,0.525,541.0\n";
        let records = read_from(text.as_bytes()).unwrap();
        assert_eq!(records, vec![Record::new(9.0, 3571, 1976, 0.525, 541)]);
    }
}
