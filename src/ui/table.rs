use crate::record::{Field, Record};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// One record as a display row, headed by the snapshot column names
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Petrol_tax")]
    petrol_tax: String,
    #[tabled(rename = "Average_income")]
    average_income: String,
    #[tabled(rename = "Paved_Highways")]
    paved_highways: String,
    #[tabled(rename = "Population_Driver_licence_percent")]
    driver_license_percent: String,
    #[tabled(rename = "Petrol_Consumption")]
    petrol_consumption: String,
}

impl RecordRow {
    fn new(index: usize, record: &Record) -> Self {
        Self {
            index,
            petrol_tax: record.get(Field::PetrolTax).to_string(),
            average_income: record.get(Field::AverageIncome).to_string(),
            paved_highways: record.get(Field::PavedHighways).to_string(),
            driver_license_percent: record.get(Field::DriverLicensePercent).to_string(),
            petrol_consumption: record.get(Field::PetrolConsumption).to_string(),
        }
    }
}

/// Render records with their current indices. Empty input yields an empty string.
pub fn records_table(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .enumerate()
        .map(|(i, r)| RecordRow::new(i, r))
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_table_lists_every_index() {
        let records = vec![
            Record::new(9.0, 3571, 1976, 0.525, 541),
            Record::new(7.5, 4870, 2351, 0.529, 414),
        ];
        let table = records_table(&records);

        assert!(table.contains("Petrol_Consumption"));
        assert!(table.contains("Population_Driver_licence_percent"));
        assert!(table.contains("541"));
        assert!(table.contains("7.5"));
        assert!(table.contains("│ 1 "));
    }

    #[test]
    fn test_empty_tables() {
        assert!(records_table(&[]).is_empty());
        assert!(TableBuilder::new().build().is_empty());
    }

    #[test]
    fn test_stats_table() {
        let table = stats_table(&[("Records", "3"), ("Average", "20.00")]);
        assert!(table.contains("Metric"));
        assert!(table.contains("20.00"));
    }
}
