//! Record types - the fixed petrol-consumption schema
//!
//! Every record carries the same five columns:
//! - `Petrol_tax`: float
//! - `Average_income`: integer
//! - `Paved_Highways`: integer
//! - `Population_Driver_licence_percent`: float
//! - `Petrol_Consumption`: integer
//!
//! Raw text (menu prompts, CLI arguments, snapshot cells) is coerced into the
//! declared type before it reaches a `Record`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared numeric kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Integer,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Float => "float",
            ValueKind::Integer => "integer",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five columns of the schema, in snapshot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    PetrolTax,
    AverageIncome,
    PavedHighways,
    DriverLicensePercent,
    PetrolConsumption,
}

impl Field {
    /// Column name used in the snapshot header and the SQL table
    pub fn column(&self) -> &'static str {
        match self {
            Field::PetrolTax => "Petrol_tax",
            Field::AverageIncome => "Average_income",
            Field::PavedHighways => "Paved_Highways",
            Field::DriverLicensePercent => "Population_Driver_licence_percent",
            Field::PetrolConsumption => "Petrol_Consumption",
        }
    }

    /// snake_case key accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PetrolTax => "petrol_tax",
            Field::AverageIncome => "average_income",
            Field::PavedHighways => "paved_highways",
            Field::DriverLicensePercent => "driver_license_percent",
            Field::PetrolConsumption => "petrol_consumption",
        }
    }

    /// Human label for prompts and chart titles
    pub fn label(&self) -> &'static str {
        match self {
            Field::PetrolTax => "Petrol Tax",
            Field::AverageIncome => "Average Income",
            Field::PavedHighways => "Paved Highways",
            Field::DriverLicensePercent => "Driver License Percentage",
            Field::PetrolConsumption => "Petrol Consumption",
        }
    }

    /// Short axis label for charts
    pub fn axis_label(&self) -> &'static str {
        match self {
            Field::PetrolTax => "Tax",
            Field::AverageIncome => "Income",
            Field::PavedHighways => "Highways",
            Field::DriverLicensePercent => "License %",
            Field::PetrolConsumption => "Consumption",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Field::PetrolTax | Field::DriverLicensePercent => ValueKind::Float,
            Field::AverageIncome | Field::PavedHighways | Field::PetrolConsumption => {
                ValueKind::Integer
            }
        }
    }

    /// Only tax, income and consumption may be used as sort keys.
    pub fn is_sortable(&self) -> bool {
        matches!(
            self,
            Field::PetrolTax | Field::AverageIncome | Field::PetrolConsumption
        )
    }

    /// All fields in column order
    pub fn all() -> &'static [Field] {
        &[
            Field::PetrolTax,
            Field::AverageIncome,
            Field::PavedHighways,
            Field::DriverLicensePercent,
            Field::PetrolConsumption,
        ]
    }

    /// Fields offered by the sort action
    pub fn sortable() -> &'static [Field] {
        &[Field::PetrolTax, Field::AverageIncome, Field::PetrolConsumption]
    }

    /// Coerce raw text into this field's declared type.
    ///
    /// Integer fields also accept float text with no fractional part
    /// (`"3571.0"`), which is how older snapshots stored edited integers.
    pub fn coerce(&self, raw: &str) -> Result<Value> {
        let text = raw.trim();
        let type_error = || Error::Type {
            field: *self,
            kind: self.kind(),
            value: raw.to_string(),
        };

        match self.kind() {
            ValueKind::Float => {
                let v: f64 = text.parse().map_err(|_| type_error())?;
                if !v.is_finite() {
                    return Err(type_error());
                }
                Ok(Value::Float(v))
            }
            ValueKind::Integer => {
                if let Ok(v) = text.parse::<i64>() {
                    return Ok(Value::Integer(v));
                }
                let v: f64 = text.parse().map_err(|_| type_error())?;
                if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                    Ok(Value::Integer(v as i64))
                } else {
                    Err(type_error())
                }
            }
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "petrol_tax" | "tax" => Ok(Field::PetrolTax),
            "average_income" | "income" => Ok(Field::AverageIncome),
            "paved_highways" | "highways" => Ok(Field::PavedHighways),
            "driver_license_percent" | "population_driver_licence_percent" | "license"
            | "licence" => Ok(Field::DriverLicensePercent),
            "petrol_consumption" | "consumption" => Ok(Field::PetrolConsumption),
            _ => Err(Error::InvalidField(format!("Unknown field: {}", s))),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed cell value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Integer(i64),
}

impl Value {
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Float(v) => *v,
            Value::Integer(v) => *v as f64,
        }
    }
}

/// Canonical text: integers in plain decimal, floats in shortest
/// round-trip form with a decimal point always present.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) if v.fract() == 0.0 && v.abs() < 1e16 => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

/// One row of petrol-consumption statistics.
///
/// Records have no identity of their own; the store addresses them by
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub petrol_tax: f64,
    pub average_income: i64,
    pub paved_highways: i64,
    pub driver_license_percent: f64,
    pub petrol_consumption: i64,
}

impl Record {
    pub fn new(
        petrol_tax: f64,
        average_income: i64,
        paved_highways: i64,
        driver_license_percent: f64,
        petrol_consumption: i64,
    ) -> Self {
        Self {
            petrol_tax,
            average_income,
            paved_highways,
            driver_license_percent,
            petrol_consumption,
        }
    }

    /// Build a record from five raw strings in column order.
    pub fn from_raw<S: AsRef<str>>(raw: &[S; 5]) -> Result<Self> {
        let mut record = Record::new(0.0, 0, 0, 0.0, 0);
        for (field, text) in Field::all().iter().zip(raw.iter()) {
            let value = field.coerce(text.as_ref())?;
            record.set(*field, value)?;
        }
        Ok(record)
    }

    pub fn get(&self, field: Field) -> Value {
        match field {
            Field::PetrolTax => Value::Float(self.petrol_tax),
            Field::AverageIncome => Value::Integer(self.average_income),
            Field::PavedHighways => Value::Integer(self.paved_highways),
            Field::DriverLicensePercent => Value::Float(self.driver_license_percent),
            Field::PetrolConsumption => Value::Integer(self.petrol_consumption),
        }
    }

    /// Store a value that has already been coerced for `field`.
    pub fn set(&mut self, field: Field, value: Value) -> Result<()> {
        match (field, value) {
            (Field::PetrolTax, Value::Float(v)) => self.petrol_tax = v,
            (Field::AverageIncome, Value::Integer(v)) => self.average_income = v,
            (Field::PavedHighways, Value::Integer(v)) => self.paved_highways = v,
            (Field::DriverLicensePercent, Value::Float(v)) => self.driver_license_percent = v,
            (Field::PetrolConsumption, Value::Integer(v)) => self.petrol_consumption = v,
            (field, value) => {
                return Err(Error::Type {
                    field,
                    kind: field.kind(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Cells in column order, in canonical text form
    pub fn to_row(&self) -> Vec<String> {
        Field::all().iter().map(|f| self.get(*f).to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parsing() {
        assert_eq!("petrol_consumption".parse::<Field>().unwrap(), Field::PetrolConsumption);
        assert_eq!("Paved_Highways".parse::<Field>().unwrap(), Field::PavedHighways);
        assert_eq!("income".parse::<Field>().unwrap(), Field::AverageIncome);
        assert!(matches!("population".parse::<Field>(), Err(Error::InvalidField(_))));
    }

    #[test]
    fn test_sortable_fields() {
        assert!(Field::PetrolTax.is_sortable());
        assert!(Field::AverageIncome.is_sortable());
        assert!(Field::PetrolConsumption.is_sortable());
        assert!(!Field::PavedHighways.is_sortable());
        assert!(!Field::DriverLicensePercent.is_sortable());
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(Field::PavedHighways.coerce("500").unwrap(), Value::Integer(500));
        assert_eq!(Field::PavedHighways.coerce(" 42 ").unwrap(), Value::Integer(42));
        assert_eq!(Field::AverageIncome.coerce("3571.0").unwrap(), Value::Integer(3571));
        assert!(matches!(
            Field::PavedHighways.coerce("abc"),
            Err(Error::Type { field: Field::PavedHighways, .. })
        ));
        assert!(Field::PavedHighways.coerce("12.5").is_err());
        assert!(Field::PavedHighways.coerce("").is_err());
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(Field::PetrolTax.coerce("9").unwrap(), Value::Float(9.0));
        assert_eq!(Field::DriverLicensePercent.coerce("0.525").unwrap(), Value::Float(0.525));
        assert!(Field::PetrolTax.coerce("nan").is_err());
        assert!(Field::PetrolTax.coerce("inf").is_err());
        assert!(Field::PetrolTax.coerce("nine").is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Float(9.0).to_string(), "9.0");
        assert_eq!(Value::Float(7.5).to_string(), "7.5");
        assert_eq!(Value::Float(0.525).to_string(), "0.525");
        assert_eq!(Value::Integer(541).to_string(), "541");
    }

    #[test]
    fn test_from_raw() {
        let record = Record::from_raw(&["9.0", "3571", "1976", "0.525", "541"]).unwrap();
        assert_eq!(record, Record::new(9.0, 3571, 1976, 0.525, 541));
        assert_eq!(record.to_row(), vec!["9.0", "3571", "1976", "0.525", "541"]);

        let err = Record::from_raw(&["9.0", "lots", "1976", "0.525", "541"]).unwrap_err();
        assert!(matches!(err, Error::Type { field: Field::AverageIncome, .. }));
    }

    #[test]
    fn test_set_rejects_mismatched_kind() {
        let mut record = Record::new(9.0, 3571, 1976, 0.525, 541);
        assert!(record.set(Field::PavedHighways, Value::Float(1.5)).is_err());
        assert_eq!(record.paved_highways, 1976);
    }
}
