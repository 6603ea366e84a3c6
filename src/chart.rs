//! Terminal charts over the ordered record sequence.
//!
//! Two kinds are supported: a horizontal bar chart with one bar per index,
//! and a scatter plot of index against value. Rendering produces a `String`
//! so callers decide where it goes.

use owo_colors::{AnsiColors, OwoColorize};
use std::str::FromStr;

use crate::record::{Field, Record, Value};
use crate::{Error, Result};

const BAR_GLYPH: &str = "█";
const POINT_GLYPH: char = '●';

/// Bar colours, cycled by index
const BAR_COLORS: &[AnsiColors] = &[
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Blue,
    AnsiColors::Yellow,
    AnsiColors::Magenta,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Scatter,
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "bar" => Ok(ChartKind::Bar),
            "2" | "scatter" => Ok(ChartKind::Scatter),
            _ => Err(Error::InvalidField(format!("Unknown chart type: {}", s))),
        }
    }
}

/// Chart settings. Defaults plot petrol consumption without colour.
#[derive(Debug, Clone)]
pub struct Chart {
    kind: ChartKind,
    field: Field,
    width: usize,
    height: usize,
    colored: bool,
}

impl Chart {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            field: Field::PetrolConsumption,
            width: 50,
            height: 15,
            colored: false,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    /// Longest bar, or the number of scatter columns
    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Number of scatter rows
    pub fn height(mut self, height: usize) -> Self {
        self.height = height.max(2);
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn title(&self) -> String {
        match self.kind {
            ChartKind::Bar => self.field.label().to_string(),
            ChartKind::Scatter => format!("{} (Scatter Plot)", self.field.label()),
        }
    }

    pub fn render(&self, records: &[Record]) -> Result<String> {
        if records.is_empty() {
            return Err(Error::EmptyStore);
        }

        let values: Vec<Value> = records.iter().map(|r| r.get(self.field)).collect();
        let body = match self.kind {
            ChartKind::Bar => self.render_bar(&values),
            ChartKind::Scatter => self.render_scatter(&values),
        };

        Ok(format!("{}\n{}", self.title(), body))
    }

    fn render_bar(&self, values: &[Value]) -> String {
        let max = values
            .iter()
            .map(Value::as_f64)
            .fold(f64::NEG_INFINITY, f64::max);
        let index_width = "Index".len().max((values.len() - 1).to_string().len());

        let mut out = String::new();
        out.push_str(&format!(
            "{:>w$} │ {}\n",
            "Index",
            self.field.axis_label(),
            w = index_width
        ));

        for (i, value) in values.iter().enumerate() {
            let v = value.as_f64();
            let len = if v > 0.0 && max > 0.0 {
                ((v / max) * self.width as f64).round() as usize
            } else {
                0
            };

            let bar = BAR_GLYPH.repeat(len);
            let bar = if self.colored {
                bar.color(BAR_COLORS[i % BAR_COLORS.len()]).to_string()
            } else {
                bar
            };
            out.push_str(&format!("{:>w$} │{} {}\n", i, bar, value, w = index_width));
        }

        out
    }

    fn render_scatter(&self, values: &[Value]) -> String {
        let n = values.len();
        let columns = n.min(self.width);
        let rows = self.height;

        let by_value = |a: &&Value, b: &&Value| a.as_f64().total_cmp(&b.as_f64());
        let (min, max) = match (values.iter().min_by(by_value), values.iter().max_by(by_value)) {
            (Some(min), Some(max)) => (*min, *max),
            _ => return String::new(),
        };
        let (lo, hi) = (min.as_f64(), max.as_f64());

        let mut grid = vec![vec![' '; columns]; rows];
        for (i, value) in values.iter().enumerate() {
            let x = if n == 1 { 0 } else { i * (columns - 1) / (n - 1) };
            let y = if hi == lo {
                rows / 2
            } else {
                (((value.as_f64() - lo) / (hi - lo)) * (rows - 1) as f64).round() as usize
            };
            grid[y][x] = POINT_GLYPH;
        }

        let max_label = max.to_string();
        let min_label = min.to_string();
        let label_width = max_label.len().max(min_label.len());

        let mut out = String::new();
        out.push_str(&format!("{:>w$}\n", self.field.axis_label(), w = label_width));

        for y in (0..rows).rev() {
            let label = if y == rows - 1 {
                max_label.as_str()
            } else if y == 0 {
                min_label.as_str()
            } else {
                ""
            };

            let mut line = String::new();
            for &cell in &grid[y] {
                if cell == POINT_GLYPH && self.colored {
                    line.push_str(&cell.blue().to_string());
                } else {
                    line.push(cell);
                }
            }
            out.push_str(&format!("{:>w$} │{}\n", label, line.trim_end(), w = label_width));
        }

        out.push_str(&format!("{:w$} └{}\n", "", "─".repeat(columns), w = label_width));

        let ticks = if columns > 1 {
            format!("0{:>pad$}", n - 1, pad = columns - 1)
        } else {
            "0".to_string()
        };
        out.push_str(&format!("{:w$}  {}  Index\n", "", ticks, w = label_width));
        out.push_str(&format!("{} {}\n", POINT_GLYPH, self.field.axis_label()));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[i64]) -> Vec<Record> {
        values
            .iter()
            .map(|v| Record::new(9.0, 3571, 1976, 0.525, *v))
            .collect()
    }

    #[test]
    fn test_chart_kind_parsing() {
        assert_eq!("1".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("Scatter".parse::<ChartKind>().unwrap(), ChartKind::Scatter);
        assert!("3".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_empty_records() {
        let chart = Chart::new(ChartKind::Bar);
        assert!(matches!(chart.render(&[]), Err(Error::EmptyStore)));
    }

    #[test]
    fn test_bar_one_line_per_index() {
        let chart = Chart::new(ChartKind::Bar).width(10);
        let out = chart.render(&records(&[100, 50, 0])).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Petrol Consumption");
        assert_eq!(lines[1], "Index │ Consumption");
        assert_eq!(lines[2], "    0 │██████████ 100");
        assert_eq!(lines[3], "    1 │█████ 50");
        assert_eq!(lines[4], "    2 │ 0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_bar_colored_contains_escape_codes() {
        let chart = Chart::new(ChartKind::Bar).colored(true);
        let out = chart.render(&records(&[10, 20])).unwrap();
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_scatter_layout() {
        let chart = Chart::new(ChartKind::Scatter).height(3).width(10);
        let out = chart.render(&records(&[10, 20, 30])).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Petrol Consumption (Scatter Plot)");
        assert_eq!(lines[1], "Consumption");
        assert_eq!(lines[2], "30 │  ●");
        assert_eq!(lines[3], "   │ ●");
        assert_eq!(lines[4], "10 │●");
        assert_eq!(lines[5], "   └───");
        assert_eq!(lines[6], "    0 2  Index");
        assert_eq!(lines[7], "● Consumption");
    }

    #[test]
    fn test_scatter_compresses_columns() {
        let chart = Chart::new(ChartKind::Scatter).width(4).height(4);
        let values: Vec<i64> = (0..20).collect();
        let out = chart.render(&records(&values)).unwrap();

        assert!(out.contains("└────\n"));
        assert!(out.contains("0 19  Index"));
    }

    #[test]
    fn test_scatter_flat_values() {
        let chart = Chart::new(ChartKind::Scatter).height(5);
        let out = chart.render(&records(&[7, 7, 7])).unwrap();
        assert_eq!(out.matches(POINT_GLYPH).count(), 4);
    }
}
