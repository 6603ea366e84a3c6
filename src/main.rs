//! Petrolbook CLI - Petrol consumption record manager

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use petrolbook::config::{self, Settings};
use petrolbook::menu::Menu;
use petrolbook::ui::{self, theme, Icons};
use petrolbook::{Chart, ChartKind, Field, Record, RecordStore, SqliteSink};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "petrolbook")]
#[command(version)]
#[command(about = "Petrol consumption record manager - CSV records, SQL export, terminal charts")]
#[command(long_about = r#"
Petrolbook keeps petrol-consumption statistics in a CSV snapshot and lets you:
  • Add, view, modify and delete records by index
  • Sort by tax, income or consumption
  • Average any column
  • Export every record to a SQLite table
  • Draw bar charts and scatter plots in the terminal

Run without a command for the interactive menu.

Example usage:
  petrolbook add 9.0 3571 1976 0.525 541
  petrolbook sort consumption --desc
  petrolbook chart scatter
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the CSV snapshot (overrides the config file)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (the default)
    Menu,

    /// Append a record
    Add {
        petrol_tax: String,
        average_income: String,
        paved_highways: String,
        driver_license_percent: String,
        petrol_consumption: String,
    },

    /// Show all records
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Change one field of a record
    Update {
        index: usize,
        /// Field name, e.g. paved_highways
        field: String,
        value: String,
    },

    /// Remove a record; later records move down by one
    Delete { index: usize },

    /// Sort records by petrol_tax, average_income or petrol_consumption
    Sort {
        field: String,

        /// Sort in descending order
        #[arg(long)]
        desc: bool,
    },

    /// Average of a column
    Average {
        #[arg(default_value = "petrol_consumption")]
        field: String,
    },

    /// Replace a SQLite table with the current records
    Export {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Destination table
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Draw a chart of one column against the record index
    Chart {
        /// Chart type (bar, scatter)
        #[arg(default_value = "bar")]
        kind: String,

        /// Column to plot
        #[arg(short, long, default_value = "petrol_consumption")]
        field: String,
    },

    /// Remove every record
    Clear,

    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let loaded = config::load_config(cli.config.as_deref())?;
    let mut settings = Settings::from_config(loaded.as_ref());
    if let Some(snapshot) = cli.snapshot {
        settings.snapshot = snapshot;
    }

    let command = cli.command.unwrap_or(Commands::Menu);

    match command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &config::starter_config(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }

        Commands::Menu => {
            let store = open_store(&settings)?;
            let stdin = std::io::stdin();
            let mut menu = Menu::new(store, settings, stdin.lock());
            menu.run()?;
        }

        Commands::Add {
            petrol_tax,
            average_income,
            paved_highways,
            driver_license_percent,
            petrol_consumption,
        } => {
            let mut store = open_store(&settings)?;
            let record = Record::from_raw(&[
                petrol_tax,
                average_income,
                paved_highways,
                driver_license_percent,
                petrol_consumption,
            ])?;
            let index = store.add(record)?;
            ui::record_added(index);
            ui::saved(store.snapshot_path());
        }

        Commands::List { format } => {
            let store = open_store(&settings)?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(store.records())?);
            } else if store.is_empty() {
                println!("∅ No data available.");
            } else {
                println!("{}", ui::records_table(store.records()));
            }
        }

        Commands::Update { index, field, value } => {
            let mut store = open_store(&settings)?;
            let field: Field = field.parse()?;
            store.update(index, field, &value)?;
            ui::record_modified(index);
            ui::saved(store.snapshot_path());
        }

        Commands::Delete { index } => {
            let mut store = open_store(&settings)?;
            store.delete(index)?;
            ui::record_deleted(index);
            ui::saved(store.snapshot_path());
        }

        Commands::Sort { field, desc } => {
            let mut store = open_store(&settings)?;
            let field: Field = field.parse()?;
            store.sort_by(field, !desc)?;
            println!("{} Sorted by {}", Icons::SORT, field.label());
            println!("{}", ui::records_table(store.records()));
            ui::saved(store.snapshot_path());
        }

        Commands::Average { field } => {
            let store = open_store(&settings)?;
            let field: Field = field.parse()?;
            let average = store.average(field)?;

            let count = store.len().to_string();
            let label = format!("Average {}", field.label());
            let value = format!("{:.2}", average);
            println!(
                "{}",
                ui::stats_table(&[("Records", count.as_str()), (label.as_str(), value.as_str())])
            );
        }

        Commands::Export { database, table } => {
            let store = open_store(&settings)?;
            let database = database.unwrap_or(settings.database);
            let table = table.unwrap_or(settings.table);
            config::ensure_db_dir(&database)?;

            let mut sink = SqliteSink::open(&database)?;
            let rows = store.export(&mut sink, &table)?;

            ui::header("Export complete");
            ui::info("Database", &database.display().to_string());
            ui::info("Table", &table);
            ui::summary_row("Rows written:", &rows.to_string());
            ui::summary_row("Rows in table:", &sink.count_rows(&table)?.to_string());
        }

        Commands::Chart { kind, field } => {
            let store = open_store(&settings)?;
            let kind: ChartKind = kind.parse()?;
            let field: Field = field.parse()?;
            let chart = Chart::new(kind)
                .field(field)
                .width(settings.chart_width)
                .height(settings.chart_height)
                .colored(theme().colored);
            println!("{}", chart.render(store.records())?);
        }

        Commands::Clear => {
            let mut store = open_store(&settings)?;
            store.clear()?;
            ui::success("All data cleared.");
            ui::saved(store.snapshot_path());
        }
    }

    Ok(())
}

fn open_store(settings: &Settings) -> anyhow::Result<RecordStore> {
    tracing::debug!("Using snapshot {}", settings.snapshot.display());
    Ok(RecordStore::load(&settings.snapshot)?)
}
