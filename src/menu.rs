//! Interactive numbered menu over a `RecordStore`.
//!
//! Input is read line by line from any `BufRead`, so the same loop serves a
//! terminal and scripted tests. Store errors are reported and the loop keeps
//! going; end of input ends the session.

use std::io::BufRead;
use std::str::FromStr;

use crate::chart::{Chart, ChartKind};
use crate::config::{ensure_db_dir, Settings};
use crate::record::{Field, Record};
use crate::storage::SqliteSink;
use crate::store::RecordStore;
use crate::ui::{self, theme, Icons};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    View,
    Modify,
    Delete,
    Sort,
    Average,
    Export,
    Graph,
    Clear,
    ToggleClearScreen,
    Exit,
}

impl MenuAction {
    pub fn all() -> &'static [MenuAction] {
        &[
            MenuAction::Add,
            MenuAction::View,
            MenuAction::Modify,
            MenuAction::Delete,
            MenuAction::Sort,
            MenuAction::Average,
            MenuAction::Export,
            MenuAction::Graph,
            MenuAction::Clear,
            MenuAction::ToggleClearScreen,
            MenuAction::Exit,
        ]
    }

    /// 1-based menu number
    pub fn number(&self) -> usize {
        Self::all().iter().position(|a| a == self).unwrap_or(0) + 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Add => "Add Data",
            MenuAction::View => "View Data",
            MenuAction::Modify => "Modify Data",
            MenuAction::Delete => "Delete Data",
            MenuAction::Sort => "Sort Data",
            MenuAction::Average => "View Average Consumption",
            MenuAction::Export => "Export to SQL",
            MenuAction::Graph => "Generate Graph",
            MenuAction::Clear => "Clear All Data",
            MenuAction::ToggleClearScreen => "Toggle Clear Screen",
            MenuAction::Exit => "Exit",
        }
    }
}

impl FromStr for MenuAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::all().get(i).copied())
            .ok_or_else(|| Error::Input(format!("'{}' is not a menu choice", s.trim())))
    }
}

/// Prompts shown by the add action, in column order
const ADD_PROMPTS: [(Field, &str); 5] = [
    (Field::PetrolTax, "Enter petrol tax: "),
    (Field::AverageIncome, "Enter average income: "),
    (Field::PavedHighways, "Enter paved highways: "),
    (Field::DriverLicensePercent, "Enter driver license percentage: "),
    (Field::PetrolConsumption, "Enter petrol consumption: "),
];

pub struct Menu<R: BufRead> {
    store: RecordStore,
    settings: Settings,
    input: R,
    clear_screen: bool,
}

impl<R: BufRead> Menu<R> {
    pub fn new(store: RecordStore, settings: Settings, input: R) -> Self {
        let clear_screen = settings.clear_screen;
        Self {
            store,
            settings,
            input,
            clear_screen,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }

    pub fn clear_screen_enabled(&self) -> bool {
        self.clear_screen
    }

    /// Run until the exit action or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu();
            let Some(choice) = self.ask("Enter your choice: ")? else {
                println!();
                break;
            };

            if self.clear_screen && console::Term::stdout().is_term() {
                let _ = console::Term::stdout().clear_screen();
            }

            let action = match choice.parse::<MenuAction>() {
                Ok(action) => action,
                Err(_) => {
                    ui::warn("Invalid choice. Please try again.");
                    continue;
                }
            };

            if action == MenuAction::Exit {
                println!("{} Exiting the program. Goodbye!", Icons::WAVE);
                break;
            }

            if let Err(e) = self.dispatch(action) {
                match e {
                    Error::Io(_) | Error::Csv(_) | Error::Storage(_) => {
                        tracing::error!("{} failed: {}", action.label(), e);
                    }
                    _ => tracing::warn!("{} rejected: {}", action.label(), e),
                }
                ui::error(&e.to_string());
            }
        }
        Ok(())
    }

    pub fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::Add => self.add_data(),
            MenuAction::View => {
                self.view_data();
                Ok(())
            }
            MenuAction::Modify => self.modify_data(),
            MenuAction::Delete => self.delete_data(),
            MenuAction::Sort => self.sort_data(),
            MenuAction::Average => self.view_average(),
            MenuAction::Export => self.export_to_sql(),
            MenuAction::Graph => self.generate_graph(),
            MenuAction::Clear => self.clear_all_data(),
            MenuAction::ToggleClearScreen => {
                self.toggle_clear_screen();
                Ok(())
            }
            MenuAction::Exit => Ok(()),
        }
    }

    fn display_menu(&self) {
        ui::section("Petrol Consumption Management System");
        for action in MenuAction::all() {
            println!("{:>3}. {}", action.number(), action.label());
        }
    }

    /// Prompt and read one line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        ui::prompt(prompt);
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_index(&mut self, prompt: &str) -> Result<Option<usize>> {
        let Some(raw) = self.ask(prompt)? else {
            return Ok(None);
        };
        let index = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| Error::Input(format!("'{}' is not a record index", raw.trim())))?;
        Ok(Some(index))
    }

    fn add_data(&mut self) -> Result<()> {
        ui::section("Add Petrol Consumption Data");

        let mut record = Record::new(0.0, 0, 0, 0.0, 0);
        for (field, prompt) in ADD_PROMPTS {
            let Some(raw) = self.ask(prompt)? else {
                return Ok(());
            };
            record.set(field, field.coerce(&raw)?)?;
        }

        let index = self.store.add(record)?;
        ui::record_added(index);
        ui::saved(self.store.snapshot_path());
        Ok(())
    }

    fn view_data(&self) {
        ui::section("View Petrol Consumption Data");
        if self.store.is_empty() {
            ui::warn("No data available.");
        } else {
            println!("{}", ui::records_table(self.store.records()));
        }
    }

    fn modify_data(&mut self) -> Result<()> {
        self.view_data();

        let Some(index) = self.ask_index("Enter the index of the data to modify: ")? else {
            return Ok(());
        };
        let current = self.store.get(index)?.clone();

        println!("Modify the fields (leave blank to keep current value):");
        let mut edits = Vec::new();
        for field in Field::all() {
            let prompt = format!("{} [{}]: ", field.column(), current.get(*field));
            let Some(raw) = self.ask(&prompt)? else {
                return Ok(());
            };
            if !raw.trim().is_empty() {
                edits.push((*field, raw));
            }
        }

        if edits.is_empty() {
            println!("{}", ui::dim("Nothing changed."));
            return Ok(());
        }

        self.store.update_many(index, &edits)?;
        ui::record_modified(index);
        ui::saved(self.store.snapshot_path());
        Ok(())
    }

    fn delete_data(&mut self) -> Result<()> {
        self.view_data();

        let Some(index) = self.ask_index("Enter the index of the data to delete: ")? else {
            return Ok(());
        };
        self.store.delete(index)?;
        ui::record_deleted(index);
        ui::saved(self.store.snapshot_path());
        Ok(())
    }

    fn sort_data(&mut self) -> Result<()> {
        ui::section("Sort Petrol Consumption Data");
        for (i, field) in Field::sortable().iter().enumerate() {
            println!("{}. {}", i + 1, field.label());
        }

        let Some(choice) = self.ask("Sort by (1/2/3): ")? else {
            return Ok(());
        };
        let field = choice
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Field::sortable().get(i).copied());
        let Some(field) = field else {
            ui::warn("Invalid choice.");
            return Ok(());
        };

        let Some(order) = self.ask("Order, (a)scending or (d)escending [a]: ")? else {
            return Ok(());
        };
        let ascending = !matches!(order.trim().to_lowercase().as_str(), "d" | "desc" | "descending");

        self.store.sort_by(field, ascending)?;
        println!("{} Sorted by {}", Icons::SORT, field.label());
        self.view_data();
        ui::saved(self.store.snapshot_path());
        Ok(())
    }

    fn view_average(&self) -> Result<()> {
        let average = self.store.average(Field::PetrolConsumption)?;
        println!(
            "{} Average Petrol Consumption: {:.2}",
            Icons::STATS,
            average
        );
        Ok(())
    }

    fn export_to_sql(&self) -> Result<()> {
        ensure_db_dir(&self.settings.database)
            .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
        let mut sink = SqliteSink::open(&self.settings.database)?;
        let rows = self.store.export(&mut sink, &self.settings.table)?;

        println!(
            "{} Exported {} rows to table '{}' in {}",
            Icons::DATABASE,
            rows,
            self.settings.table,
            self.settings.database.display()
        );
        Ok(())
    }

    fn generate_graph(&mut self) -> Result<()> {
        if self.store.is_empty() {
            return Err(Error::EmptyStore);
        }

        ui::section("Graph Options");
        println!("1. Bar Graph\n2. Scatter Plot");
        let Some(choice) = self.ask("Select graph type (1/2): ")? else {
            return Ok(());
        };
        let Ok(kind) = choice.parse::<ChartKind>() else {
            ui::warn("Invalid choice.");
            return Ok(());
        };

        let chart = Chart::new(kind)
            .width(self.settings.chart_width)
            .height(self.settings.chart_height)
            .colored(theme().colored);
        println!("{} {}", Icons::CHART, chart.render(self.store.records())?);
        Ok(())
    }

    fn clear_all_data(&mut self) -> Result<()> {
        self.store.clear()?;
        ui::success("All data cleared.");
        ui::saved(self.store.snapshot_path());
        Ok(())
    }

    fn toggle_clear_screen(&mut self) {
        self.clear_screen = !self.clear_screen;
        let state = if self.clear_screen { "enabled" } else { "disabled" };
        println!("{} Clear screen feature is now {}.", Icons::GEAR, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn menu_with(script: &str) -> (TempDir, Menu<Cursor<Vec<u8>>>) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            snapshot: dir.path().join("petrol_consumption.csv"),
            database: dir.path().join("db").join("petrol.db"),
            ..Settings::default()
        };
        let store = RecordStore::load(&settings.snapshot).unwrap();
        let input = Cursor::new(script.as_bytes().to_vec());
        (dir, Menu::new(store, settings, input))
    }

    const ADD_FIRST: &str = "1\n9.0\n3571\n1976\n0.525\n541\n";
    const ADD_SECOND: &str = "1\n7.5\n4870\n2351\n0.529\n414\n";

    #[test]
    fn test_action_numbers() {
        assert_eq!(MenuAction::all().len(), 11);
        assert_eq!("1".parse::<MenuAction>().unwrap(), MenuAction::Add);
        assert_eq!(" 10 ".parse::<MenuAction>().unwrap(), MenuAction::ToggleClearScreen);
        assert_eq!(MenuAction::Exit.number(), 11);
        assert!("0".parse::<MenuAction>().is_err());
        assert!("12".parse::<MenuAction>().is_err());
        assert!("add".parse::<MenuAction>().is_err());
    }

    #[test]
    fn test_add_modify_delete_session() {
        let script = format!("{ADD_FIRST}{ADD_SECOND}3\n1\n\n\n\n\n600\n4\n0\n11\n");
        let (_dir, mut menu) = menu_with(&script);
        menu.run().unwrap();

        let store = menu.into_store();
        assert_eq!(store.records(), &[Record::new(7.5, 4870, 2351, 0.529, 600)]);

        let reloaded = RecordStore::load(store.snapshot_path()).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn test_bad_input_is_reported_and_loop_continues() {
        let script = format!("1\n9.0\nabc\n42\n4\nxyz\n4\n7\n{ADD_FIRST}11\n");
        let (_dir, mut menu) = menu_with(&script);
        menu.run().unwrap();

        assert_eq!(menu.store().len(), 1);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_dir, mut menu) = menu_with("");
        menu.run().unwrap();

        let (_dir, mut menu) = menu_with("1\n9.0\n");
        menu.run().unwrap();
        assert!(menu.store().is_empty());
    }

    #[test]
    fn test_sort_descending() {
        let script = format!("{ADD_SECOND}{ADD_FIRST}5\n3\nd\n11\n");
        let (_dir, mut menu) = menu_with(&script);
        menu.run().unwrap();

        let values: Vec<i64> = menu
            .store()
            .records()
            .iter()
            .map(|r| r.petrol_consumption)
            .collect();
        assert_eq!(values, vec![541, 414]);
    }

    #[test]
    fn test_invalid_sort_choice_keeps_order() {
        let script = format!("{ADD_FIRST}{ADD_SECOND}5\n4\n11\n");
        let (_dir, mut menu) = menu_with(&script);
        menu.run().unwrap();

        assert_eq!(menu.store().get(0).unwrap().petrol_consumption, 541);
    }

    #[test]
    fn test_export_writes_database() {
        let script = format!("{ADD_FIRST}{ADD_SECOND}7\n11\n");
        let (dir, mut menu) = menu_with(&script);
        menu.run().unwrap();

        let sink = SqliteSink::open(&dir.path().join("db").join("petrol.db")).unwrap();
        assert_eq!(sink.count_rows("consumption").unwrap(), 2);
    }

    #[test]
    fn test_average_graph_clear_toggle() {
        let script = format!("{ADD_FIRST}{ADD_SECOND}6\n8\n1\n8\n2\n8\n9\n9\n6\n8\n10\n11\n");
        let (_dir, mut menu) = menu_with(&script);
        assert!(!menu.clear_screen_enabled());
        menu.run().unwrap();

        assert!(menu.store().is_empty());
        assert!(menu.clear_screen_enabled());
    }

    #[test]
    fn test_dispatch_average_on_empty_store() {
        let (_dir, mut menu) = menu_with("");
        assert!(matches!(menu.dispatch(MenuAction::Average), Err(Error::EmptyStore)));
        assert!(matches!(menu.dispatch(MenuAction::Graph), Err(Error::EmptyStore)));
    }
}
