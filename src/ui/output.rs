use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::Path;

pub fn header(text: &str) {
    println!("{} {}", Icons::FUEL, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

/// Print a prompt without a newline so the answer follows on the same line
pub fn prompt(text: &str) {
    print!("{}", text.style(theme().prompt.clone()));
    let _ = std::io::stdout().flush();
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

pub fn record_added(index: usize) {
    println!("{} Record {} added", Icons::NEW.style(theme().success.clone()), index);
}

pub fn record_modified(index: usize) {
    println!("{} Record {} modified", Icons::MOD.style(theme().warn.clone()), index);
}

pub fn record_deleted(index: usize) {
    println!("{} Record {} deleted", Icons::DEL.style(theme().error.clone()), index);
}

/// Confirmation after a snapshot write; silent in quiet mode
pub fn saved(path: &Path) {
    if is_quiet() {
        return;
    }
    println!(
        "  {} {}",
        Icons::SAVE.style(theme().dim.clone()),
        muted(&format!("Data saved to {}", path.display()))
    );
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}
