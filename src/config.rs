use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::schema::DEFAULT_TABLE;

pub const DEFAULT_SNAPSHOT: &str = "petrol_consumption.csv";
pub const DEFAULT_DATABASE: &str = "petrol.db";

/// Contents of `petrolbook.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PetrolConfig {
    pub snapshot: Option<String>,
    pub database: Option<String>,
    pub table: Option<String>,
    pub clear_screen: Option<bool>,
    pub chart_width: Option<usize>,
    pub chart_height: Option<usize>,
}

/// Fully resolved settings, after defaults and overrides
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub snapshot: PathBuf,
    pub database: PathBuf,
    pub table: String,
    pub clear_screen: bool,
    pub chart_width: usize,
    pub chart_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT),
            database: PathBuf::from(DEFAULT_DATABASE),
            table: DEFAULT_TABLE.to_string(),
            clear_screen: false,
            chart_width: 50,
            chart_height: 15,
        }
    }
}

impl Settings {
    /// Apply file values over the defaults
    pub fn from_config(config: Option<&PetrolConfig>) -> Self {
        let mut settings = Settings::default();
        let Some(config) = config else {
            return settings;
        };

        if let Some(snapshot) = &config.snapshot {
            settings.snapshot = PathBuf::from(snapshot);
        }
        if let Some(database) = &config.database {
            settings.database = PathBuf::from(database);
        }
        if let Some(table) = &config.table {
            settings.table = table.clone();
        }
        if let Some(clear_screen) = config.clear_screen {
            settings.clear_screen = clear_screen;
        }
        if let Some(width) = config.chart_width {
            settings.chart_width = width;
        }
        if let Some(height) = config.chart_height {
            settings.chart_height = height;
        }
        settings
    }
}

/// The file `init` writes: every key spelled out with its default
pub fn starter_config() -> PetrolConfig {
    let defaults = Settings::default();
    PetrolConfig {
        snapshot: Some(defaults.snapshot.display().to_string()),
        database: Some(defaults.database.display().to_string()),
        table: Some(defaults.table),
        clear_screen: Some(defaults.clear_screen),
        chart_width: Some(defaults.chart_width),
        chart_height: Some(defaults.chart_height),
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("petrolbook.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PetrolConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PetrolConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PetrolConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("petrolbook.toml"))).unwrap();
        assert!(loaded.is_none());
        assert_eq!(Settings::from_config(loaded.as_ref()), Settings::default());
    }

    #[test]
    fn test_partial_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petrolbook.toml");
        std::fs::write(&path, "snapshot = \"data/petrol.csv\"\nclear_screen = true\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        let settings = Settings::from_config(Some(&config));
        assert_eq!(settings.snapshot, PathBuf::from("data/petrol.csv"));
        assert!(settings.clear_screen);
        assert_eq!(settings.table, "consumption");
        assert_eq!(settings.chart_width, 50);
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petrolbook.toml");

        write_config(&path, &starter_config(), false).unwrap();
        assert!(write_config(&path, &starter_config(), false).is_err());
        write_config(&path, &starter_config(), true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, starter_config());
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("petrol.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
