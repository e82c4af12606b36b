use anyhow::{Context, Result};
use daybook_core::LocaleId;
use daybook_export::ExportFormat;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_daybook_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default)]
    pub locale: LocaleId,
    /// IANA zone treated as "local" for calendar days
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default)]
    pub default_format: ExportFormat,
}

fn default_timezone() -> String {
    "America/Mexico_City".to_string()
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            locale: LocaleId::default(),
            timezone: default_timezone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_daybook_home()?.join("config.toml"))
}

/// Load `path`, or the default config location when `None`.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        debug!("no config at {}, using defaults", p.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.display.locale, LocaleId::Es);
        assert_eq!(cfg.display.timezone, "America/Mexico_City");
        assert_eq!(cfg.export.default_format, ExportFormat::Csv);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[display]\nlocale = \"en\"\n").unwrap();
        let cfg = load_config(Some(&p)).unwrap();
        assert_eq!(cfg.display.locale, LocaleId::En);
        assert_eq!(cfg.display.timezone, "America/Mexico_City");
        assert_eq!(cfg.export.default_format, ExportFormat::Csv);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.display.timezone = "Europe/Madrid".to_string();
        cfg.export.default_format = ExportFormat::GroupedCsv;
        save_config(&p, &cfg).unwrap();

        let text = fs::read_to_string(&p).unwrap();
        assert!(text.contains("default_format = \"grouped-csv\""));
        assert_eq!(load_config(Some(&p)).unwrap(), cfg);
    }

    #[test]
    fn test_bad_locale_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[display]\nlocale = \"fr\"\n").unwrap();
        assert!(load_config(Some(&p)).is_err());
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[display]\nlocale = \"en\"\n").unwrap();
        init_config(Some(&p)).unwrap();
        assert_eq!(load_config(Some(&p)).unwrap().display.locale, LocaleId::En);
    }
}
