use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dump::DumpFormat;

fn default_log_level() -> String {
    "warn".to_string()
}

/// Settings for the `floorplan` binary. Every field is optional in the file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Floor plan document used when the command line names none.
    #[serde(default)]
    pub plan: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub dump_format: DumpFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plan: None,
            log_level: default_log_level(),
            dump_format: DumpFormat::default(),
        }
    }
}

pub struct SettingsLoader {
    base_dir: PathBuf,
}

impl SettingsLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Reads a YAML settings file. A relative `plan` is taken relative to the file.
    pub fn load(&self, file: impl AsRef<Path>) -> Result<Settings> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let mut settings: Settings = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let (Some(plan), Some(dir)) = (settings.plan.as_ref(), path.parent()) {
            if plan.is_relative() {
                settings.plan = Some(dir.join(plan));
            }
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_mapping() {
        let settings: Settings = serde_yaml::from_str("{}").unwrap();
        assert!(settings.plan.is_none());
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.dump_format, DumpFormat::Xml);
    }

    #[test]
    fn loader_resolves_plan_next_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.yaml"),
            "plan: plans/office.xml\nlog_level: debug\ndump_format: json\n",
        )
        .unwrap();

        let settings = SettingsLoader::new(dir.path()).load("settings.yaml").unwrap();
        assert_eq!(settings.plan, Some(dir.path().join("plans/office.xml")));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.dump_format, DumpFormat::Json);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SettingsLoader::new("/nonexistent").load("settings.yaml").unwrap_err();
        assert!(err.to_string().contains("settings.yaml"));
    }
}
