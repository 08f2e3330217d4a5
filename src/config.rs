//! Layered application settings.
//!
//! Precedence, lowest first: built-in defaults, the optional TOML file,
//! `IBOX_OVERVIEW_*` environment variables (`__` between nested keys), then
//! command-line flags (applied by the binary).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default settings file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ibox-overview.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "IBOX_OVERVIEW";

/// Which colour theme to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Pick based on the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `ibox_overview=debug`.
    pub level: String,
    /// Log file. The terminal belongs to the UI, so logs never go to stdout.
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("ibox-overview.log"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fleet JSON file. The built-in sample fleet is used when unset.
    pub fixture: Option<PathBuf>,
    pub theme: ThemeChoice,
    /// Where the `e` key and `--export` write the fleet.
    pub export_path: PathBuf,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixture: None,
            theme: ThemeChoice::Auto,
            export_path: PathBuf::from("fleet_export.json"),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (missing file is fine) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env.prefix_separator("_").separator("__"))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .with_context(|| format!("invalid settings in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings =
            Settings::load_with_env(Path::new("/nonexistent/ibox-overview.toml"), no_env())
                .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            fixture = "fleet.json"
            theme = "light"

            [logging]
            level = "debug"
            "#,
        );

        let settings = Settings::load_with_env(file.path(), no_env()).unwrap();
        assert_eq!(settings.fixture, Some(PathBuf::from("fleet.json")));
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.file, PathBuf::from("ibox-overview.log"));
        assert_eq!(settings.export_path, PathBuf::from("fleet_export.json"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file("theme = \"light\"\n");
        let env = HashMap::from([
            ("IBOX_OVERVIEW_THEME".to_string(), "dark".to_string()),
            ("IBOX_OVERVIEW_LOGGING__LEVEL".to_string(), "warn".to_string()),
        ]);

        let settings = Settings::load_with_env(
            file.path(),
            Environment::with_prefix(ENV_PREFIX).source(Some(env)),
        )
        .unwrap();
        assert_eq!(settings.theme, ThemeChoice::Dark);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let file = toml_file("theme = \"neon\"\n");
        assert!(Settings::load_with_env(file.path(), no_env()).is_err());
    }
}
