//! `tapestry.toml` configuration.
//!
//! Lookup order: an explicit `--config` path, `./tapestry.toml`, then
//! `tapestry/tapestry.toml` under the platform config directory. When none
//! exists the defaults apply. Command-line flags override file values.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tapestry_codegen::{GenerateOptions, TargetFormat};
use tapestry_editor::DEFAULT_HISTORY_CAPACITY;

pub const FILE_NAME: &str = "tapestry.toml";

const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Defaults for `tapestry generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub target: TargetFormat,
    pub separate_stylesheet: bool,
    pub minify: bool,
    pub app_name: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        let options = GenerateOptions::default();
        Self {
            target: options.target,
            separate_stylesheet: options.separate_stylesheet,
            minify: options.minify,
            app_name: None,
        }
    }
}

impl GenerateConfig {
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            target: self.target,
            separate_stylesheet: self.separate_stylesheet,
            minify: self.minify,
            screen_name: None,
            app_name: self.app_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Undo steps kept by the mutation engine; 0 disables history.
    pub history_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Saved template directory. Defaults to `templates/` in the config dir.
    pub templates: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generate: GenerateConfig,
    pub editor: EditorConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Platform config directory for Tapestry, e.g. `~/.config/tapestry`.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("tapestry");
        Ok(dir)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Find and load the configuration. Also returns the file it came from.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path)?, Some(path.to_path_buf())));
        }

        let mut candidates = vec![PathBuf::from(FILE_NAME)];
        if let Ok(dir) = Self::config_dir() {
            candidates.push(dir.join(FILE_NAME));
        }
        for path in candidates {
            if path.is_file() {
                return Ok((Self::load_from(&path)?, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<()> {
        if self.editor.history_capacity > MAX_HISTORY_CAPACITY {
            bail!(
                "editor.history_capacity must be at most {}, got {}",
                MAX_HISTORY_CAPACITY,
                self.editor.history_capacity
            );
        }
        if let Some(name) = &self.generate.app_name {
            if name.trim().is_empty() {
                bail!("generate.app_name must not be blank");
            }
        }
        Ok(())
    }

    pub fn templates_dir(&self) -> Result<PathBuf> {
        match &self.store.templates {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("templates")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.generate.separate_stylesheet);
        assert_eq!(config.editor.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn test_parse_all_sections() {
        let config = Config::from_toml(
            r#"
[generate]
target = "flutter"
separate_stylesheet = false
minify = true
app_name = "Shop"

[editor]
history_capacity = 20

[store]
templates = "/tmp/templates"
"#,
        )
        .unwrap();

        assert_eq!(config.generate.target, TargetFormat::Flutter);
        let options = config.generate.options();
        assert!(!options.separate_stylesheet);
        assert!(options.minify);
        assert_eq!(options.app_name.as_deref(), Some("Shop"));
        assert_eq!(config.editor.history_capacity, 20);
        assert_eq!(config.templates_dir().unwrap(), PathBuf::from("/tmp/templates"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_toml("[generate]\ntarget = \"swiftui\"\n").is_err());
        assert!(Config::from_toml("[editor]\nhistory_capacity = 1000000\n").is_err());
        assert!(Config::from_toml("[generate]\napp_name = \"  \"\n").is_err());
        assert!(Config::from_toml("[render]\nfps = 60\n").is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[generate]\ntarget = \"react-native-ts\"\n").unwrap();

        let (config, source) = Config::resolve(Some(&path)).unwrap();
        assert_eq!(config.generate.target, TargetFormat::ReactNativeTs);
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::resolve(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
