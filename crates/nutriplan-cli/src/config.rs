//! Optional TOML settings file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings read from `config.toml`. Command line flags win over these.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page of the base document the nutrition pages follow.
    pub insert_after: Option<usize>,
    /// Stylesheet replacing the built-in one.
    pub stylesheet: Option<PathBuf>,
    /// Image drawn behind every page, as a CSS `url()` target.
    pub background: Option<String>,
    /// File with the system prompt for `generate`.
    pub system_prompt_file: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/nutriplan/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nutriplan").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load a file. Relative paths inside it are taken from its directory.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(match path.parent() {
            Some(dir) => config.relative_to(dir),
            None => config,
        })
    }

    /// Parse TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn relative_to(mut self, dir: &Path) -> Self {
        self.stylesheet = self.stylesheet.map(|p| dir.join(p));
        self.system_prompt_file = self.system_prompt_file.map(|p| dir.join(p));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_all_keys() {
        let config = Config::from_toml(
            r#"
insert_after = 7
stylesheet = "print.css"
background = "bg.png"
system_prompt_file = "prompt.md"
"#,
        )
        .unwrap();

        assert_eq!(config.insert_after, Some(7));
        assert_eq!(config.stylesheet, Some(PathBuf::from("print.css")));
        assert_eq!(config.background.as_deref(), Some("bg.png"));
        assert_eq!(config.system_prompt_file, Some(PathBuf::from("prompt.md")));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_toml("insert_afterr = 3").is_err());
    }

    #[test]
    fn test_load_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "stylesheet = \"print.css\"\nbackground = \"bg.png\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.stylesheet, Some(dir.path().join("print.css")));
        // Background is a CSS url and is passed through untouched.
        assert_eq!(config.background.as_deref(), Some("bg.png"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
