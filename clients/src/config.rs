//! Client configuration.
//!
//! Every setting has a default, so the file is optional. When `--config` is
//! not given, `ontochange.toml` in the working directory is used if present.
//! Command-line flags override file values.
//!
//! ```toml
//! log_level = "debug"
//! minimise = true
//! author = "alice"
//! out = "public"
//! changes_dir = "changes"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "ontochange.toml";

/// Settings shared by the client binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Minimise each change list before applying it.
    pub minimise: bool,
    /// Author recorded on revisions.
    pub author: String,
    /// Output directory for serialized ontologies and history.
    pub out: PathBuf,
    /// Directory scanned by the conformance suite.
    pub changes_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            minimise: false,
            author: "anonymous".to_owned(),
            out: PathBuf::from("public"),
            changes_dir: PathBuf::from("changes"),
        }
    }
}

impl Config {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown key.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Loads the configuration from `explicit`, or from [`CONFIG_FILE`] in
    /// the working directory when it exists, or falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or if the chosen file
    /// cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let implicit = PathBuf::from(CONFIG_FILE);
                if !implicit.is_file() {
                    return Ok(Self::default());
                }
                implicit
            }
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
