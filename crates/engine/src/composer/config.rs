//! Composer configuration via `tessera.toml`
//!
//! Two switches control how strictly contracts are synthesized and whether
//! synthesized layouts are shared. Both default to true, and an
//! empty file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tessera_core::{ComposeError, ComposeResult};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "tessera.toml";

/// Composition settings loaded from `tessera.toml`.
///
/// # Example
///
/// ```toml
/// # Fail when a contract declares value members composition cannot fill
/// strict_members = true
///
/// # Reuse one synthesized layout per contract type
/// cache_types = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Reject contracts with non-interface property members.
    ///
    /// When false, such members are left unimplemented with a warning.
    /// Method members are always rejected.
    #[serde(default = "default_true")]
    pub strict_members: bool,
    /// Share synthesized layouts through the type cache.
    ///
    /// When false, every composition synthesizes a fresh layout.
    #[serde(default = "default_true")]
    pub cache_types: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            strict_members: true,
            cache_types: true,
        }
    }
}

impl ComposerConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Tessera composer configuration
#
# strict_members: fail composition when a contract declares a value
# (non-interface) property that no registry service can fill (default: true).
# Set to false to leave such members unimplemented with a warning.
strict_members = true

# cache_types: synthesize each contract layout once per process and share it
# between composers (default: true).
cache_types = true
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::Config` if the text is not valid config TOML.
    pub fn from_toml_str(content: &str) -> ComposeResult<Self> {
        toml::from_str(content)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> ComposeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ComposeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            ComposeError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> ComposeResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                ComposeError::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> ComposeResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            ComposeError::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
