//! Compilation parameters consumed by code contexts.
//!
//! Parameters are read from and written to TOML; every field is optional when reading and
//! falls back to its default.
//!
//! ```rust
//! # use rrcore::utils::conf::CompilationParameters;
//! let params = CompilationParameters::from_toml_str(r#"api_prefix = "libint2_""#).unwrap();
//! assert_eq!(params.api_prefix, "libint2_");
//! assert_eq!(params.library_handle, "inteval");
//! ```
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::utils::error::{RrError, RrResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilationParameters {
    /// Prefix prepended to the label of every generated function.
    pub api_prefix: String,
    /// Name of the evaluator object passed as first argument of every generated call.
    pub library_handle: String,
}

impl Default for CompilationParameters {
    fn default() -> Self {
        Self {
            api_prefix: String::new(),
            library_handle: "inteval".to_string(),
        }
    }
}

impl CompilationParameters {
    fn parse(source: &str, file: &str) -> RrResult<Self> {
        let params: Self = toml::from_str(source).map_err(|source| RrError::ConfigParse {
            source,
            file: file.to_string(),
        })?;
        debug!("Loaded compilation parameters from {}: {:?}", file, params);
        Ok(params)
    }

    /// Parse parameters from a TOML document.
    pub fn from_toml_str(source: &str) -> RrResult<Self> {
        Self::parse(source, "<string>")
    }

    /// Read and parse parameters from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> RrResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source, &path.display().to_string())
    }

    /// Render the parameters as a TOML document.
    pub fn to_toml_string(&self) -> RrResult<String> {
        toml::to_string(self).map_err(|source| RrError::ConfigSerialize { source })
    }

    /// Write the parameters to a TOML file, creating parent directories as needed.
    pub fn save_to_toml_file(&self, path: impl AsRef<Path>) -> RrResult<()> {
        let path = path.as_ref();
        let document = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, document)?;
        debug!("Saved compilation parameters to {}", path.display());
        Ok(())
    }
}
