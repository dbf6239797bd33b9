//! Loading configuration documents from disk.
//!
//! Missing files are not errors. Unreadable or malformed files are logged
//! and treated as absent so startup always continues.

use super::root_files::WATCHMANCONFIG;
use super::store::ConfigStore;
use super::value::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Environment variable naming the global config file.
pub const CONFIG_FILE_ENV: &str = "WATCHMAN_CONFIG_FILE";

/// Global config file path baked in at build time, if any.
const BUILTIN_CONFIG_FILE: Option<&str> = option_env!("WATCHMAN_CONFIG_FILE");

/// Path of the global config file.
///
/// The environment wins over the built-in default. An empty value in
/// either place disables loading.
pub fn global_config_path() -> Option<PathBuf> {
    select_config_path(std::env::var_os(CONFIG_FILE_ENV), BUILTIN_CONFIG_FILE)
}

// Paths are taken as raw OS strings; they need not be UTF-8.
fn select_config_path(from_env: Option<OsString>, builtin: Option<&str>) -> Option<PathBuf> {
    from_env
        .or_else(|| builtin.map(OsString::from))
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Read a JSON object document.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> ConfigResult<Option<ConfigDocument>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(doc)) => Ok(Some(doc)),
        Ok(_) => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read a document, logging and discarding any failure.
fn load_document(path: &Path) -> Option<ConfigDocument> {
    match read_document(path) {
        Ok(Some(doc)) => {
            debug!(path = %path.display(), keys = doc.len(), "loaded config file");
            Some(doc)
        }
        Ok(None) => None,
        Err(err) => {
            error!(error = %err, "ignoring config file");
            None
        }
    }
}

/// Load the `.watchmanconfig` document of a watched root directory.
pub fn load_root_config(root_dir: &Path) -> Option<ConfigDocument> {
    load_document(&root_dir.join(WATCHMANCONFIG))
}

impl ConfigStore {
    /// Create a store, loading the global document named by
    /// `WATCHMAN_CONFIG_FILE`.
    pub fn load_from_env() -> Self {
        match global_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Self::new(),
        }
    }

    /// Create a store whose global document is loaded from `path`.
    ///
    /// The global document stays absent if the file is missing or invalid.
    pub fn load_from_path(path: &Path) -> Self {
        match load_document(path) {
            Some(doc) => Self::with_global(doc),
            None => Self::new(),
        }
    }
}
