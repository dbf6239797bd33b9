//! Root-marker policy.
//!
//! Computes the ordered list of filenames whose presence marks a directory
//! as a project root, and whether watches are restricted to such
//! directories. The list is resolved from the argument and global tiers
//! only; root documents cannot widen or narrow it.

use super::store::ConfigStore;
use super::value::as_string_array;
use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use tracing::{debug, error};

/// Marker filename that must lead every computed list.
pub const WATCHMANCONFIG: &str = ".watchmanconfig";

/// Version-control markers used when nothing is configured.
pub const DEFAULT_ROOT_FILES: [&str; 3] = [".hg", ".git", ".svn"];

pub const ROOT_FILES_KEY: &str = "root_files";
pub const ROOT_RESTRICT_FILES_KEY: &str = "root_restrict_files";
pub const ENFORCE_ROOT_FILES_KEY: &str = "enforce_root_files";

// Undocumented; suppresses the leading .watchmanconfig on the legacy and
// default paths only.
const IGNORE_WATCHMANCONFIG_KEY: &str = "_ignore_watchmanconfig";

/// Effective root-marker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootFiles {
    /// Ordered marker filenames, or `None` when the configuration was rejected
    #[serde(rename = "root_files")]
    pub markers: Option<Vec<String>>,
    /// Whether watches are only allowed on directories holding a marker
    pub enforcing: bool,
}

impl RootFiles {
    /// Result used when the configured list is malformed: no markers and
    /// no enforcement.
    fn rejected(err: &ConfigError) -> Self {
        error!(error = %err, "ignoring root marker configuration");
        Self {
            markers: None,
            enforcing: false,
        }
    }
}

/// Ensure `.watchmanconfig` is the first element.
fn prepend_watchmanconfig(markers: &mut Vec<String>) {
    if markers.first().map(String::as_str) != Some(WATCHMANCONFIG) {
        markers.insert(0, WATCHMANCONFIG.to_string());
    }
}

fn string_array(key: &str, value: &serde_json::Value, reason: &str) -> ConfigResult<Vec<String>> {
    as_string_array(value).ok_or_else(|| ConfigError::schema(key, reason))
}

impl ConfigStore {
    /// Compute the effective root markers and enforcement flag.
    ///
    /// A malformed `root_files` or `root_restrict_files` is logged and
    /// yields no markers with enforcement off. A non-boolean
    /// `enforce_root_files` or `_ignore_watchmanconfig` is a type mismatch
    /// and is returned as an error.
    pub fn compute_root_files(&self) -> ConfigResult<RootFiles> {
        let ignore_watchmanconfig = self.get_bool(None, IGNORE_WATCHMANCONFIG_KEY, false)?;
        let enforcing = self.get_bool(None, ENFORCE_ROOT_FILES_KEY, false)?;

        if let Some(value) = self.get_json(None, ROOT_FILES_KEY) {
            let mut markers = match string_array(
                ROOT_FILES_KEY,
                &value,
                "must be an array of strings",
            ) {
                Ok(markers) => markers,
                Err(err) => return Ok(RootFiles::rejected(&err)),
            };
            prepend_watchmanconfig(&mut markers);
            debug!(?markers, enforcing, "using root_files");
            return Ok(RootFiles {
                markers: Some(markers),
                enforcing,
            });
        }

        if let Some(value) = self.get_json(None, ROOT_RESTRICT_FILES_KEY) {
            let mut markers = match string_array(
                ROOT_RESTRICT_FILES_KEY,
                &value,
                "is deprecated and must be an array of strings",
            ) {
                Ok(markers) => markers,
                Err(err) => return Ok(RootFiles::rejected(&err)),
            };
            if !ignore_watchmanconfig {
                prepend_watchmanconfig(&mut markers);
            }
            debug!(?markers, "using legacy root_restrict_files");
            return Ok(RootFiles {
                markers: Some(markers),
                enforcing: true,
            });
        }

        let mut markers: Vec<String> = DEFAULT_ROOT_FILES.iter().map(|s| s.to_string()).collect();
        if !ignore_watchmanconfig {
            prepend_watchmanconfig(&mut markers);
        }
        Ok(RootFiles {
            markers: Some(markers),
            enforcing: false,
        })
    }
}
