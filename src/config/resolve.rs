//! Precedence resolution and typed accessors.
//!
//! A key is looked up in the root document first, then the argument
//! document, then the global document. The first tier holding the key
//! supplies the whole value; tiers are never merged field by field.

use super::store::{ConfigStore, ConfigTier};
use super::value::ConfigDocument;
use crate::error::{ConfigError, ConfigResult, ValueKind};
use serde_json::Value;
use tracing::trace;

/// Fallback troubleshooting link shown in diagnostics.
pub const DEFAULT_TROUBLE_URL: &str =
    "https://facebook.github.io/watchman/docs/troubleshooting.html";

impl ConfigStore {
    /// Resolve `name` and report which tier supplied it.
    ///
    /// `root` is read without locking; the caller keeps it stable for the
    /// duration of the call.
    pub fn resolve(
        &self,
        root: Option<&ConfigDocument>,
        name: &str,
    ) -> Option<(ConfigTier, Value)> {
        if let Some(value) = root.and_then(|doc| doc.get(name)) {
            return Some((ConfigTier::Root, value.clone()));
        }

        [ConfigTier::Argument, ConfigTier::Global]
            .into_iter()
            .find_map(|tier| self.get_raw(tier, name).map(|value| (tier, value)))
    }

    /// Effective raw value for `name`, or `None` if no tier sets it.
    pub fn get_json(&self, root: Option<&ConfigDocument>, name: &str) -> Option<Value> {
        let (tier, value) = self.resolve(root, name)?;
        trace!(key = name, %tier, "resolved config value");
        Some(value)
    }

    pub fn get_string(
        &self,
        root: Option<&ConfigDocument>,
        name: &str,
        default: &str,
    ) -> ConfigResult<String> {
        match self.get_json(root, name) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(ConfigError::type_mismatch(name, ValueKind::String)),
        }
    }

    /// Integer option. Values outside the `i64` range count as mismatches.
    pub fn get_int(
        &self,
        root: Option<&ConfigDocument>,
        name: &str,
        default: i64,
    ) -> ConfigResult<i64> {
        match self.get_json(root, name) {
            None => Ok(default),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| ConfigError::type_mismatch(name, ValueKind::Integer)),
        }
    }

    pub fn get_bool(
        &self,
        root: Option<&ConfigDocument>,
        name: &str,
        default: bool,
    ) -> ConfigResult<bool> {
        match self.get_json(root, name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(b),
            Some(_) => Err(ConfigError::type_mismatch(name, ValueKind::Boolean)),
        }
    }

    /// Numeric option. Both integers and reals are accepted.
    pub fn get_double(
        &self,
        root: Option<&ConfigDocument>,
        name: &str,
        default: f64,
    ) -> ConfigResult<f64> {
        match self.get_json(root, name) {
            None => Ok(default),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| ConfigError::type_mismatch(name, ValueKind::Number)),
        }
    }

    /// URL users are pointed at when something goes wrong.
    pub fn get_trouble_url(&self) -> ConfigResult<String> {
        self.get_string(None, "troubleshooting_url", DEFAULT_TROUBLE_URL)
    }
}
