//! Process-wide argument and global configuration documents.
//!
//! Both documents sit behind a single reader/writer lock. Writes are rare
//! (startup and argument parsing), so one coarse lock is enough; readers
//! proceed together and only block while a writer holds the lock.

use super::value::ConfigDocument;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Configuration tier, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Document attached to a watched root (never held by the store)
    Root = 0,
    /// Options supplied on the command line
    Argument = 1,
    /// Global config file
    Global = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Root => write!(f, "root"),
            ConfigTier::Argument => write!(f, "argument"),
            ConfigTier::Global => write!(f, "global"),
        }
    }
}

#[derive(Debug, Default)]
struct Documents {
    argument: Option<Arc<ConfigDocument>>,
    global: Option<Arc<ConfigDocument>>,
}

impl Documents {
    fn slot(&self, tier: ConfigTier) -> Option<&Arc<ConfigDocument>> {
        match tier {
            ConfigTier::Root => None,
            ConfigTier::Argument => self.argument.as_ref(),
            ConfigTier::Global => self.global.as_ref(),
        }
    }
}

/// Holder of the argument and global configuration documents.
///
/// Construct one per service (see [`ConfigStore::load_from_env`]) and pass it
/// by reference to consumers. Root documents are owned by their roots and
/// passed into the read API directly.
#[derive(Debug, Default)]
pub struct ConfigStore {
    documents: RwLock<Documents>,
}

impl ConfigStore {
    /// Create a store with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose global document starts as `global`.
    pub fn with_global(global: ConfigDocument) -> Self {
        Self {
            documents: RwLock::new(Documents {
                argument: None,
                global: Some(Arc::new(global)),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Documents> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Documents> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set an argument-tier option. Last write wins.
    pub fn set_argument(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        debug!(key = %name, "setting argument config");
        let mut docs = self.write();
        let doc = docs.argument.get_or_insert_with(Default::default);
        Arc::make_mut(doc).insert(name, value);
    }

    /// Set a global-tier option. Last write wins.
    pub fn set_global(&self, name: impl Into<String>, value: Value) {
        let name = name.into();
        debug!(key = %name, "setting global config");
        let mut docs = self.write();
        let doc = docs.global.get_or_insert_with(Default::default);
        Arc::make_mut(doc).insert(name, value);
    }

    /// Look up `name` in a single tier.
    ///
    /// The value is cloned out under the read lock. The root tier is not
    /// held here and always yields `None`.
    pub fn get_raw(&self, tier: ConfigTier, name: &str) -> Option<Value> {
        let docs = self.read();
        docs.slot(tier).and_then(|doc| doc.get(name)).cloned()
    }

    /// Shared reference to the current document of a tier.
    ///
    /// Later writes do not affect a snapshot already handed out.
    pub fn snapshot(&self, tier: ConfigTier) -> Option<Arc<ConfigDocument>> {
        self.read().slot(tier).cloned()
    }

    /// Release both documents. Safe to call repeatedly.
    pub fn shutdown(&self) {
        let mut docs = self.write();
        docs.argument = None;
        docs.global = None;
    }
}
