//! Layered configuration.
//!
//! Resolves options from three tiers, highest precedence first:
//! 1. **Root** - the `.watchmanconfig` document of a watched root
//! 2. **Argument** - options supplied on the command line
//! 3. **Global** - the file named by `WATCHMAN_CONFIG_FILE`
//!
//! The first tier holding a key supplies its whole value.
//!
//! ## Environment Variables
//! - `WATCHMAN_CONFIG_FILE` - Global config file (empty disables loading)

mod loader;
mod resolve;
mod root_files;
mod store;
mod value;

pub use loader::{CONFIG_FILE_ENV, global_config_path, load_root_config, read_document};
pub use resolve::DEFAULT_TROUBLE_URL;
pub use root_files::{
    DEFAULT_ROOT_FILES, ENFORCE_ROOT_FILES_KEY, ROOT_FILES_KEY, ROOT_RESTRICT_FILES_KEY, RootFiles,
    WATCHMANCONFIG,
};
pub use store::{ConfigStore, ConfigTier};
pub use value::{ConfigDocument, as_string_array, parse_option};
