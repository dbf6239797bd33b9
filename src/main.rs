//! watchman-config
//!
//! Resolves the effective configuration of a watchman-style file watcher
//! from root, command-line and global sources.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};
use watchman_config::cli::{Cli, Command, ValueType};
use watchman_config::config::{ConfigDocument, ConfigStore, ConfigTier, load_root_config};
use watchman_config::error::exit_on_mismatch;
use watchman_config::logging::{self, LogTarget};

fn parse_default<T: std::str::FromStr>(default: Option<&str>, kind: &str) -> Result<Option<T>> {
    default
        .map(|raw| {
            raw.parse::<T>()
                .ok()
                .with_context(|| format!("--default must be {kind}, got '{raw}'"))
        })
        .transpose()
}

fn get(
    store: &ConfigStore,
    root: Option<&ConfigDocument>,
    name: &str,
    value_type: ValueType,
    default: Option<&str>,
) -> Result<Value> {
    let value = match value_type {
        ValueType::Json => match store.get_json(root, name) {
            Some(value) => value,
            None => default
                .map(|raw| serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw)))
                .unwrap_or(Value::Null),
        },
        ValueType::String => {
            Value::from(exit_on_mismatch(store.get_string(root, name, default.unwrap_or(""))))
        }
        ValueType::Int => {
            let default = parse_default(default, "an integer")?.unwrap_or(0);
            Value::from(exit_on_mismatch(store.get_int(root, name, default)))
        }
        ValueType::Bool => {
            let default = parse_default(default, "a boolean")?.unwrap_or(false);
            Value::from(exit_on_mismatch(store.get_bool(root, name, default)))
        }
        ValueType::Double => {
            let default = parse_default(default, "a number")?.unwrap_or(0.0);
            Value::from(exit_on_mismatch(store.get_double(root, name, default)))
        }
    };
    Ok(value)
}

fn run(store: &ConfigStore, root: Option<&ConfigDocument>, command: &Command) -> Result<()> {
    match command {
        Command::Get {
            name,
            value_type,
            default,
        } => match get(store, root, name, *value_type, default.as_deref())? {
            Value::String(s) => println!("{s}"),
            other => println!("{other}"),
        },
        Command::RootFiles => {
            let files = exit_on_mismatch(store.compute_root_files());
            println!("{}", serde_json::to_string(&files)?);
        }
        Command::TroubleUrl => {
            println!("{}", exit_on_mismatch(store.get_trouble_url()));
        }
        Command::Dump => {
            let document = |tier| {
                store
                    .snapshot(tier)
                    .map(|doc| Value::Object(ConfigDocument::clone(&doc)))
            };
            let dump = json!({
                "argument": document(ConfigTier::Argument),
                "global": document(ConfigTier::Global),
            });
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    // --config-file replaces the WATCHMAN_CONFIG_FILE lookup
    let store = match &cli.config_file {
        Some(path) => ConfigStore::load_from_path(path),
        None => ConfigStore::load_from_env(),
    };

    for (name, value) in &cli.options {
        store.set_argument(name.as_str(), value.clone());
    }

    let root = cli.root.as_deref().and_then(load_root_config);

    let result = run(&store, root.as_ref(), &cli.command);
    store.shutdown();
    result
}
