//! Watchman Config Library
//!
//! Layered configuration resolution, typed accessors and the root-marker
//! policy for a file-watching service.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
