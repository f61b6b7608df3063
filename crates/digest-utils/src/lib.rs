//! Shared utilities for stock-digest
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and helpers for reading configuration from the process
//! environment.

pub mod config;
pub mod logging;

pub use config::{
    EnvError, env_list, env_or, optional_env, parse_env, parse_value, require_env, split_list,
};
pub use logging::init_tracing;
