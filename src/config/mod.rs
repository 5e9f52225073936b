//! Configuration layer for the homework bot.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Credentials from the environment and `.env` files ([`Credentials`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Tuning values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file**
//! 3. **Built-in defaults**
//!
//! # Credentials
//!
//! The three credentials are read only from the process environment, after
//! loading a `.env` file (or the file given by `--env-file`). Variables
//! already set in the environment win over the file. They never appear in
//! the TOML file or on the command line, so they stay out of shell history
//! and process listings.

mod cli;
mod credentials;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use credentials::{Credentials, load_env_file, var};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
