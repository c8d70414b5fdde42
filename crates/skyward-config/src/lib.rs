//! Configuration system for Skyward.
//!
//! Sky geometry, asset location, and demo driver settings, persisted as a
//! RON file in the platform config directory. Missing fields fall back to
//! their defaults and clap flags override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AssetsConfig, Config, DebugConfig, DemoConfig, SkyConfig, default_config_dir};
pub use error::ConfigError;
