//! Configuration for the `analyze` command: an optional TOML file, `-S`
//! overrides and command-line flags merged over built-in defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
