//! Tool configuration, loaded from a TOML file.

mod config;

pub use config::{Config, DEFAULT_CONFIG_TOML, DashboardConfig, GithubConfig, StoreConfig};
