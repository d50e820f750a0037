//! Configuration structs

mod app_config;

pub use app_config::{AppSettings, ConfigError, CorsConfig, Environment, RelayConfig, ServerConfig};
