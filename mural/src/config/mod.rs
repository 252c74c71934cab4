pub mod app_config;
pub mod logger_config;

pub use app_config::{AppConfig, AppConfigBuilder, SharedConfig};
pub use logger_config::LoggerConfig;
