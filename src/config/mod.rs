//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, InvitationConfig, LogFormat, LoggingConfig, PostgresSettings,
    ServerConfig, StorageConfig,
};
