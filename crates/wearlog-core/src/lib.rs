pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{
    Config, LocationConfig, LocationMode, StorageConfig, UserConfig, ValidationResult,
    WeatherConfig,
};
pub use error::{AppError, ConfigError, DatabaseError, RusqliteErrorExt, WeatherError};

use anyhow::Result;

/// Initialize logging. `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("wearlog core initialized");
    Ok(())
}
