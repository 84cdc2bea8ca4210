use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{Config, ValidationResult};

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, validation) = Config::load_validated()?;
        Ok(Self {
            config: Arc::new(config),
            validation,
        })
    }

    /// Create an application around an already-built configuration
    pub fn with_config(config: Config) -> Self {
        let validation = config.validate();
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Prepare the data directory
    pub fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.config.config_dir)
            .with_context(|| format!("Failed to create {}", self.config.config_dir.display()))?;

        tracing::info!(
            config_dir = %self.config.config_dir.display(),
            warnings = self.validation.warnings.len(),
            "Application initialized"
        );
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle for long-lived services
    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn database_path(&self) -> PathBuf {
        self.config.database_path()
    }
}
