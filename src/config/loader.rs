//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate table
//! and worker defaults from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{CoefficientTable, Grade, Worker, WorkerConfig, WorkerSettings};

use super::types::{EngineConfig, RawWorkerDefaults};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rates.yaml            # Base hourly rate per grade
/// └── worker_defaults.yaml  # Default on-site slots and coefficients
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_pay_engine::config::ConfigLoader;
/// use shift_pay_engine::models::{Grade, WorkerSettings};
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let worker = loader
///     .resolve_worker("user-1", Grade::Sergent, &WorkerSettings::default())
///     .unwrap();
/// println!("Sergent rate: {}", loader.rates().rate(worker.grade));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rate is not positive, or the coefficient table is incomplete or negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates = Self::load_yaml::<RateTable>(&path.join("rates.yaml"))?;
        rates.validate()?;

        let raw_defaults = Self::load_yaml::<RawWorkerDefaults>(&path.join("worker_defaults.yaml"))?;
        let worker_defaults = WorkerConfig {
            on_site_slots: raw_defaults.on_site_slots,
            coefficients: CoefficientTable::try_from(raw_defaults.coefficients)?,
        };

        Ok(Self {
            config: EngineConfig::new(rates, worker_defaults),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        self.config.rates()
    }

    /// Returns the default worker configuration.
    pub fn worker_defaults(&self) -> &WorkerConfig {
        self.config.worker_defaults()
    }

    /// Builds a worker by merging their settings onto the loaded defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay_engine::config::ConfigLoader;
    /// use shift_pay_engine::models::{Grade, SubActivityType, WorkerSettings};
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::default();
    /// let mut settings = WorkerSettings::default();
    /// settings.coefficients.insert(SubActivityType::Training, Decimal::new(12, 1));
    ///
    /// let worker = loader.resolve_worker("user-1", Grade::Caporal, &settings)?;
    /// assert_eq!(worker.config.coefficients.get(SubActivityType::Training), Decimal::new(12, 1));
    /// # Ok::<(), shift_pay_engine::error::EngineError>(())
    /// ```
    pub fn resolve_worker(
        &self,
        id: &str,
        grade: Grade,
        settings: &WorkerSettings,
    ) -> EngineResult<Worker> {
        Ok(Worker {
            id: id.to_string(),
            grade,
            config: self.worker_defaults().merged_with(settings)?,
        })
    }
}
