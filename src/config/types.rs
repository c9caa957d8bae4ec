//! Configuration types for the shift pay engine.
//!
//! This module contains the structures deserialized from the YAML files of a
//! configuration directory and the resolved [`EngineConfig`] built from them.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calculation::RateTable;
use crate::models::{SubActivityType, TimeSlot, WorkerConfig};

/// Worker defaults file structure, as written in `worker_defaults.yaml`.
///
/// The coefficient map is kept raw so that a gap is reported as a
/// missing coefficient rather than as a YAML error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWorkerDefaults {
    /// Default daily on-site windows.
    pub on_site_slots: Vec<TimeSlot>,
    /// Default coefficient per sub-activity type.
    pub coefficients: HashMap<SubActivityType, Decimal>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Base hourly rate per grade.
    rates: RateTable,
    /// Configuration applied to every worker before their own settings.
    worker_defaults: WorkerConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(rates: RateTable, worker_defaults: WorkerConfig) -> Self {
        Self {
            rates,
            worker_defaults,
        }
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the default worker configuration.
    pub fn worker_defaults(&self) -> &WorkerConfig {
        &self.worker_defaults
    }
}
