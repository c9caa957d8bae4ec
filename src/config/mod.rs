//! Configuration loading for the shift pay engine.
//!
//! This module loads the grade rate table and the default worker
//! configuration from YAML files, and resolves workers by merging their own
//! settings onto those defaults.
//!
//! # Example
//!
//! ```no_run
//! use shift_pay_engine::config::ConfigLoader;
//! use shift_pay_engine::models::Grade;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Sapeur rate: {}", config.rates().rate(Grade::Sapeur));
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, RawWorkerDefaults};
