//! Pay computation engine for firefighter guard and standby shifts.
//!
//! This crate partitions a logged shift ("activity") into contiguous,
//! classified billing lines and prices them from the worker's grade rate and
//! per-classification coefficients. Interventions during a shift override the
//! shift's own classification, with separate night and Sunday rates.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
