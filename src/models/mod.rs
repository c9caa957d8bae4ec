//! Core data models for the shift pay engine.
//!
//! This module contains all the domain models used throughout the engine.

mod activity;
mod calculation_result;
mod worker;

pub use activity::{
    Activity, ActivityStatus, ActivityType, Intervention, InterventionMotif, hours_between,
};
pub use calculation_result::{CalculationLine, CalculationResult, SubActivityType};
pub use worker::{
    CoefficientTable, Grade, MAX_COEFFICIENT, TimeSlot, Worker, WorkerConfig, WorkerSettings,
};
