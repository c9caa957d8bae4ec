//! Request types for the shift pay engine API.
//!
//! This module defines the JSON request structures for the calculation,
//! intervention pricing and summary endpoints.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Activity, Grade, Intervention, WorkerSettings};

/// Worker information in a request.
///
/// The worker's settings are merged onto the server's configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// Unique identifier for the worker.
    pub id: String,
    /// The worker's grade.
    pub grade: Grade,
    /// The worker's own pay settings, if any.
    #[serde(default)]
    pub settings: Option<WorkerSettings>,
}

/// Request body for the `/activities/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The worker who performed the activity.
    pub worker: WorkerRequest,
    /// The activity to price.
    pub activity: Activity,
}

/// Request body for the `/interventions/price` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionPriceRequest {
    /// The worker who performed the intervention.
    pub worker: WorkerRequest,
    /// The intervention to price.
    pub intervention: Intervention,
}

/// Request body for the `/activities/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// The worker who performed the activities.
    pub worker: WorkerRequest,
    /// The activities to summarize.
    pub activities: Vec<Activity>,
    /// Optional `YYYY-MM` filter; only activities starting in that month count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl SummaryRequest {
    /// Parses the month filter into `(year, month)`.
    ///
    /// Returns `Ok(None)` when no filter was given and `Err` with a message
    /// when the filter is not a `YYYY-MM` month.
    pub fn month_filter(&self) -> Result<Option<(i32, u32)>, String> {
        let Some(month) = self.month.as_deref() else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
            .map(|date| Some((date.year(), date.month())))
            .map_err(|_| format!("invalid month '{}': expected YYYY-MM", month))
    }
}
