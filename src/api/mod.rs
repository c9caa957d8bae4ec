//! HTTP API module for the shift pay engine.
//!
//! This module exposes the engine over JSON: pricing an activity, pricing a
//! single intervention and summarizing a set of activities.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, InterventionPriceRequest, SummaryRequest, WorkerRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
