//! Error types for the shift pay engine.
//!
//! Every failure the engine can report is a local precondition or configuration
//! failure. There is no I/O in the calculation path, so nothing here is retryable.

use thiserror::Error;

/// The main error type for the shift pay engine.
///
/// # Example
///
/// ```
/// use shift_pay_engine::error::EngineError;
///
/// let error = EngineError::UnknownGrade {
///     grade: "brigadier".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown grade: brigadier");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A grade tag did not name any known grade.
    #[error("Unknown grade: {grade}")]
    UnknownGrade {
        /// The unrecognised grade text.
        grade: String,
    },

    /// A configured hourly rate was not strictly positive.
    #[error("Invalid hourly rate for grade '{grade}': {rate}")]
    InvalidRate {
        /// The grade whose rate is invalid.
        grade: String,
        /// The offending rate.
        rate: String,
    },

    /// A time slot did not satisfy `start < end`.
    #[error("Invalid time slot {start}-{end}: start must be before end")]
    InvalidTimeSlot {
        /// Slot start as HH:MM.
        start: String,
        /// Slot end as HH:MM.
        end: String,
    },

    /// A coefficient table did not cover every sub-activity type.
    #[error("Missing coefficient for sub-activity '{sub_activity}'")]
    MissingCoefficient {
        /// The sub-activity type with no coefficient.
        sub_activity: String,
    },

    /// A coefficient was negative or above the ceiling.
    #[error("Invalid coefficient for sub-activity '{sub_activity}': {value}")]
    InvalidCoefficient {
        /// The sub-activity type the coefficient belongs to.
        sub_activity: String,
        /// The offending value.
        value: String,
    },

    /// An activity interval was malformed.
    #[error("Invalid activity '{activity_id}': {message}")]
    InvalidActivity {
        /// The ID of the invalid activity.
        activity_id: String,
        /// A description of what made the activity invalid.
        message: String,
    },

    /// An intervention interval was malformed or escaped its parent activity.
    #[error("Invalid intervention '{intervention_id}': {message}")]
    InvalidIntervention {
        /// The ID of the invalid intervention.
        intervention_id: String,
        /// A description of what made the intervention invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
