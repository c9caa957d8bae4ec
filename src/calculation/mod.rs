//! Calculation logic for the shift pay engine.
//!
//! This module contains the base rate table, the instant classifier,
//! breakpoint segmentation of an interval, the pay accumulator that turns
//! segments into coalesced billing lines, result aggregation, standalone
//! intervention pricing and period summaries.

mod accumulator;
mod aggregator;
mod classifier;
mod intervention_pay;
mod rate_table;
mod segmentation;
mod summary;

pub use accumulator::{LINE_BONUS, calculate_activity_pay};
pub use aggregator::aggregate_lines;
pub use classifier::{
    NIGHT_END_HOUR, NIGHT_START_HOUR, classify, classify_intervention_instant,
    classify_shift_instant, find_intervention, is_night, is_sunday_or_holiday,
};
pub use intervention_pay::{InterventionPayResult, price_intervention};
pub use rate_table::RateTable;
pub use segmentation::{ShiftSegment, breakpoints, segment_interval};
pub use summary::{ActivityEarnings, ActivitySummary, InterventionSummary, summarize_activities};
