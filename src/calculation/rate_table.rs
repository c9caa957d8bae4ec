//! Base rate lookup functionality.
//!
//! This module provides the [`RateTable`], the static mapping from a worker's
//! grade to the base hourly rate every coefficient is applied to.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Grade;

/// Base hourly rate per grade.
///
/// The table has one entry per [`Grade`], so [`RateTable::rate`] is total.
///
/// # Examples
///
/// ```
/// use shift_pay_engine::calculation::RateTable;
/// use shift_pay_engine::models::Grade;
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::default();
/// assert_eq!(rates.rate(Grade::Sergent), Decimal::new(1043, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateTable {
    sapeur: Decimal,
    caporal: Decimal,
    sergent: Decimal,
    lieutenant: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            sapeur: Decimal::new(861, 2),
            caporal: Decimal::new(924, 2),
            sergent: Decimal::new(1043, 2),
            lieutenant: Decimal::new(1296, 2),
        }
    }
}

impl RateTable {
    /// Builds a table from explicit rates, rejecting any rate that is not positive.
    pub fn new(
        sapeur: Decimal,
        caporal: Decimal,
        sergent: Decimal,
        lieutenant: Decimal,
    ) -> EngineResult<Self> {
        let table = Self {
            sapeur,
            caporal,
            sergent,
            lieutenant,
        };
        table.validate()?;
        Ok(table)
    }

    /// Returns the base hourly rate for a grade.
    pub fn rate(&self, grade: Grade) -> Decimal {
        match grade {
            Grade::Sapeur => self.sapeur,
            Grade::Caporal => self.caporal,
            Grade::Sergent => self.sergent,
            Grade::Lieutenant => self.lieutenant,
        }
    }

    /// Checks that every rate is strictly positive.
    pub fn validate(&self) -> EngineResult<()> {
        for grade in Grade::ALL {
            let rate = self.rate(grade);
            if rate <= Decimal::ZERO {
                return Err(EngineError::InvalidRate {
                    grade: grade.as_tag().to_string(),
                    rate: rate.to_string(),
                });
            }
        }
        Ok(())
    }
}
