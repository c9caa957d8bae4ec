//! Result aggregation.

use rust_decimal::Decimal;

use crate::models::{CalculationLine, CalculationResult};

/// Sums billing lines, in order, into a [`CalculationResult`].
///
/// The total is accumulated line by line in chronological order, so it is
/// exactly the sum of the emitted line totals.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::aggregate_lines;
/// use rust_decimal::Decimal;
///
/// let result = aggregate_lines(vec![]);
/// assert!(result.lines.is_empty());
/// assert_eq!(result.total_amount, Decimal::ZERO);
/// ```
pub fn aggregate_lines(lines: Vec<CalculationLine>) -> CalculationResult {
    let total_amount = lines
        .iter()
        .fold(Decimal::ZERO, |running, line| running + line.total);
    CalculationResult {
        lines,
        total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubActivityType;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(total: &str) -> CalculationLine {
        let at = NaiveDateTime::parse_from_str("2023-10-26 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        CalculationLine {
            description: "Astreinte CS".to_string(),
            sub_activity_type: SubActivityType::StandbyOnSite,
            duration_hours: Decimal::ONE,
            rate: dec("10.43"),
            coefficient: dec("0.35"),
            bonus: Decimal::ONE,
            total: dec(total),
            start: at,
            end: at,
            intervention_id: None,
        }
    }

    #[test]
    fn test_total_equals_sum_of_lines() {
        let result = aggregate_lines(vec![line("27.118"), line("7.301"), line("0.001")]);
        assert_eq!(result.total_amount, dec("34.420"));
        assert_eq!(result.lines.len(), 3);
    }
}
