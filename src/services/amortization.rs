//! Amortization calculator
//!
//! Compares the running cost of staying on the current tariff against
//! switching to a new one that carries an up-front connection cost.

use crate::models::{round_display, CalculationResult, MonthRow, TariffInputs};

/// Compute the month-by-month comparison for a set of inputs
///
/// The new-tariff total starts at the connection cost; both totals then grow
/// by their monthly rate. Rows hold display-rounded figures while the payback
/// test and the final total use the raw running totals.
pub fn calculate(inputs: &TariffInputs) -> CalculationResult {
    let months = inputs.months();

    let mut cumulative_old = 0.0_f64;
    let mut cumulative_new = inputs.connection_cost;
    let mut payback_month = None;
    let mut rows = Vec::with_capacity(months as usize);

    for month in 1..=months {
        cumulative_old += inputs.current_rate;
        cumulative_new += inputs.new_rate;
        let savings = cumulative_old - cumulative_new;

        rows.push(MonthRow {
            month,
            cumulative_old: round_display(cumulative_old),
            cumulative_new: round_display(cumulative_new),
            savings: round_display(savings),
        });

        if payback_month.is_none() && savings >= 0.0 {
            payback_month = Some(month);
        }
    }

    CalculationResult {
        inputs: *inputs,
        months,
        rows,
        payback_month,
        total_savings: cumulative_old - cumulative_new,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_inputs() -> TariffInputs {
        TariffInputs::new(1000.0, 600.0, 3000.0, 1.0)
    }

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&reference_inputs());

        assert_eq!(result.months, 12);
        assert_eq!(result.rows.len(), 12);

        let first = result.rows[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.cumulative_old, 1000.0);
        assert_eq!(first.cumulative_new, 3600.0);
        assert_eq!(first.savings, -2600.0);

        assert_eq!(result.payback_month, Some(8));
        let payback_row = result.rows[7];
        assert_eq!(payback_row.cumulative_old, 8000.0);
        assert_eq!(payback_row.cumulative_new, 7800.0);
        assert_eq!(payback_row.savings, 200.0);

        assert_relative_eq!(result.total_savings, 1800.0);
    }

    #[test]
    fn test_rows_numbered_in_order() {
        let result = calculate(&TariffInputs::new(10.0, 5.0, 1.0, 2.5));

        assert_eq!(result.rows.len(), 30);
        for (idx, row) in result.rows.iter().enumerate() {
            assert_eq!(row.month as usize, idx + 1);
        }
    }

    #[test]
    fn test_zero_period() {
        let result = calculate(&TariffInputs::new(1000.0, 600.0, 3000.0, 0.0));

        assert!(result.rows.is_empty());
        assert_eq!(result.payback_month, None);
        assert_eq!(result.total_savings, -3000.0);
    }

    #[test]
    fn test_payback_not_reached() {
        // new tariff is more expensive, never pays back
        let result = calculate(&TariffInputs::new(500.0, 700.0, 100.0, 1.0));

        assert_eq!(result.payback_month, None);
        assert_eq!(result.loss_months().len(), 12);
    }

    #[test]
    fn test_payback_in_first_month_without_connection_cost() {
        let result = calculate(&TariffInputs::new(500.0, 400.0, 0.0, 1.0));
        assert_eq!(result.payback_month, Some(1));
    }

    #[test]
    fn test_payback_is_first_non_negative_month() {
        let result = calculate(&TariffInputs::new(730.5, 512.25, 1999.99, 4.0));

        // 218.25/month saved against 1999.99 up front
        assert_eq!(result.payback_month, Some(10));
        assert!(result.rows[8].is_loss());
        assert!(!result.rows[9].is_loss());
        assert!(result.rows[10..].iter().all(|row| !row.is_loss()));
    }

    #[test]
    fn test_total_uses_raw_totals() {
        // every row rounds .5 figures, the total must not inherit that
        let inputs = TariffInputs::new(100.5, 50.25, 10.1, 1.0);
        let result = calculate(&inputs);

        let raw_old = 100.5 * 12.0;
        let raw_new = 10.1 + 50.25 * 12.0;
        assert_relative_eq!(result.total_savings, raw_old - raw_new, epsilon = 1e-9);

        let last = result.rows.last().unwrap();
        assert_ne!(last.savings, result.total_savings);
    }

    #[test]
    fn test_calculation_is_pure() {
        let inputs = TariffInputs::new(812.4, 640.0, 2500.0, 3.25);
        assert_eq!(calculate(&inputs), calculate(&inputs));
    }
}
