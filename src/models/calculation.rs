//! Output of the amortization calculator

use serde::{Deserialize, Serialize};
use std::fmt;

use super::inputs::TariffInputs;

/// Round a figure for display, half to even
///
/// `-0.0` is folded into `0.0` so a rounded loss of less than half a unit
/// never prints as `-0`.
pub fn round_display(value: f64) -> f64 {
    value.round_ties_even() + 0.0
}

/// One month of the comparison, in display-rounded figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthRow {
    /// Month number, starting at 1
    pub month: u32,
    /// Total spent on the current tariff so far
    pub cumulative_old: f64,
    /// Total spent on the new tariff so far, connection cost included
    pub cumulative_new: f64,
    /// `cumulative_old - cumulative_new`, rounded from the raw totals
    pub savings: f64,
}

impl MonthRow {
    /// Whether the switch is still at a loss in this month
    ///
    /// Judged on the displayed figure so highlighting always agrees with
    /// the number a reader sees.
    pub fn is_loss(&self) -> bool {
        self.savings < 0.0
    }

    /// Cell texts in column order: month, old, new, savings
    pub fn cells(&self) -> [String; 4] {
        [
            self.month.to_string(),
            self.cumulative_old.to_string(),
            self.cumulative_new.to_string(),
            self.savings.to_string(),
        ]
    }
}

/// Month in which the switch pays for itself, if it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payback {
    /// First month with non-negative savings
    Month(u32),
    /// Savings stayed negative for the whole period
    NotReached,
}

impl Payback {
    /// Text stored in the history log for an unreached payback
    pub const NOT_REACHED: &'static str = "not reached";

    /// The payback month, if reached
    pub fn month(&self) -> Option<u32> {
        match self {
            Payback::Month(m) => Some(*m),
            Payback::NotReached => None,
        }
    }

    /// Parse the history log representation
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s == Self::NOT_REACHED {
            return Some(Payback::NotReached);
        }
        s.parse().ok().map(Payback::Month)
    }
}

impl From<Option<u32>> for Payback {
    fn from(month: Option<u32>) -> Self {
        month.map_or(Payback::NotReached, Payback::Month)
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payback::Month(m) => write!(f, "{}", m),
            Payback::NotReached => write!(f, "{}", Self::NOT_REACHED),
        }
    }
}

/// Full month-by-month comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Inputs the result was computed from
    pub inputs: TariffInputs,
    /// Number of months analysed
    pub months: u32,
    /// One row per month, in order
    pub rows: Vec<MonthRow>,
    /// First month with non-negative savings
    pub payback_month: Option<u32>,
    /// Final raw `cumulative_old - cumulative_new`, unrounded
    pub total_savings: f64,
}

impl CalculationResult {
    /// Payback as a history-friendly value
    pub fn payback(&self) -> Payback {
        self.payback_month.into()
    }

    /// Total savings rounded for display
    pub fn rounded_total_savings(&self) -> f64 {
        round_display(self.total_savings)
    }

    /// Months whose rows are flagged as a loss
    pub fn loss_months(&self) -> Vec<u32> {
        self.rows
            .iter()
            .filter(|row| row.is_loss())
            .map(|row| row.month)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_display_half_to_even() {
        assert_eq!(round_display(2.5), 2.0);
        assert_eq!(round_display(3.5), 4.0);
        assert_eq!(round_display(-2.5), -2.0);
        assert_eq!(round_display(1.2), 1.0);
    }

    #[test]
    fn test_round_display_folds_negative_zero() {
        let rounded = round_display(-0.4);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
        assert_eq!(rounded.to_string(), "0");
    }

    #[test]
    fn test_row_cells_have_no_fraction() {
        let row = MonthRow {
            month: 3,
            cumulative_old: 3000.0,
            cumulative_new: 4800.0,
            savings: -1800.0,
        };
        assert_eq!(row.cells(), ["3", "3000", "4800", "-1800"]);
        assert!(row.is_loss());
    }

    #[test]
    fn test_payback_text() {
        assert_eq!(Payback::Month(8).to_string(), "8");
        assert_eq!(Payback::NotReached.to_string(), "not reached");
        assert_eq!(Payback::parse("8"), Some(Payback::Month(8)));
        assert_eq!(Payback::parse("not reached"), Some(Payback::NotReached));
        assert_eq!(Payback::parse("soon"), None);
    }
}
