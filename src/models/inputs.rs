//! The four figures collected by the wizard

use serde::{Deserialize, Serialize};

/// Inputs of one tariff comparison
///
/// Rates are monthly charges; the connection cost is paid once up front on
/// the new tariff. No sign checks are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TariffInputs {
    /// Monthly charge on the current tariff
    pub current_rate: f64,
    /// Monthly charge on the new tariff
    pub new_rate: f64,
    /// One-off cost of switching to the new tariff
    pub connection_cost: f64,
    /// Analysis period in years (may be fractional)
    pub period_years: f64,
}

impl TariffInputs {
    /// Create a new set of inputs
    pub fn new(current_rate: f64, new_rate: f64, connection_cost: f64, period_years: f64) -> Self {
        Self {
            current_rate,
            new_rate,
            connection_cost,
            period_years,
        }
    }

    /// Number of whole months in the analysis period
    ///
    /// The fractional part of `period_years * 12` is truncated. Negative and
    /// non-finite products yield zero months.
    pub fn months(&self) -> u32 {
        let months = (self.period_years * 12.0).trunc();
        if months.is_finite() && months > 0.0 {
            // saturating float-to-int cast
            months as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_whole_years() {
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, 1.0).months(), 12);
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, 3.0).months(), 36);
    }

    #[test]
    fn test_months_truncates_fraction() {
        // 1.3 years = 15.6 months
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, 1.3).months(), 15);
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, 0.05).months(), 0);
    }

    #[test]
    fn test_months_never_negative() {
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, 0.0).months(), 0);
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, -2.0).months(), 0);
        assert_eq!(TariffInputs::new(1.0, 1.0, 0.0, f64::NAN).months(), 0);
    }
}
