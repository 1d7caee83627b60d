//! Wizard prompts and input parsing
//!
//! Each step asks for one number. Replies are parsed leniently around
//! whitespace but must be finite numbers.

use crate::error::{AdvisorError, AdvisorResult};

/// Parse one free-text reply as a number
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_number(text: &str) -> AdvisorResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AdvisorError::invalid_input(trimmed)),
    }
}

/// Texts the wizard sends, with the configured currency filled in
#[derive(Debug, Clone)]
pub struct Prompts {
    currency: String,
}

impl Prompts {
    /// Create prompts quoting amounts in the given currency
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Greeting plus the first question
    pub fn greeting(&self) -> String {
        format!(
            "Hello! I will help you estimate the benefit of a new tariff.\n\
             Enter your current tariff ({}/month):",
            self.currency
        )
    }

    /// Question for the new tariff
    pub fn new_rate(&self) -> String {
        format!("Enter the new tariff ({}/month):", self.currency)
    }

    /// Question for the connection cost
    pub fn connection_cost(&self) -> String {
        format!("Enter the connection cost ({}):", self.currency)
    }

    /// Question for the analysis period
    pub fn period(&self) -> String {
        "Over what period should the benefit be calculated (years)?".to_string()
    }

    /// Re-prompt after unparseable input
    pub fn invalid_number(&self) -> String {
        "Please enter a number.".to_string()
    }

    /// Re-prompt after a period above the configured bound
    pub fn period_too_long(&self, max_months: u32) -> String {
        format!(
            "That period is too long. Please enter at most {} years.",
            f64::from(max_months) / 12.0
        )
    }

    /// Acknowledgement of a cancelled run
    pub fn cancelled(&self) -> String {
        "Calculation cancelled.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("1000").unwrap(), 1000.0);
        assert_eq!(parse_number("599.90").unwrap(), 599.9);
        assert_eq!(parse_number("-5").unwrap(), -5.0);
        assert_eq!(parse_number("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_number("  42 \n").unwrap(), 42.0);
    }

    #[test]
    fn test_parse_rejects_text() {
        for input in ["", "abc", "12 rub", "1,5", "NaN", "inf", "-infinity"] {
            let err = parse_number(input).unwrap_err();
            assert!(err.is_invalid_input(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_prompts_use_currency() {
        let prompts = Prompts::new("EUR");
        assert!(prompts.greeting().ends_with("Enter your current tariff (EUR/month):"));
        assert_eq!(prompts.connection_cost(), "Enter the connection cost (EUR):");
        assert_eq!(
            prompts.period_too_long(1200),
            "That period is too long. Please enter at most 100 years."
        );
    }
}
