//! History log records
//!
//! One record is written per completed calculation. The column layout is
//! fixed: the log header and every exported history sheet use [`HISTORY_HEADER`].

use serde::{Deserialize, Serialize};

use super::calculation::{CalculationResult, Payback};
use crate::error::{AdvisorError, AdvisorResult};

/// Column names of the history log, in order
pub const HISTORY_HEADER: [&str; 8] = [
    "date",
    "user",
    "current_rate",
    "new_rate",
    "connection_cost",
    "months",
    "payback_month",
    "total_savings",
];

/// A summary of one completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// When the calculation completed, already formatted
    pub timestamp: String,
    /// Display name of the user who ran it
    pub user_display_name: String,
    /// Current tariff, as entered
    pub current_rate: f64,
    /// New tariff, as entered
    pub new_rate: f64,
    /// Connection cost, as entered
    pub connection_cost: f64,
    /// Months analysed
    pub months: u32,
    /// Payback month or "not reached"
    pub payback: Payback,
    /// Rounded total savings
    pub total_savings: f64,
}

impl HistoryRecord {
    /// Summarise a calculation for the log
    pub fn from_result(
        result: &CalculationResult,
        user_display_name: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            user_display_name: user_display_name.into(),
            current_rate: result.inputs.current_rate,
            new_rate: result.inputs.new_rate,
            connection_cost: result.inputs.connection_cost,
            months: result.months,
            payback: result.payback(),
            total_savings: result.rounded_total_savings(),
        }
    }

    /// Field texts in column order
    pub fn to_fields(&self) -> [String; 8] {
        [
            self.timestamp.clone(),
            self.user_display_name.clone(),
            self.current_rate.to_string(),
            self.new_rate.to_string(),
            self.connection_cost.to_string(),
            self.months.to_string(),
            self.payback.to_string(),
            self.total_savings.to_string(),
        ]
    }

    /// Rebuild a record from one log row
    pub fn from_record(record: &csv::StringRecord) -> AdvisorResult<Self> {
        if record.len() != HISTORY_HEADER.len() {
            return Err(AdvisorError::Storage(format!(
                "Expected {} history columns, found {}",
                HISTORY_HEADER.len(),
                record.len()
            )));
        }

        let field = |idx: usize| record.get(idx).unwrap_or_default();

        Ok(Self {
            timestamp: field(0).to_string(),
            user_display_name: field(1).to_string(),
            current_rate: parse_number(field(2), HISTORY_HEADER[2])?,
            new_rate: parse_number(field(3), HISTORY_HEADER[3])?,
            connection_cost: parse_number(field(4), HISTORY_HEADER[4])?,
            months: field(5).trim().parse().map_err(|_| {
                AdvisorError::Storage(format!("Invalid months value '{}'", field(5)))
            })?,
            payback: Payback::parse(field(6)).ok_or_else(|| {
                AdvisorError::Storage(format!("Invalid payback value '{}'", field(6)))
            })?,
            total_savings: parse_number(field(7), HISTORY_HEADER[7])?,
        })
    }
}

fn parse_number(value: &str, column: &str) -> AdvisorResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| AdvisorError::Storage(format!("Invalid {} value '{}'", column, value)))
}
