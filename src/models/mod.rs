//! Core data models for the tariff advisor
//!
//! This module contains the data structures shared by the calculator, the
//! renderers, the history log and the wizard.

pub mod calculation;
pub mod history;
pub mod identity;
pub mod inputs;

pub use calculation::{round_display, CalculationResult, MonthRow, Payback};
pub use history::{HistoryRecord, HISTORY_HEADER};
pub use identity::{ChatId, User};
pub use inputs::TariffInputs;
