//! Input-collection wizard
//!
//! Collects the current tariff, new tariff, connection cost and analysis
//! period one message at a time.

pub mod session;
pub mod steps;

pub use session::{StepOutcome, WizardSession, WizardState};
pub use steps::{parse_number, Prompts};
