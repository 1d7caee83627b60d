//! Business logic layer
//!
//! - `amortization`: the month-by-month cost comparison
//! - `advisor`: the conversation service tying wizard, reports, history and
//!   transport together

pub mod advisor;
pub mod amortization;

pub use advisor::{Advisor, Command, Incoming};
pub use amortization::calculate;
