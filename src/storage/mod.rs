//! Storage layer for the tariff advisor
//!
//! The only persisted state is the shared, append-only calculation history.

pub mod history;

pub use history::{HistoryLookup, HistoryStore};
