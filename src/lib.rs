//! Tariff Advisor - conversational tariff switch benefit calculator
//!
//! This library walks a user through four questions (current tariff, new
//! tariff, connection cost, analysis period), compares cumulative costs month
//! by month, and answers with a text table, a PDF report and an XLSX workbook.
//! Every completed run is appended to a shared history log and copied to an
//! administrator.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Inputs, calculation results, history records and identities
//! - `services`: The amortization calculator and the conversation service
//! - `wizard`: Per-user input collection state machine
//! - `reports`: Text, PDF and XLSX renderers
//! - `storage`: Append-only CSV history log
//! - `transport`: Delivery of replies and files
//! - `cli`: Command handlers for the `tariffs` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use tariff_advisor::models::TariffInputs;
//! use tariff_advisor::services::calculate;
//!
//! let result = calculate(&TariffInputs::new(1000.0, 600.0, 3000.0, 1.0));
//! assert_eq!(result.payback_month, Some(8));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod transport;
pub mod wizard;

pub use error::{AdvisorError, AdvisorResult};
