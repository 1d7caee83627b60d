//! Configuration module for the tariff advisor
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::AdvisorPaths;
pub use settings::{FooterLine, Settings};
