//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the assistant.
//! Replies are printed on stdout and files land in the outbox directory.

pub mod calc;
pub mod chat;
pub mod history;

pub use calc::{handle_calc_command, CalcArgs};
pub use chat::{handle_chat_command, ChatArgs};
pub use history::{handle_history_command, HistoryArgs};

use std::io::Stdout;
use std::sync::Arc;

use crate::config::{AdvisorPaths, Settings};
use crate::error::AdvisorResult;
use crate::services::Advisor;
use crate::storage::HistoryStore;
use crate::transport::OutboxTransport;

/// Build an assistant over the configured history log and outbox
pub fn open_advisor(
    paths: &AdvisorPaths,
    settings: &Settings,
) -> AdvisorResult<Advisor<OutboxTransport<Stdout>>> {
    paths.ensure_directories()?;

    let history = Arc::new(HistoryStore::new(paths.history_file()));
    let transport = OutboxTransport::stdout(paths.outbox_dir());
    Ok(Advisor::new(settings.clone(), history, transport))
}
