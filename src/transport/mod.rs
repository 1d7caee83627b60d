//! Outbound delivery
//!
//! The assistant never talks to a chat network directly; it hands text and
//! files to a [`Transport`]. Two implementations ship with the crate:
//!
//! - [`OutboxTransport`]: prints text and stores files under an outbox
//!   directory, one folder per recipient
//! - [`MemoryTransport`]: keeps every delivery in memory

pub mod memory;
pub mod outbox;

pub use memory::{Delivery, MemoryTransport};
pub use outbox::OutboxTransport;

use crate::error::AdvisorResult;
use crate::models::ChatId;
use crate::reports::Artifact;

/// Delivers replies and files to chats
pub trait Transport {
    /// Send a text message with light markup
    fn send_text(&mut self, to: ChatId, text: &str) -> AdvisorResult<()>;

    /// Send a file, optionally with a caption
    fn send_document(
        &mut self,
        to: ChatId,
        document: &Artifact,
        caption: Option<&str>,
    ) -> AdvisorResult<()>;
}
