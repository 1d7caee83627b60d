//! In-memory transport

use super::Transport;
use crate::error::AdvisorResult;
use crate::models::ChatId;
use crate::reports::Artifact;

/// One recorded delivery
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// A text message
    Text { to: ChatId, text: String },
    /// A file
    Document {
        to: ChatId,
        document: Artifact,
        caption: Option<String>,
    },
}

impl Delivery {
    /// Recipient of the delivery
    pub fn recipient(&self) -> ChatId {
        match self {
            Delivery::Text { to, .. } | Delivery::Document { to, .. } => *to,
        }
    }
}

/// Transport that records deliveries instead of sending them
#[derive(Debug, Default)]
pub struct MemoryTransport {
    deliveries: Vec<Delivery>,
}

impl MemoryTransport {
    /// Create an empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Texts sent to one chat
    pub fn texts_to(&self, chat: ChatId) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter_map(|d| match d {
                Delivery::Text { to, text } if *to == chat => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// File names sent to one chat
    pub fn files_to(&self, chat: ChatId) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter_map(|d| match d {
                Delivery::Document { to, document, .. } if *to == chat => {
                    Some(document.file_name.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// Forget recorded deliveries
    pub fn clear(&mut self) {
        self.deliveries.clear();
    }
}

impl Transport for MemoryTransport {
    fn send_text(&mut self, to: ChatId, text: &str) -> AdvisorResult<()> {
        self.deliveries.push(Delivery::Text {
            to,
            text: text.to_string(),
        });
        Ok(())
    }

    fn send_document(
        &mut self,
        to: ChatId,
        document: &Artifact,
        caption: Option<&str>,
    ) -> AdvisorResult<()> {
        self.deliveries.push(Delivery::Document {
            to,
            document: document.clone(),
            caption: caption.map(str::to_string),
        });
        Ok(())
    }
}
