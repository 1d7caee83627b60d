//! File-based transport
//!
//! Text replies are written to a console stream; files land in
//! `<outbox>/<chat id>/<file name>`, replacing any earlier file of the same
//! name.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::Transport;
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::ChatId;
use crate::reports::Artifact;

/// Transport writing to a console stream and an outbox directory
pub struct OutboxTransport<W: Write> {
    outbox_dir: PathBuf,
    console: W,
}

impl OutboxTransport<std::io::Stdout> {
    /// Print replies on stdout
    pub fn stdout(outbox_dir: PathBuf) -> Self {
        Self::new(outbox_dir, std::io::stdout())
    }
}

impl<W: Write> OutboxTransport<W> {
    /// Create a transport over any console stream
    pub fn new(outbox_dir: PathBuf, console: W) -> Self {
        Self {
            outbox_dir,
            console,
        }
    }

    /// Directory holding files for one chat
    pub fn chat_dir(&self, chat: ChatId) -> PathBuf {
        self.outbox_dir.join(chat.to_string())
    }

    /// Root of the outbox
    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }

    /// Consume the transport and return the console stream
    pub fn into_console(self) -> W {
        self.console
    }

    fn print(&mut self, line: &str) -> AdvisorResult<()> {
        writeln!(self.console, "{}", line)
            .map_err(|e| AdvisorError::Transport(format!("Failed to write reply: {}", e)))
    }
}

impl<W: Write> Transport for OutboxTransport<W> {
    fn send_text(&mut self, to: ChatId, text: &str) -> AdvisorResult<()> {
        self.print(&format!("[to {}]", to))?;
        self.print(text)
    }

    fn send_document(
        &mut self,
        to: ChatId,
        document: &Artifact,
        caption: Option<&str>,
    ) -> AdvisorResult<()> {
        let dir = self.chat_dir(to);
        std::fs::create_dir_all(&dir).map_err(|e| {
            AdvisorError::Transport(format!(
                "Failed to create outbox {}: {}",
                dir.display(),
                e
            ))
        })?;

        let path = dir.join(&document.file_name);
        std::fs::write(&path, &document.bytes).map_err(|e| {
            AdvisorError::Transport(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(%to, file = %path.display(), bytes = document.bytes.len(), "Delivered file");

        match caption {
            Some(caption) => self.print(&format!(
                "[to {}] file: {} ({})",
                to,
                path.display(),
                caption
            )),
            None => self.print(&format!("[to {}] file: {}", to, path.display())),
        }
    }
}
