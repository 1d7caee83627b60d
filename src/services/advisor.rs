//! Conversation service
//!
//! Routes incoming messages to per-user wizard sessions, runs the
//! calculation pipeline when a session completes, and answers history
//! requests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, instrument, warn};

use super::amortization::calculate;
use crate::config::Settings;
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{CalculationResult, ChatId, HistoryRecord, TariffInputs, User};
use crate::reports::{
    ArtifactRenderer, DocumentRenderer, HistoryWorkbook, SpreadsheetRenderer, TextRenderer,
};
use crate::storage::{HistoryLookup, HistoryStore};
use crate::transport::Transport;
use crate::wizard::{Prompts, StepOutcome, WizardSession, WizardState};

/// File name of the report copy sent to the administrator
pub const ADMIN_DOCUMENT_NAME: &str = "user_benefit.pdf";

/// File name of the workbook copy sent to the administrator
pub const ADMIN_SPREADSHEET_NAME: &str = "user_benefit.xlsx";

const HISTORY_EMPTY: &str = "History is empty.";
const NO_USER_HISTORY: &str = "You have no calculations yet.";
const NOTHING_TO_CANCEL: &str = "Nothing to cancel.";
const START_HINT: &str = "Send /start to begin a calculation.";

/// A message received from a user
#[derive(Debug, Clone)]
pub struct Incoming {
    /// Who sent it
    pub from: User,
    /// Raw message text
    pub text: String,
}

impl Incoming {
    /// Create an incoming message
    pub fn new(from: User, text: impl Into<String>) -> Self {
        Self {
            from,
            text: text.into(),
        }
    }
}

/// Slash commands understood by the assistant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin (or restart) the wizard
    Start,
    /// Abort the wizard
    Cancel,
    /// Request the sender's history workbook
    History,
    /// Anything else starting with a slash
    Unknown(String),
}

impl Command {
    /// Parse a message as a command; plain text yields `None`
    ///
    /// A `@botname` suffix on the command word is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or_default();

        Some(match name {
            "start" => Command::Start,
            "cancel" => Command::Cancel,
            "history" => Command::History,
            other => Command::Unknown(other.to_string()),
        })
    }
}

/// The conversational tariff assistant
pub struct Advisor<T: Transport> {
    settings: Settings,
    history: Arc<HistoryStore>,
    transport: T,
    sessions: HashMap<ChatId, WizardSession>,
    text: TextRenderer,
    document: DocumentRenderer,
    spreadsheet: SpreadsheetRenderer,
}

impl<T: Transport> Advisor<T> {
    /// Create an assistant delivering through `transport`
    pub fn new(settings: Settings, history: Arc<HistoryStore>, transport: T) -> Self {
        let currency = settings.currency.clone();
        let footer = settings
            .sheet_footer
            .iter()
            .map(|line| (line.label.clone(), line.value.clone()));
        Self {
            text: TextRenderer::new(currency.as_str()),
            document: DocumentRenderer::new(currency.as_str()),
            spreadsheet: SpreadsheetRenderer::new(currency.as_str()).with_footer(footer),
            settings,
            history,
            transport,
            sessions: HashMap::new(),
        }
    }

    /// Handle one incoming message
    pub fn handle(&mut self, message: &Incoming) -> AdvisorResult<()> {
        let user = &message.from;

        match Command::parse(&message.text) {
            Some(Command::Start) => self.start_session(user),
            Some(Command::Cancel) => self.cancel_session(user),
            Some(Command::History) => self.send_history(user),
            Some(Command::Unknown(name)) => {
                warn!(command = %name, chat = %user.id, "Unknown command");
                self.transport.send_text(
                    user.id,
                    "Unknown command. Use /start, /cancel or /history.",
                )
            }
            None => self.continue_session(user, &message.text),
        }
    }

    /// State of a user's active session, if any
    pub fn session_state(&self, chat: ChatId) -> Option<&WizardState> {
        self.sessions.get(&chat).map(WizardSession::state)
    }

    /// Number of sessions waiting for input
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// The transport replies go through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The shared history store
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    fn start_session(&mut self, user: &User) -> AdvisorResult<()> {
        let prompts = Prompts::new(self.settings.currency.as_str());
        let (session, greeting) = WizardSession::start(prompts, self.settings.max_months);

        if self.sessions.insert(user.id, session).is_some() {
            info!(chat = %user.id, "Restarted session");
        } else {
            info!(chat = %user.id, "Started session");
        }
        self.transport.send_text(user.id, &greeting)
    }

    fn cancel_session(&mut self, user: &User) -> AdvisorResult<()> {
        match self.sessions.remove(&user.id) {
            Some(mut session) => match session.cancel() {
                StepOutcome::Cancelled(ack) => {
                    info!(chat = %user.id, "Cancelled session");
                    self.transport.send_text(user.id, &ack)
                }
                _ => self.transport.send_text(user.id, NOTHING_TO_CANCEL),
            },
            None => self.transport.send_text(user.id, NOTHING_TO_CANCEL),
        }
    }

    fn continue_session(&mut self, user: &User, text: &str) -> AdvisorResult<()> {
        let Some(session) = self.sessions.get_mut(&user.id) else {
            return self.transport.send_text(user.id, START_HINT);
        };

        match session.handle_text(text) {
            StepOutcome::Next(prompt) | StepOutcome::Retry(prompt) => {
                self.transport.send_text(user.id, &prompt)
            }
            StepOutcome::Complete(inputs) => {
                // the session ends whether or not delivery succeeds
                self.sessions.remove(&user.id);
                self.complete(user, &inputs).map(|_| ())
            }
            StepOutcome::Cancelled(ack) => {
                self.sessions.remove(&user.id);
                self.transport.send_text(user.id, &ack)
            }
            StepOutcome::Finished => {
                self.sessions.remove(&user.id);
                self.transport.send_text(user.id, START_HINT)
            }
        }
    }

    /// Calculate, render, log and deliver one finished run
    #[instrument(skip_all, fields(chat = %user.id, user = %user.display_name))]
    pub fn complete(
        &mut self,
        user: &User,
        inputs: &TariffInputs,
    ) -> AdvisorResult<CalculationResult> {
        let result = calculate(inputs);
        info!(
            months = result.months,
            payback = ?result.payback_month,
            total_savings = result.total_savings,
            "Calculated tariff benefit"
        );

        let message = self.text.render(&result)?;
        let document = self.document.render(&result)?;
        let spreadsheet = self.spreadsheet.render(&result)?;

        let timestamp = self.settings.format_timestamp(&Local::now())?;
        self.history.append(&HistoryRecord::from_result(
            &result,
            user.display_name.as_str(),
            timestamp,
        ))?;

        let text = message
            .as_text()
            .ok_or_else(|| AdvisorError::Render("Text report is not valid UTF-8".into()))?;
        self.transport.send_text(user.id, text)?;
        self.transport.send_document(user.id, &document, None)?;
        self.transport.send_document(user.id, &spreadsheet, None)?;

        let admin = self.settings.admin_chat_id;
        let caption = format!("Calculation from {}", user.display_name);
        self.transport.send_document(
            admin,
            &document.renamed(ADMIN_DOCUMENT_NAME),
            Some(&caption),
        )?;
        self.transport
            .send_document(admin, &spreadsheet.renamed(ADMIN_SPREADSHEET_NAME), None)?;

        info!(%admin, "Delivered reports");
        Ok(result)
    }

    fn send_history(&mut self, user: &User) -> AdvisorResult<()> {
        match self.history.query_by_user(&user.display_name)? {
            HistoryLookup::NoLog => self.transport.send_text(user.id, HISTORY_EMPTY),
            HistoryLookup::Records(records) if records.is_empty() => {
                self.transport.send_text(user.id, NO_USER_HISTORY)
            }
            HistoryLookup::Records(records) => {
                let workbook = HistoryWorkbook::render(&records)?;
                info!(chat = %user.id, rows = records.len(), "Sending history");
                self.transport.send_document(user.id, &workbook, None)
            }
        }
    }
}
