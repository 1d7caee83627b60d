//! Wizard state machine
//!
//! ```text
//! AwaitingCurrent -> AwaitingNew -> AwaitingCost -> AwaitingPeriod -> Done
//!        \______________\_______________\_______________\-----> Cancelled
//! ```
//!
//! Each variant owns the values collected so far, so a finished flow always
//! carries a complete [`TariffInputs`].

use tracing::debug;

use super::steps::{parse_number, Prompts};
use crate::models::TariffInputs;

/// Where a session is in the four-step flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WizardState {
    /// Waiting for the current tariff
    AwaitingCurrent,
    /// Waiting for the new tariff
    AwaitingNew { current_rate: f64 },
    /// Waiting for the connection cost
    AwaitingCost { current_rate: f64, new_rate: f64 },
    /// Waiting for the analysis period
    AwaitingPeriod {
        current_rate: f64,
        new_rate: f64,
        connection_cost: f64,
    },
    /// All inputs collected
    Done(TariffInputs),
    /// Cancelled before completion
    Cancelled,
}

impl WizardState {
    /// Whether the flow has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardState::Done(_) | WizardState::Cancelled)
    }
}

/// Result of feeding one message to a session
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Value stored; ask the next question
    Next(String),
    /// Value rejected; ask the same question again
    Retry(String),
    /// All four values collected
    Complete(TariffInputs),
    /// Flow cancelled; send the acknowledgement
    Cancelled(String),
    /// The flow had already ended; nothing to do
    Finished,
}

/// One user's run through the wizard
#[derive(Debug, Clone)]
pub struct WizardSession {
    state: WizardState,
    prompts: Prompts,
    max_months: u32,
}

impl WizardSession {
    /// Start a session; returns it with the greeting to send
    pub fn start(prompts: Prompts, max_months: u32) -> (Self, String) {
        let greeting = prompts.greeting();
        let session = Self {
            state: WizardState::AwaitingCurrent,
            prompts,
            max_months,
        };
        (session, greeting)
    }

    /// Current state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Feed one free-text reply
    pub fn handle_text(&mut self, text: &str) -> StepOutcome {
        let (next, outcome) = match self.state {
            WizardState::AwaitingCurrent => self.on_current(text),
            WizardState::AwaitingNew { current_rate } => self.on_new(current_rate, text),
            WizardState::AwaitingCost {
                current_rate,
                new_rate,
            } => self.on_cost(current_rate, new_rate, text),
            WizardState::AwaitingPeriod {
                current_rate,
                new_rate,
                connection_cost,
            } => self.on_period(current_rate, new_rate, connection_cost, text),
            state @ (WizardState::Done(_) | WizardState::Cancelled) => {
                (state, StepOutcome::Finished)
            }
        };

        debug!(from = ?self.state, to = ?next, "Wizard step");
        self.state = next;
        outcome
    }

    /// Cancel the flow from any input state
    pub fn cancel(&mut self) -> StepOutcome {
        if self.state.is_terminal() {
            return StepOutcome::Finished;
        }
        self.state = WizardState::Cancelled;
        StepOutcome::Cancelled(self.prompts.cancelled())
    }

    fn on_current(&self, text: &str) -> (WizardState, StepOutcome) {
        match parse_number(text) {
            Ok(current_rate) => (
                WizardState::AwaitingNew { current_rate },
                StepOutcome::Next(self.prompts.new_rate()),
            ),
            Err(_) => self.retry(),
        }
    }

    fn on_new(&self, current_rate: f64, text: &str) -> (WizardState, StepOutcome) {
        match parse_number(text) {
            Ok(new_rate) => (
                WizardState::AwaitingCost {
                    current_rate,
                    new_rate,
                },
                StepOutcome::Next(self.prompts.connection_cost()),
            ),
            Err(_) => self.retry(),
        }
    }

    fn on_cost(&self, current_rate: f64, new_rate: f64, text: &str) -> (WizardState, StepOutcome) {
        match parse_number(text) {
            Ok(connection_cost) => (
                WizardState::AwaitingPeriod {
                    current_rate,
                    new_rate,
                    connection_cost,
                },
                StepOutcome::Next(self.prompts.period()),
            ),
            Err(_) => self.retry(),
        }
    }

    fn on_period(
        &self,
        current_rate: f64,
        new_rate: f64,
        connection_cost: f64,
        text: &str,
    ) -> (WizardState, StepOutcome) {
        let Ok(period_years) = parse_number(text) else {
            return self.retry();
        };

        let inputs = TariffInputs::new(current_rate, new_rate, connection_cost, period_years);
        if inputs.months() > self.max_months {
            return (
                self.state,
                StepOutcome::Retry(self.prompts.period_too_long(self.max_months)),
            );
        }

        (WizardState::Done(inputs), StepOutcome::Complete(inputs))
    }

    fn retry(&self) -> (WizardState, StepOutcome) {
        (self.state, StepOutcome::Retry(self.prompts.invalid_number()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> WizardSession {
        WizardSession::start(Prompts::new("RUB"), 1200).0
    }

    #[test]
    fn test_full_flow() {
        let mut session = start();

        assert_eq!(
            session.handle_text("1000"),
            StepOutcome::Next("Enter the new tariff (RUB/month):".into())
        );
        assert_eq!(
            session.state(),
            &WizardState::AwaitingNew { current_rate: 1000.0 }
        );
        assert!(matches!(session.handle_text("600"), StepOutcome::Next(_)));
        assert!(matches!(session.handle_text("3000"), StepOutcome::Next(_)));

        let expected = TariffInputs::new(1000.0, 600.0, 3000.0, 1.0);
        assert_eq!(session.handle_text("1"), StepOutcome::Complete(expected));
        assert_eq!(session.state(), &WizardState::Done(expected));
        assert_eq!(session.handle_text("5"), StepOutcome::Finished);
    }

    #[test]
    fn test_invalid_input_retries_in_place() {
        let mut session = start();
        session.handle_text("1000");

        for _ in 0..5 {
            assert_eq!(
                session.handle_text("six hundred"),
                StepOutcome::Retry("Please enter a number.".into())
            );
            assert_eq!(
                session.state(),
                &WizardState::AwaitingNew { current_rate: 1000.0 }
            );
        }

        assert!(matches!(session.handle_text("600"), StepOutcome::Next(_)));
    }

    #[test]
    fn test_cancel_from_every_input_state() {
        let replies = ["1000", "600", "3000"];
        for answered in 0..=replies.len() {
            let mut session = start();
            for reply in &replies[..answered] {
                session.handle_text(reply);
            }
            assert!(!session.state().is_terminal());

            assert_eq!(
                session.cancel(),
                StepOutcome::Cancelled("Calculation cancelled.".into())
            );
            assert_eq!(session.state(), &WizardState::Cancelled);
            assert_eq!(session.cancel(), StepOutcome::Finished);
            assert_eq!(session.handle_text("1"), StepOutcome::Finished);
        }
    }

    #[test]
    fn test_period_above_bound_is_rejected() {
        let mut session = WizardSession::start(Prompts::new("RUB"), 120).0;
        for reply in ["1000", "600", "3000"] {
            session.handle_text(reply);
        }

        assert_eq!(
            session.handle_text("10.5"),
            StepOutcome::Retry("That period is too long. Please enter at most 10 years.".into())
        );
        assert!(matches!(session.state(), WizardState::AwaitingPeriod { .. }));

        assert!(matches!(session.handle_text("10"), StepOutcome::Complete(_)));
    }

    #[test]
    fn test_zero_and_negative_periods_complete() {
        for period in ["0", "-3"] {
            let mut session = start();
            for reply in ["1000", "600", "3000"] {
                session.handle_text(reply);
            }
            match session.handle_text(period) {
                StepOutcome::Complete(inputs) => assert_eq!(inputs.months(), 0),
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }
}
