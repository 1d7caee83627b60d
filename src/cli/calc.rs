//! One-shot calculation from command-line arguments
//!
//! The values go through the same wizard steps as a chat, so the same
//! validation applies, and the result is delivered the same way.

use clap::Args;

use super::open_advisor;
use crate::config::{AdvisorPaths, Settings};
use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{CalculationResult, ChatId, User};
use crate::services::Advisor;
use crate::transport::Transport;
use crate::wizard::{Prompts, StepOutcome, WizardSession};

/// Arguments for `calc`
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Current monthly tariff
    #[arg(long, allow_negative_numbers = true)]
    pub current: f64,

    /// New monthly tariff
    #[arg(long = "new", allow_negative_numbers = true)]
    pub new_rate: f64,

    /// One-time connection cost
    #[arg(long, allow_negative_numbers = true)]
    pub cost: f64,

    /// Analysis period in years
    #[arg(long, allow_negative_numbers = true)]
    pub years: f64,

    /// Display name recorded in the history log
    #[arg(long, default_value = "cli")]
    pub name: String,

    /// Chat id the reports are addressed to
    #[arg(long, default_value_t = 1)]
    pub user_id: i64,
}

impl CalcArgs {
    fn replies(&self) -> [String; 4] {
        [self.current, self.new_rate, self.cost, self.years].map(|v| v.to_string())
    }
}

/// Handle the calc command
pub fn handle_calc_command(
    paths: &AdvisorPaths,
    settings: &Settings,
    args: CalcArgs,
) -> AdvisorResult<()> {
    let mut advisor = open_advisor(paths, settings)?;
    let user = User::new(ChatId(args.user_id), args.name.as_str());

    run_calc(&mut advisor, settings, &user, &args)?;
    Ok(())
}

/// Run the wizard on the given values and deliver the reports
pub fn run_calc<T: Transport>(
    advisor: &mut Advisor<T>,
    settings: &Settings,
    user: &User,
    args: &CalcArgs,
) -> AdvisorResult<CalculationResult> {
    let prompts = Prompts::new(settings.currency.as_str());
    let (mut session, _) = WizardSession::start(prompts, settings.max_months);

    for reply in args.replies() {
        match session.handle_text(&reply) {
            StepOutcome::Next(_) => {}
            StepOutcome::Complete(inputs) => return advisor.complete(user, &inputs),
            StepOutcome::Retry(message) => {
                return Err(AdvisorError::Validation(format!("{} ({})", message, reply)))
            }
            StepOutcome::Cancelled(_) | StepOutcome::Finished => break,
        }
    }

    Err(AdvisorError::Validation("Incomplete tariff inputs".into()))
}
