//! Interactive chat over stdin
//!
//! Every non-empty line is one message from the given user.

use std::io::BufRead;

use clap::Args;
use tracing::{error, info};

use super::open_advisor;
use crate::config::{AdvisorPaths, Settings};
use crate::error::AdvisorResult;
use crate::models::{ChatId, User};
use crate::services::{Advisor, Incoming};
use crate::transport::Transport;

/// Arguments for `chat`
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Chat id replies are addressed to
    #[arg(long)]
    pub user_id: i64,

    /// Display name recorded in the history log
    #[arg(long)]
    pub name: String,
}

/// Handle the chat command
pub fn handle_chat_command(
    paths: &AdvisorPaths,
    settings: &Settings,
    args: ChatArgs,
) -> AdvisorResult<()> {
    let mut advisor = open_advisor(paths, settings)?;
    let user = User::new(ChatId(args.user_id), args.name);

    info!(chat = %user.id, user = %user.display_name, "Chat started");
    let handled = run_chat(&mut advisor, &user, std::io::stdin().lock())?;
    info!(messages = handled, "Chat ended");

    Ok(())
}

/// Feed every line of `input` to the assistant as one message
///
/// A message that fails to be handled is logged and the conversation goes on.
/// Returns the number of messages handled.
pub fn run_chat<T: Transport, R: BufRead>(
    advisor: &mut Advisor<T>,
    user: &User,
    input: R,
) -> AdvisorResult<usize> {
    let mut handled = 0;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if let Err(e) = advisor.handle(&Incoming::new(user.clone(), line)) {
            error!(chat = %user.id, error = %e, "Failed to handle message");
        }
        handled += 1;
    }

    Ok(handled)
}
