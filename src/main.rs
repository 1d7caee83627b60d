use anyhow::Result;
use clap::{Parser, Subcommand};

use tariff_advisor::cli::{
    handle_calc_command, handle_chat_command, handle_history_command, CalcArgs, ChatArgs,
    HistoryArgs,
};
use tariff_advisor::config::{AdvisorPaths, Settings};
use tariff_advisor::models::ChatId;

#[derive(Parser)]
#[command(
    name = "tariffs",
    version,
    about = "Estimate the benefit of switching to a new tariff",
    long_about = "Tariff Advisor walks you through four questions (current tariff, \
                  new tariff, connection cost, analysis period) and answers with a \
                  month-by-month comparison as a message, a PDF report and an \
                  XLSX workbook."
)]
struct Cli {
    /// Chat id that receives a copy of every report
    #[arg(long, global = true, env = "TARIFF_ADVISOR_ADMIN_ID")]
    admin_chat_id: Option<i64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the assistant, one message per stdin line
    Chat(ChatArgs),

    /// Run a calculation from arguments
    #[command(alias = "calculate")]
    Calc(CalcArgs),

    /// Show a user's past calculations
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tariff_advisor::logging::init();

    // Initialize paths and settings
    let paths = AdvisorPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let first_run = !paths.settings_file().exists();
    if first_run && matches!(cli.command, Some(Commands::Config)) {
        settings.save(&paths)?;
        println!("Created default settings at {}", paths.settings_file().display());
        println!();
    }
    if let Some(id) = cli.admin_chat_id {
        settings.admin_chat_id = ChatId(id);
    }

    match cli.command {
        Some(Commands::Chat(args)) => handle_chat_command(&paths, &settings, args)?,
        Some(Commands::Calc(args)) => handle_calc_command(&paths, &settings, args)?,
        Some(Commands::History(args)) => handle_history_command(&paths, args)?,
        Some(Commands::Config) => {
            println!("Tariff Advisor Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("History log:      {}", paths.history_file().display());
            println!("Outbox directory: {}", paths.outbox_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency:         {}", settings.currency);
            println!("  Admin chat id:    {}", settings.admin_chat_id);
            println!("  Max months:       {}", settings.max_months);
            println!("  Timestamp format: {}", settings.timestamp_format);
        }
        None => {
            println!("Tariff Advisor - tariff switch benefit calculator");
            println!();
            println!("Run 'tariffs --help' for usage information.");
            println!("Run 'tariffs chat --user-id <ID> --name <NAME>' to start a conversation.");
        }
    }

    Ok(())
}
