//! CLI command for a user's calculation history

use std::path::PathBuf;

use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::AdvisorPaths;
use crate::error::AdvisorResult;
use crate::models::HistoryRecord;
use crate::reports::HistoryWorkbook;
use crate::storage::{HistoryLookup, HistoryStore};

/// Arguments for `history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Display name to look up (exact match)
    #[arg(long)]
    pub name: String,

    /// Also write the history workbook to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Current")]
    current_rate: f64,
    #[tabled(rename = "New")]
    new_rate: f64,
    #[tabled(rename = "Cost")]
    connection_cost: f64,
    #[tabled(rename = "Months")]
    months: u32,
    #[tabled(rename = "Payback")]
    payback: String,
    #[tabled(rename = "Savings")]
    total_savings: f64,
}

impl From<&HistoryRecord> for HistoryRow {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            date: record.timestamp.clone(),
            current_rate: record.current_rate,
            new_rate: record.new_rate,
            connection_cost: record.connection_cost,
            months: record.months,
            payback: record.payback.to_string(),
            total_savings: record.total_savings,
        }
    }
}

/// Format history records as a terminal table
pub fn format_history_table(records: &[HistoryRecord]) -> String {
    let mut table = Table::new(records.iter().map(HistoryRow::from));
    table.with(Style::modern());
    table.to_string()
}

/// Handle the history command
pub fn handle_history_command(paths: &AdvisorPaths, args: HistoryArgs) -> AdvisorResult<()> {
    let store = HistoryStore::new(paths.history_file());

    let records = match store.query_by_user(&args.name)? {
        HistoryLookup::NoLog => {
            println!("History is empty.");
            return Ok(());
        }
        HistoryLookup::Records(records) if records.is_empty() => {
            println!("No calculations recorded for {}.", args.name);
            return Ok(());
        }
        HistoryLookup::Records(records) => records,
    };

    println!("{}", format_history_table(&records));

    if let Some(path) = args.output {
        let workbook = HistoryWorkbook::render(&records)?;
        std::fs::write(&path, &workbook.bytes)?;
        println!("History exported to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalculationResult, TariffInputs};
    use crate::services::calculate;

    fn record(total: f64) -> HistoryRecord {
        let result: CalculationResult = calculate(&TariffInputs::new(1000.0, 600.0, 3000.0, 1.0));
        let mut record = HistoryRecord::from_result(&result, "Ivan", "2024-03-01 10:15");
        record.total_savings = total;
        record
    }

    #[test]
    fn test_format_history_table() {
        let table = format_history_table(&[record(1800.0), record(-250.0)]);

        assert!(table.contains("Payback"));
        assert!(table.contains("2024-03-01 10:15"));
        assert!(table.contains("1800"));
        assert!(table.contains("-250"));
        assert_eq!(table.lines().filter(|l| l.contains("2024-03-01")).count(), 2);
    }
}
