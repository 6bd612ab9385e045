use anyhow::Result;
use chrono::Local;
use clap::Parser;

use crate::accounting::{month::MonthSummary, report::month_report};

use super::open_hours_store;

#[derive(Debug, Parser)]
pub struct ViewCommand {
    #[arg(long, help = "Print the report as json instead of plain text")]
    json: bool,
}

/// Command to display the current and previous month summaries: hours worked
/// so far, the projected monthly total, and every day with extra work.
pub async fn process_view_command(ViewCommand { json }: ViewCommand) -> Result<()> {
    let store = open_hours_store()?;
    let reference_date = Local::now().date_naive();

    let report = month_report(&store, reference_date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report.current);
    println!();
    print_summary(&report.previous);
    Ok(())
}

fn print_summary(summary: &MonthSummary) {
    println!("{}", summary.first_day.format("%B %Y"));
    println!("\tHours worked so far\t{}", summary.total_hours_elapsed);
    println!(
        "\tEstimated monthly hours\t{}",
        summary.total_hours_projected
    );

    if summary.extra_workdays.is_empty() {
        println!("\tNo extra workdays");
        return;
    }

    println!("\tExtra workdays");
    for day in &summary.extra_workdays {
        println!(
            "\t\t{}\t{} hours",
            day.date.format("%A, %d %B %Y"),
            day.hours
        );
    }
}
