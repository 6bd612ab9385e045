use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::utils::error::HoursError;

use super::{open_hours_store, Args};

#[derive(Debug, Parser)]
pub struct ScheduleCommand {
    #[arg(help = "New default hours per workday. Shows the current value when omitted")]
    hours: Option<f64>,
}

/// Command to show or change the fallback hours applied to weekdays without
/// an explicit adjustment.
pub async fn process_schedule_command(ScheduleCommand { hours }: ScheduleCommand) -> Result<()> {
    let store = open_hours_store()?;

    let Some(hours) = hours else {
        let current = store.default_hours().await?;
        println!("Default work hours: {current}");
        return Ok(());
    };

    match store.set_default_hours(hours).await {
        Ok(v) => {
            println!("Default work hours set to {v} hours");
            Ok(())
        }
        Err(e @ HoursError::Validation { .. }) => Err(Args::command()
            .error(clap::error::ErrorKind::ValueValidation, e.to_string())
            .into()),
        Err(e) => Err(e.into()),
    }
}
