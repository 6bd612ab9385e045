use std::fmt::Display;

use anyhow::Result;
use chrono::Local;
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::utils::{error::HoursError, time::day_key};

use super::{open_hours_store, Args};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct AdjustCommand {
    #[arg(help = "Hours actually worked that day. Fractions and 0 are both allowed")]
    hours: f64,
    #[arg(
        long = "date",
        short,
        help = "Day to adjust. Examples are \"today\", \"yesterday\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Command to record the hours worked on one calendar day, overriding the
/// weekend/default rule for that day.
pub async fn process_adjust_command(
    AdjustCommand {
        hours,
        date,
        date_style,
    }: AdjustCommand,
) -> Result<()> {
    let now = Local::now();
    let date = match date.map(|s| parse_date_string(&s, now, date_style.into())) {
        Some(Ok(v)) => v.with_timezone(&Local).date_naive(),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate date {e}"),
                )
                .into());
        }
        None => now.date_naive(),
    };

    let store = open_hours_store()?;
    match store.set_adjusted_hours(date, hours).await {
        Ok(()) => {
            println!("Hours for {} set to {hours} hours", day_key(date));
            Ok(())
        }
        Err(e @ HoursError::Validation { .. }) => Err(Args::command()
            .error(clap::error::ErrorKind::ValueValidation, e.to_string())
            .into()),
        Err(e) => Err(e.into()),
    }
}
