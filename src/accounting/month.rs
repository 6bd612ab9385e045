use chrono::NaiveDate;
use futures::{stream, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    storage::{hours::HoursStore, kv::KeyValueStore},
    utils::{
        error::Result,
        time::{is_weekend, month_days, month_start},
    },
};

use super::resolve::resolve_day;

/// A day whose resolved hours exceed the default, or a weekend day with any
/// positive hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraWorkday {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Totals for one calendar month. Elapsed covers days up to and including the
/// reference date, projected covers the whole month assuming no further
/// adjustments. Recomputed from scratch on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub first_day: NaiveDate,
    pub total_hours_elapsed: f64,
    pub total_hours_projected: f64,
    pub extra_workdays: Vec<ExtraWorkday>,
}

/// Adjustment lookups for different days are independent, so a month costs
/// one round trip depth instead of up to 31.
const MAX_CONCURRENT_LOOKUPS: usize = 8;

/// Walks every day of the target month (`months_back` whole months before the
/// reference date's month) and accumulates totals and the extra-workday list.
/// All lookups are joined before accumulation starts; one failed lookup fails
/// the whole month, there is no partial summary.
#[instrument(skip(hours))]
pub async fn aggregate_month<S: KeyValueStore>(
    hours: &HoursStore<S>,
    months_back: u32,
    reference_date: NaiveDate,
    default_hours: u32,
) -> Result<MonthSummary> {
    let first_day = month_start(reference_date, months_back);

    let adjustments = stream::iter(month_days(first_day))
        .map(|day| async move { hours.adjusted_hours(day).await.map(|a| (day, a)) })
        .buffered(MAX_CONCURRENT_LOOKUPS)
        .try_collect::<Vec<_>>()
        .await?;

    let mut summary = MonthSummary {
        first_day,
        total_hours_elapsed: 0.0,
        total_hours_projected: 0.0,
        extra_workdays: vec![],
    };

    for (day, adjustment) in adjustments {
        let resolved = resolve_day(day, default_hours, adjustment);

        if day <= reference_date {
            summary.total_hours_elapsed += resolved.hours_worked;
        }
        summary.total_hours_projected += resolved.hours_worked;

        if resolved.hours_worked > f64::from(default_hours)
            || (is_weekend(day) && resolved.hours_worked > 0.0)
        {
            summary.extra_workdays.push(ExtraWorkday {
                date: day,
                hours: resolved.hours_worked,
            });
        }
    }

    debug!(
        "Aggregated {first_day}: elapsed {} projected {} extra days {}",
        summary.total_hours_elapsed,
        summary.total_hours_projected,
        summary.extra_workdays.len()
    );

    Ok(summary)
}
