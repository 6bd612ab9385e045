use chrono::NaiveDate;
use futures::future;
use serde::Serialize;

use crate::{
    storage::{hours::HoursStore, kv::KeyValueStore},
    utils::error::Result,
};

use super::month::{aggregate_month, MonthSummary};

/// The combined view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursReport {
    pub current: MonthSummary,
    pub previous: MonthSummary,
}

/// Builds the current and previous month summaries for one reference date.
/// The default is fetched once and threaded through both aggregations, so a
/// concurrent change to it can't produce two months computed against
/// different baselines. Either aggregation failing fails the report.
pub async fn month_report<S: KeyValueStore>(
    hours: &HoursStore<S>,
    reference_date: NaiveDate,
) -> Result<HoursReport> {
    let default_hours = hours.default_hours().await?;

    let (current, previous) = future::try_join(
        aggregate_month(hours, 0, reference_date, default_hours),
        aggregate_month(hours, 1, reference_date, default_hours),
    )
    .await?;

    Ok(HoursReport { current, previous })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use crate::storage::{
        hours::HoursStore,
        kv::{MemoryStore, MockKeyValueStore},
    };

    use super::month_report;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_report_covers_both_months() -> anyhow::Result<()> {
        let hours = HoursStore::new(MemoryStore::default());
        hours.set_adjusted_hours(date(2024, 5, 11), 4.0).await?;

        let report = month_report(&hours, date(2024, 6, 15)).await?;

        assert_eq!(report.current.first_day, date(2024, 6, 1));
        assert_eq!(report.previous.first_day, date(2024, 5, 1));

        // The previous month has fully elapsed, the current one hasn't
        assert_eq!(
            report.previous.total_hours_elapsed,
            report.previous.total_hours_projected
        );
        assert!(report.current.total_hours_projected > report.current.total_hours_elapsed);

        // 2024-05-11 is a Saturday and shows up only in the previous month
        assert_eq!(report.previous.extra_workdays.len(), 1);
        assert!(report.current.extra_workdays.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_report_spans_a_year_boundary() -> anyhow::Result<()> {
        let hours = HoursStore::new(MemoryStore::default());

        let report = month_report(&hours, date(2024, 1, 10)).await?;

        assert_eq!(report.current.first_day, date(2024, 1, 1));
        assert_eq!(report.previous.first_day, date(2023, 12, 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_default_is_fetched_once_per_report() -> anyhow::Result<()> {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .with(eq("defaultHours"))
            .times(1)
            .returning(|_| Ok(Some(9.0)));
        store.expect_get().returning(|_| Ok(None));

        let hours = HoursStore::new(store);

        let report = month_report(&hours, date(2024, 6, 15)).await?;

        // Both months are computed against the same snapshot of the default
        assert_eq!(report.current.total_hours_elapsed, 9.0 * 10.0);
        assert_eq!(report.previous.total_hours_projected, 9.0 * 23.0);
        Ok(())
    }
}
