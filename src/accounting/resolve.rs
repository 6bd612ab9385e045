use chrono::NaiveDate;

use crate::{storage::hours::Adjustment, utils::time::is_weekend};

/// Hours worked on one calendar day, after reconciling the stored adjustment
/// with the weekend/default rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDay {
    pub date: NaiveDate,
    pub hours_worked: f64,
}

/// An explicit adjustment always wins, even on a weekend (recording weekend
/// work) or a weekday (recording a day off). Without one, weekends count as
/// zero and weekdays as the default.
pub fn resolve_day(date: NaiveDate, default_hours: u32, adjustment: Adjustment) -> ResolvedDay {
    let hours_worked = match adjustment {
        Adjustment::Set(hours) => hours,
        Adjustment::Unset if is_weekend(date) => 0.0,
        Adjustment::Unset => f64::from(default_hours),
    };
    ResolvedDay { date, hours_worked }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::storage::hours::Adjustment;

    use super::resolve_day;

    // 2024-06-01 is a Saturday, 2024-06-03 a Monday
    const SATURDAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    const SUNDAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    const MONDAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

    #[test]
    fn test_weekday_without_adjustment_uses_default() {
        assert_eq!(resolve_day(MONDAY, 8, Adjustment::Unset).hours_worked, 8.0);
        assert_eq!(resolve_day(MONDAY, 6, Adjustment::Unset).hours_worked, 6.0);
    }

    #[test]
    fn test_weekend_without_adjustment_is_zero() {
        assert_eq!(resolve_day(SATURDAY, 8, Adjustment::Unset).hours_worked, 0.0);
        assert_eq!(resolve_day(SUNDAY, 8, Adjustment::Unset).hours_worked, 0.0);
    }

    #[test]
    fn test_adjustment_wins_on_any_day() {
        assert_eq!(
            resolve_day(SATURDAY, 8, Adjustment::Set(5.0)).hours_worked,
            5.0
        );
        assert_eq!(
            resolve_day(MONDAY, 8, Adjustment::Set(12.5)).hours_worked,
            12.5
        );
    }

    #[test]
    fn test_zero_adjustment_is_a_day_off_not_absence() {
        assert_eq!(resolve_day(MONDAY, 8, Adjustment::Set(0.0)).hours_worked, 0.0);
    }
}
