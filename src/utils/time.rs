use chrono::{Datelike, Months, NaiveDate, Weekday};

/// This is the standard way of converting a date to a day key in workhours.
/// Every component that turns a date into a storage key goes through here, so
/// two call sites can never disagree on which calendar day a key denotes.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the first day of the month `months_back` whole months before the
/// reference date. 0 is the reference date's own month.
pub fn month_start(reference: NaiveDate, months_back: u32) -> NaiveDate {
    reference
        .with_day(1)
        .expect("The first always exists")
        .checked_sub_months(Months::new(months_back))
        .expect("Beginning of time should never happen")
}

/// Returns every day of the month starting at `first_day`, in ascending order.
pub fn month_days(first_day: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let next_month = first_day
        .checked_add_months(Months::new(1))
        .expect("End of time should never happen");
    first_day.iter_days().take_while(move |day| *day < next_month)
}
