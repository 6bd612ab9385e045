use chrono::NaiveDate;

use crate::{
    storage::kv::KeyValueStore,
    utils::{
        error::{HoursError, Result},
        time::day_key,
    },
};

/// Fallback hours-per-workday applied until the user configures their own.
pub const DEFAULT_WORKDAY_HOURS: u32 = 8;

const DEFAULT_HOURS_KEY: &str = "defaultHours";
const ADJUSTED_HOURS_PREFIX: &str = "adjustedHours_";

/// Result of an adjustment lookup. Distinguishes "no adjustment recorded"
/// from an adjustment of zero hours, which is a valid value meaning "worked
/// nothing that day".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Set(f64),
    Unset,
}

/// Owns the persisted key space: the global default and the per-day
/// adjustments. No other component touches the durable store directly.
pub struct HoursStore<S> {
    store: S,
}

impl<S: KeyValueStore> HoursStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the configured default, or [DEFAULT_WORKDAY_HOURS] when the
    /// user never set one. Absence is not an error; a failed read is.
    pub async fn default_hours(&self) -> Result<u32> {
        let stored = self
            .store
            .get(DEFAULT_HOURS_KEY)
            .await
            .map_err(HoursError::Storage)?;
        Ok(stored.map(|v| v as u32).unwrap_or(DEFAULT_WORKDAY_HOURS))
    }

    /// Persists a new default. Only finite positive whole numbers are
    /// accepted; anything else leaves the stored default unchanged.
    pub async fn set_default_hours(&self, hours: f64) -> Result<u32> {
        if !hours.is_finite() || hours <= 0.0 || hours.fract() != 0.0 {
            return Err(HoursError::validation(format!(
                "default hours must be a positive whole number, got {hours}"
            )));
        }
        self.store
            .set(DEFAULT_HOURS_KEY, hours)
            .await
            .map_err(HoursError::Storage)?;
        Ok(hours as u32)
    }

    pub async fn adjusted_hours(&self, date: NaiveDate) -> Result<Adjustment> {
        let stored = self
            .store
            .get(&adjusted_key(date))
            .await
            .map_err(HoursError::Storage)?;
        Ok(match stored {
            Some(v) => Adjustment::Set(v),
            None => Adjustment::Unset,
        })
    }

    /// Records the hours actually worked on a day, replacing any prior value
    /// for that day. Zero and values above the default are both legal; the
    /// only requirement is a finite number.
    pub async fn set_adjusted_hours(&self, date: NaiveDate, hours: f64) -> Result<()> {
        if !hours.is_finite() {
            return Err(HoursError::validation(format!(
                "hours must be a finite number, got {hours}"
            )));
        }
        self.store
            .set(&adjusted_key(date), hours)
            .await
            .map_err(HoursError::Storage)
    }
}

fn adjusted_key(date: NaiveDate) -> String {
    format!("{ADJUSTED_HOURS_PREFIX}{}", day_key(date))
}
