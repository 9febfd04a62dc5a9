//! Point-in-time snapshot used for one greeting

use crate::error::{PoppyError, PoppyResult};
use chrono::{Datelike, Local, Month, NaiveDateTime, Timelike};

/// Calendar months in order, January first
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Immutable hour/minute/day/month snapshot, captured once per trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    hour: u32,
    minute: u32,
    day: u32,
    month: Month,
}

impl TimeContext {
    /// Build a snapshot from raw fields, checking their ranges
    pub fn new(hour: u32, minute: u32, day: u32, month: Month) -> PoppyResult<Self> {
        if hour > 23 || minute > 59 || !(1..=31).contains(&day) {
            return Err(PoppyError::Config(format!(
                "time out of range: {:02}:{:02} on day {}",
                hour, minute, day
            )));
        }
        Ok(Self {
            hour,
            minute,
            day,
            month,
        })
    }

    /// Snapshot of the local wall clock
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        Self {
            hour: dt.hour(),
            minute: dt.minute(),
            day: dt.day(),
            month: MONTHS[dt.month0() as usize],
        }
    }

    /// Parse `YYYY-MM-DD HH:MM`, as accepted by `poppytalk preview --at`
    pub fn parse(text: &str) -> PoppyResult<Self> {
        let dt = NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M").map_err(|e| {
            PoppyError::Config(format!("expected 'YYYY-MM-DD HH:MM', got {:?}: {}", text, e))
        })?;
        Ok(Self::from_datetime(&dt))
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }
}
