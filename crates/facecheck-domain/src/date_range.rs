//! Inclusive calendar-date range used to bound attendance aggregates.

use chrono::{DateTime, Days, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidDateRange {
    #[error("start_date and end_date must be supplied together")]
    HalfOpen,
    #[error("start_date {start} is after end_date {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidDateRange> {
        if start > end {
            return Err(InvalidDateRange::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build an optional range from query bounds: both or neither.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, InvalidDateRange> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            (None, None) => Ok(None),
            _ => Err(InvalidDateRange::HalfOpen),
        }
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First instant of the range (UTC midnight of `start`).
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// First instant after the range (UTC midnight following `end`).
    pub fn ends_before(&self) -> DateTime<Utc> {
        self.end
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
    }
}
