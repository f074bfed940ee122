// Time slot primitives
//
// Half-open [start, end) intervals in timezone-naive facility local time.
// All conflict detection and pricing duration math goes through this type.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for timestamps ("2025-12-10 10:00:00").
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while constructing a time slot
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Invalid timestamp '{0}': expected format YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    #[error("Invalid interval: start time must be before end time")]
    EmptyInterval,
}

/// A half-open booking interval [start, end)
///
/// Two slots conflict iff `a.start < b.end && b.start < a.end`; a slot
/// ending exactly when another starts does not conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// The portion of a slot falling on a single calendar day
///
/// Used for coach calendar checks: a slot crossing midnight produces one
/// portion per day, each checked against that day's recurring windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPortion {
    /// Day of week, 0 = Sunday through 6 = Saturday
    pub day_of_week: u32,
    /// Seconds since midnight, inclusive
    pub start_second: u32,
    /// Seconds since midnight, exclusive (86400 = end of day)
    pub end_second: u32,
}

impl TimeSlot {
    /// Create a slot, rejecting empty or inverted intervals
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, SlotError> {
        if start >= end {
            return Err(SlotError::EmptyInterval);
        }
        Ok(Self { start, end })
    }

    /// Parse a slot from the client's timestamp literals
    pub fn parse(start: &str, end: &str) -> Result<Self, SlotError> {
        let start = NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT)
            .map_err(|_| SlotError::InvalidTimestamp(start.to_string()))?;
        let end = NaiveDateTime::parse_from_str(end, TIMESTAMP_FORMAT)
            .map_err(|_| SlotError::InvalidTimestamp(end.to_string()))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Half-open overlap test
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Exact duration in fractional hours
    ///
    /// Kept as a full-precision Decimal; never rounded before it is
    /// multiplied into a price.
    pub fn duration_hours(&self) -> Decimal {
        let seconds = (self.end - self.start).num_seconds();
        Decimal::from(seconds) / Decimal::from(3600)
    }

    /// Hour of day (0-23) at which the slot starts
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Whether the slot starts on a Saturday or Sunday
    pub fn starts_on_weekend(&self) -> bool {
        matches!(self.start.weekday().num_days_from_sunday(), 0 | 6)
    }

    /// Split the slot into per-calendar-day portions
    pub fn day_portions(&self) -> Vec<DayPortion> {
        let mut portions = Vec::new();
        let mut day = self.start.date();
        loop {
            let start_second = if day == self.start.date() {
                self.start.time().num_seconds_from_midnight()
            } else {
                0
            };
            let end_second = if day == self.end.date() {
                self.end.time().num_seconds_from_midnight()
            } else {
                86_400
            };
            if end_second > start_second {
                portions.push(DayPortion {
                    day_of_week: day.weekday().num_days_from_sunday(),
                    start_second,
                    end_second,
                });
            }
            if day == self.end.date() {
                break;
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        portions
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn minute_strategy() -> impl Strategy<Value = (i64, i64)> {
        // Two distinct minute offsets within a week
        (0i64..10_080, 1i64..1_440).prop_map(|(start, len)| (start, start + len))
    }

    fn at_minute(offset: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 14)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::minutes(offset)
    }

    /// Overlap is symmetric
    #[test]
    fn prop_overlap_is_symmetric() {
        proptest!(|((a_range, b_range) in (minute_strategy(), minute_strategy()))| {
            let a = TimeSlot::new(at_minute(a_range.0), at_minute(a_range.1)).unwrap();
            let b = TimeSlot::new(at_minute(b_range.0), at_minute(b_range.1)).unwrap();
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        });
    }

    /// A slot always overlaps itself
    #[test]
    fn prop_slot_overlaps_itself() {
        proptest!(|(range in minute_strategy())| {
            let s = TimeSlot::new(at_minute(range.0), at_minute(range.1)).unwrap();
            prop_assert!(s.overlaps(&s));
        });
    }

    /// Abutting slots never overlap
    #[test]
    fn prop_abutting_slots_do_not_overlap() {
        proptest!(|(range in minute_strategy(), len in 1i64..1_440)| {
            let a = TimeSlot::new(at_minute(range.0), at_minute(range.1)).unwrap();
            let b = TimeSlot::new(at_minute(range.1), at_minute(range.1 + len)).unwrap();
            prop_assert!(!a.overlaps(&b));
        });
    }

    /// Day portions exactly tile the slot's duration
    #[test]
    fn prop_day_portions_tile_duration() {
        proptest!(|(range in minute_strategy())| {
            let s = TimeSlot::new(at_minute(range.0), at_minute(range.1)).unwrap();
            let total: u32 = s
                .day_portions()
                .iter()
                .map(|p| p.end_second - p.start_second)
                .sum();
            prop_assert_eq!(total as i64, (range.1 - range.0) * 60);
        });
    }
}
