//! Recurrence expansion for repeating events.
//!
//! A recurring event is materialized as concrete instances at creation time.
//! This module computes the occurrence dates that follow the first one,
//! bounded by an end date, an occurrence count, or a one-year horizon.

use chrono::{Days, Months, NaiveDate};

use crate::models::event::RecurrencePattern;

/// Hard cap on materialized instances, whatever the bounds say.
pub const MAX_OCCURRENCES: usize = 104;

/// Default horizon when neither an end date nor a count is given.
const DEFAULT_HORIZON_DAYS: u64 = 365;

/// Computes the occurrence dates following `first` for a recurring event.
///
/// `count`, when set, is the total number of occurrences including the first,
/// so a count of 1 yields no additional dates. `end_date` is inclusive. When
/// both are set, whichever bound is hit first wins. Returns an empty vec for
/// a non-recurring pattern or a non-positive interval.
pub fn expand_occurrences(
    first: NaiveDate,
    pattern: RecurrencePattern,
    interval: i32,
    end_date: Option<NaiveDate>,
    count: Option<i32>,
) -> Vec<NaiveDate> {
    if !pattern.is_recurring() || interval <= 0 {
        return Vec::new();
    }

    let horizon = end_date.unwrap_or_else(|| {
        first
            .checked_add_days(Days::new(DEFAULT_HORIZON_DAYS))
            .unwrap_or(NaiveDate::MAX)
    });
    let remaining = count
        .map(|c| (c.max(1) as usize - 1).min(MAX_OCCURRENCES))
        .unwrap_or(MAX_OCCURRENCES);

    let mut occurrences = Vec::new();
    let mut current = first;

    while occurrences.len() < remaining {
        current = match advance(current, pattern, interval as u32) {
            Some(next) => next,
            // Date arithmetic overflow: stop expanding.
            None => break,
        };
        if current > horizon {
            break;
        }
        occurrences.push(current);
    }

    occurrences
}

fn advance(date: NaiveDate, pattern: RecurrencePattern, interval: u32) -> Option<NaiveDate> {
    match pattern {
        RecurrencePattern::None => None,
        RecurrencePattern::Daily => date.checked_add_days(Days::new(interval as u64)),
        RecurrencePattern::Weekly => date.checked_add_days(Days::new(7 * interval as u64)),
        RecurrencePattern::Monthly => date.checked_add_months(Months::new(interval)),
        RecurrencePattern::Yearly => date.checked_add_months(Months::new(12 * interval)),
    }
}
