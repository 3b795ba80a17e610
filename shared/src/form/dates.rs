//! Ordering rules for `startDate` / `endDate` pairs and the matching
//! date-time picker restrictions.
//!
//! Bounds are inclusive throughout: an item may start at exactly the instant
//! the previous item ends, and may end at the instant it starts. The picker
//! disables strictly-earlier or strictly-later selections only, so it never
//! offers a value the validator would reject on the same boundary.

use std::borrow::Borrow;

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use super::model::{FieldDescriptor, FieldKind};
use super::validate::FieldError;
use super::value::FormValues;

pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";

pub fn is_date_range_field(name: &str) -> bool {
    name == START_DATE || name == END_DATE
}

fn instant_at<V: Borrow<FormValues>>(items: &[V], index: usize, name: &str) -> Option<NaiveDateTime> {
    items
        .get(index)
        .and_then(|values| values.borrow().get(name))
        .and_then(|value| value.as_date_time())
}

fn previous_end<V: Borrow<FormValues>>(items: &[V], index: usize) -> Option<NaiveDateTime> {
    index
        .checked_sub(1)
        .and_then(|previous| instant_at(items, previous, END_DATE))
}

/// Checks the ordering rules for the field `name` of item `index`.
///
/// Fields other than `startDate` / `endDate`, and fields whose counterpart is
/// not set yet, always pass.
pub fn validate_date_order<V: Borrow<FormValues>>(
    items: &[V],
    index: usize,
    name: &str,
) -> Result<(), FieldError> {
    let Some(value) = instant_at(items, index, name) else {
        return Ok(());
    };

    match name {
        END_DATE => match instant_at(items, index, START_DATE) {
            Some(start) if value < start => Err(FieldError::EndBeforeStart),
            _ => Ok(()),
        },
        START_DATE => {
            if let Some(end) = previous_end(items, index) {
                if value < end {
                    return Err(FieldError::StartBeforePreviousEnd { previous: index - 1 });
                }
            }
            match instant_at(items, index, END_DATE) {
                Some(end) if value > end => Err(FieldError::StartAfterEnd),
                _ => Ok(()),
            }
        }
        _ => Ok(()),
    }
}

/// Which selections a date-time picker must withhold for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickerConstraint {
    min_day: Option<NaiveDate>,
    max_day: Option<NaiveDate>,
    not_before: Option<NaiveDateTime>,
    not_after: Option<NaiveDateTime>,
}

impl PickerConstraint {
    pub fn new(
        min_day: Option<NaiveDate>,
        max_day: Option<NaiveDate>,
        not_before: Option<NaiveDateTime>,
        not_after: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            min_day,
            max_day,
            not_before,
            not_after,
        }
    }

    /// Builds the constraint for a field of item `index` from its absolute
    /// bounds and the neighbouring range values.
    pub fn for_field<V: Borrow<FormValues>>(field: &FieldDescriptor, items: &[V], index: usize) -> Self {
        let (min_day, max_day) = match &field.kind {
            FieldKind::DateTime {
                min_date, max_date, ..
            } => (*min_date, *max_date),
            _ => (None, None),
        };

        let (not_before, not_after) = match field.name.as_str() {
            START_DATE => (previous_end(items, index), instant_at(items, index, END_DATE)),
            END_DATE => (instant_at(items, index, START_DATE), None),
            _ => (None, None),
        };

        Self::new(min_day, max_day, not_before, not_after)
    }

    /// Earliest instant the picker may offer
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        let day_start = self.min_day.and_then(|day| day.and_hms_opt(0, 0, 0));
        match (day_start, self.not_before) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    /// Latest instant the picker may offer
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        let day_end = self.max_day.and_then(|day| day.and_hms_opt(23, 59, 59));
        match (day_end, self.not_after) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_day_disabled(&self, day: NaiveDate) -> bool {
        self.min_day.is_some_and(|min| day < min)
            || self.max_day.is_some_and(|max| day > max)
            || self.not_before.is_some_and(|bound| day < bound.date())
            || self.not_after.is_some_and(|bound| day > bound.date())
    }

    pub fn disabled_hours(&self, day: NaiveDate) -> Vec<u32> {
        if self.is_day_disabled(day) {
            return (0..24).collect();
        }
        self.disabled_units(24, |bound| {
            (bound.date() == day).then_some(bound.hour())
        })
    }

    pub fn disabled_minutes(&self, day: NaiveDate, hour: u32) -> Vec<u32> {
        if self.disabled_hours(day).contains(&hour) {
            return (0..60).collect();
        }
        self.disabled_units(60, |bound| {
            (bound.date() == day && bound.hour() == hour).then_some(bound.minute())
        })
    }

    pub fn disabled_seconds(&self, day: NaiveDate, hour: u32, minute: u32) -> Vec<u32> {
        if self.disabled_minutes(day, hour).contains(&minute) {
            return (0..60).collect();
        }
        self.disabled_units(60, |bound| {
            (bound.date() == day && bound.hour() == hour && bound.minute() == minute)
                .then_some(bound.second())
        })
    }

    /// Whether a full instant falls outside the offered range
    pub fn is_instant_disabled(&self, instant: NaiveDateTime) -> bool {
        self.disabled_seconds(instant.date(), instant.hour(), instant.minute())
            .contains(&instant.second())
    }

    // Units strictly below the lower boundary's unit or strictly above the
    // upper boundary's unit, when the boundary shares the enclosing unit.
    fn disabled_units<F>(&self, units: u32, unit_of: F) -> Vec<u32>
    where
        F: Fn(NaiveDateTime) -> Option<u32>,
    {
        let below = self.not_before.and_then(&unit_of);
        let above = self.not_after.and_then(&unit_of);
        (0..units)
            .filter(|unit| below.is_some_and(|b| *unit < b) || above.is_some_and(|a| *unit > a))
            .collect()
    }
}
