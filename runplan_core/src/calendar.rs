//! Plan calendar arithmetic.
//!
//! All dates are timezone-free `NaiveDate`s and weeks always run Monday to
//! Sunday, whatever the locale. The two central operations are:
//! - [`start_date_for`]: the Monday a plan begins, given its race day
//! - [`week_index_for`]: the clamped 1-based week a date falls into
//!
//! The server derives plan start dates with the same rule, so any change
//! here must keep the outputs identical for the same inputs.

use crate::{Error, Result};
use chrono::{Datelike, Days, NaiveDate};

/// Wire format for dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| Error::InvalidDate {
        input: input.to_string(),
        source,
    })
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Distance in days back from `date` to the Monday of its week (Monday = 0, Sunday = 6)
pub fn days_since_monday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

/// The Monday of the week containing `date`
pub fn monday_of(date: NaiveDate) -> Result<NaiveDate> {
    sub_days(date, u64::from(days_since_monday(date)))
}

/// Compute the first day of a plan that ends on `end_date` and lasts `weeks` weeks
///
/// The race week (Monday to Sunday around `end_date`) is the last week of the
/// plan, so the start is the Monday of the race week moved back `weeks - 1`
/// whole weeks. A one-week plan starts on the Monday of the race week even
/// when the race itself falls later in that week.
///
/// Returns `InvalidArgument` when `weeks` is zero.
pub fn start_date_for(end_date: NaiveDate, weeks: u32) -> Result<NaiveDate> {
    if weeks == 0 {
        return Err(Error::invalid_argument("weeks must be at least 1"));
    }

    let monday_of_race_week = monday_of(end_date)?;
    let start = sub_days(monday_of_race_week, 7 * u64::from(weeks - 1))?;

    tracing::debug!(
        "Start date for {} over {} weeks is {}",
        end_date,
        weeks,
        start
    );
    Ok(start)
}

/// Map `reference` to the week of a plan starting on `start_date`
///
/// Dates before the plan resolve to week 1 and dates after its last day
/// resolve to `total_weeks`. `start_date` is expected to be a Monday (as
/// produced by [`start_date_for`]); weeks are counted in 7-day steps from it.
///
/// Returns `InvalidArgument` when `total_weeks` is zero.
pub fn week_index_for(start_date: NaiveDate, total_weeks: u32, reference: NaiveDate) -> Result<u32> {
    if total_weeks == 0 {
        return Err(Error::invalid_argument("total weeks must be at least 1"));
    }
    Ok(clamped_week_index(start_date, total_weeks, reference))
}

/// Week index with clamping; `total_weeks` must already be known to be >= 1
pub(crate) fn clamped_week_index(start_date: NaiveDate, total_weeks: u32, reference: NaiveDate) -> u32 {
    let days = reference.signed_duration_since(start_date).num_days();
    // Floor division: a date one day before the start is week 0, not week 1
    let raw = days.div_euclid(7) + 1;
    let index = raw.clamp(1, i64::from(total_weeks.max(1))) as u32;

    if i64::from(index) != raw {
        tracing::debug!(
            "Week {} for {} is outside 1..={}, clamped to {}",
            raw,
            reference,
            total_weeks,
            index
        );
    }
    index
}

pub(crate) fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        Error::invalid_argument(format!("{} plus {} days is out of range", date, days))
    })
}

pub(crate) fn sub_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(days)).ok_or_else(|| {
        Error::invalid_argument(format!("{} minus {} days is out of range", date, days))
    })
}
