//! Plan windows and their week buckets.
//!
//! A [`PlanWindow`] is a plan's start/end pair plus its length in weeks. It
//! partitions the plan into Monday-to-Sunday [`WeekRange`]s and answers
//! "which week is this date in" questions for navigation and display.

use crate::calendar::{self, add_days};
use crate::{Error, Result};
use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Race day and plan length as entered by the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSpec {
    pub end_date: NaiveDate,
    pub weeks: u32,
}

impl PlanSpec {
    pub fn new(end_date: NaiveDate, weeks: u32) -> Self {
        Self { end_date, weeks }
    }

    /// Derive the plan window (fails for a zero week count)
    pub fn window(&self) -> Result<PlanWindow> {
        PlanWindow::new(self.end_date, self.weeks)
    }
}

/// The resolved date range of a plan
///
/// Invariants: `start_date` is a Monday, `weeks >= 1`, and the last week of
/// the window is the Monday-to-Sunday week that contains `end_date`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    weeks: u32,
    last_day: NaiveDate,
}

impl PlanWindow {
    /// Build the window for a plan ending on `end_date` that lasts `weeks` weeks
    pub fn new(end_date: NaiveDate, weeks: u32) -> Result<Self> {
        let start_date = calendar::start_date_for(end_date, weeks)?;
        let last_day = add_days(calendar::monday_of(end_date)?, 6)?;
        Ok(Self {
            start_date,
            end_date,
            weeks,
            last_day,
        })
    }

    /// Rebuild a window from stored parts, checking the start date agrees with the rule
    ///
    /// Plans created elsewhere carry their own start date. A mismatch means
    /// the two sides disagree on the calendar rule and is reported as
    /// `InvalidArgument` instead of being silently corrected.
    pub fn from_parts(start_date: NaiveDate, end_date: NaiveDate, weeks: u32) -> Result<Self> {
        let window = Self::new(end_date, weeks)?;
        if window.start_date != start_date {
            return Err(Error::invalid_argument(format!(
                "start date {} does not match {} computed for a {}-week plan ending {}",
                start_date, window.start_date, weeks, end_date
            )));
        }
        Ok(window)
    }

    /// First day of week 1 (always a Monday)
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Race day
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    /// Sunday closing the race week
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Whether `date` falls inside any week of the plan
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.last_day
    }

    /// The week `date` falls into, or `None` outside the plan
    pub fn week_of(&self, date: NaiveDate) -> Option<u32> {
        if !self.contains(date) {
            return None;
        }
        let days = (date - self.start_date).num_days();
        Some((days / 7) as u32 + 1)
    }

    /// The week `reference` falls into, clamped to `1..=weeks`
    pub fn week_index_for(&self, reference: NaiveDate) -> u32 {
        calendar::clamped_week_index(self.start_date, self.weeks, reference)
    }

    /// The week to show by default when the plan is opened on `today`
    pub fn current_week(&self, today: NaiveDate) -> u32 {
        let week = self.week_index_for(today);
        tracing::debug!("Current week for {} is {} of {}", today, week, self.weeks);
        week
    }

    /// Week after `current`, never past the last week
    pub fn next_week(&self, current: u32) -> u32 {
        current.saturating_add(1).clamp(1, self.weeks)
    }

    /// Week before `current`, never before week 1
    pub fn previous_week(&self, current: u32) -> u32 {
        current.saturating_sub(1).clamp(1, self.weeks)
    }

    /// The date range of week `number` (1-based)
    pub fn week(&self, number: u32) -> Result<WeekRange> {
        if number == 0 || number > self.weeks {
            return Err(Error::invalid_argument(format!(
                "week must be between 1 and {}, got {}",
                self.weeks, number
            )));
        }
        let start = add_days(self.start_date, 7 * u64::from(number - 1))?;
        let end = add_days(start, 6)?;
        Ok(WeekRange { number, start, end })
    }

    /// Every week of the plan, in order
    pub fn week_ranges(&self) -> impl Iterator<Item = WeekRange> {
        // Every week ends on or before `last_day`, which was already resolved
        // in range by the constructor, so the additions below cannot overflow.
        self.start_date
            .iter_weeks()
            .take(self.weeks as usize)
            .zip(1..)
            .map(|(start, number)| WeekRange {
                number,
                start,
                end: start + Days::new(6),
            })
    }

    /// The date of `weekday` in week `week`
    pub fn date_for(&self, week: u32, weekday: Weekday) -> Result<NaiveDate> {
        let range = self.week(week)?;
        add_days(range.start, u64::from(weekday.num_days_from_monday()))
    }
}

/// One Monday-to-Sunday bucket of a plan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRange {
    pub number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The seven days of the week, Monday first
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;
    use chrono::Datelike;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn four_week_plan() -> PlanWindow {
        PlanWindow::new(d("2026-03-08"), 4).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = four_week_plan();
        assert_eq!(window.start_date(), d("2026-02-09"));
        assert_eq!(window.end_date(), d("2026-03-08"));
        assert_eq!(window.last_day(), d("2026-03-08"));
        assert_eq!(window.weeks(), 4);
    }

    #[test]
    fn test_saturday_race_week_runs_to_sunday() {
        let window = PlanWindow::new(d("2025-10-04"), 1).unwrap();
        assert_eq!(window.start_date(), d("2025-09-29"));
        assert_eq!(window.last_day(), d("2025-10-05"));
        assert!(window.contains(d("2025-10-05")));
        assert!(!window.contains(d("2025-10-06")));
    }

    #[test]
    fn test_zero_weeks_rejected() {
        assert!(matches!(
            PlanWindow::new(d("2026-03-08"), 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(PlanSpec::new(d("2026-03-08"), 0).window().is_err());
    }

    #[test]
    fn test_from_parts() {
        let window = PlanWindow::from_parts(d("2026-02-09"), d("2026-03-08"), 4).unwrap();
        assert_eq!(window, four_week_plan());

        let err = PlanWindow::from_parts(d("2026-02-10"), d("2026-03-08"), 4).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_week_of_is_unclamped() {
        let window = four_week_plan();
        assert_eq!(window.week_of(d("2026-02-08")), None);
        assert_eq!(window.week_of(d("2026-02-09")), Some(1));
        assert_eq!(window.week_of(d("2026-02-15")), Some(1));
        assert_eq!(window.week_of(d("2026-02-16")), Some(2));
        assert_eq!(window.week_of(d("2026-03-08")), Some(4));
        assert_eq!(window.week_of(d("2026-03-09")), None);
    }

    #[test]
    fn test_current_week() {
        let window = four_week_plan();
        assert_eq!(window.current_week(d("2026-02-17")), 2);
        assert_eq!(window.current_week(d("2026-01-01")), 1);
        assert_eq!(window.current_week(d("2026-04-01")), 4);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let window = four_week_plan();
        assert_eq!(window.next_week(1), 2);
        assert_eq!(window.next_week(4), 4);
        assert_eq!(window.previous_week(2), 1);
        assert_eq!(window.previous_week(1), 1);
        assert_eq!(window.next_week(u32::MAX), 4);
        assert_eq!(window.previous_week(0), 1);
    }

    #[test]
    fn test_week_ranges_partition_the_plan() {
        let window = four_week_plan();
        let weeks: Vec<_> = window.week_ranges().collect();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].start, window.start_date());
        assert_eq!(weeks[3].end, window.last_day());

        for pair in weeks.windows(2) {
            assert_eq!(pair[0].end.succ_opt(), Some(pair[1].start));
        }
        for (i, week) in weeks.iter().enumerate() {
            assert_eq!(week.number as usize, i + 1);
            let days: Vec<_> = week.days().collect();
            assert_eq!(days.len(), 7);
            assert_eq!(days[0].weekday(), Weekday::Mon);
            assert_eq!(days[6].weekday(), Weekday::Sun);
            assert!(days.iter().all(|day| window.week_of(*day) == Some(week.number)));
        }
    }

    #[test]
    fn test_week_ranges_match_week_lookup() {
        // A year-long plan crossing a leap day and a year boundary
        let window = PlanWindow::new(d("2024-12-29"), 52).unwrap();
        let ranges: Vec<_> = window.week_ranges().collect();
        assert_eq!(ranges.len(), 52);
        for range in &ranges {
            assert_eq!(*range, window.week(range.number).unwrap());
        }
        assert_eq!(ranges[51].end, window.last_day());
    }

    #[test]
    fn test_week_out_of_range() {
        let window = four_week_plan();
        assert!(window.week(0).is_err());
        assert!(window.week(5).is_err());
        let week = window.week(2).unwrap();
        assert_eq!(week.start, d("2026-02-16"));
        assert_eq!(week.end, d("2026-02-22"));
        assert!(week.contains(d("2026-02-17")));
        assert!(!week.contains(d("2026-02-23")));
    }

    #[test]
    fn test_date_for_slot() {
        let window = four_week_plan();
        assert_eq!(window.date_for(1, Weekday::Mon).unwrap(), d("2026-02-09"));
        assert_eq!(window.date_for(1, Weekday::Sat).unwrap(), d("2026-02-14"));
        assert_eq!(window.date_for(4, Weekday::Sun).unwrap(), d("2026-03-08"));
        assert!(window.date_for(5, Weekday::Mon).is_err());
    }

    #[test]
    fn test_window_across_leap_february() {
        // Sunday 2024-03-03, three weeks back crosses Feb 29
        let window = PlanWindow::new(d("2024-03-03"), 3).unwrap();
        assert_eq!(window.start_date(), d("2024-02-12"));
        assert_eq!(window.week_of(d("2024-02-29")), Some(3));
    }
}
