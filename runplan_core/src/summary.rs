//! Week-by-week plan summaries.
//!
//! Groups a plan's workouts into its Monday-to-Sunday weeks and days, with
//! per-week distance totals. The JSON shape (camelCase) matches what the
//! tracker's plan view consumes.

use crate::calendar::days_since_monday;
use crate::{PlanWindow, Result, Workout};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a week summary
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: NaiveDate,
    /// English weekday name ("Monday".."Sunday")
    pub day_name: String,
    pub workouts: Vec<Workout>,
}

/// One week of a plan with its days and distance totals
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub number: u32,
    pub days: Vec<DaySummary>,
    pub planned_km: f64,
    pub done_km: f64,
    /// At least one workout and none still pending
    pub all_done: bool,
}

impl WeekSummary {
    pub fn workouts(&self) -> impl Iterator<Item = &Workout> {
        self.days.iter().flat_map(|day| day.workouts.iter())
    }
}

/// A plan broken down into weeks
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weeks: u32,
    pub weeks_summary: Vec<WeekSummary>,
}

impl PlanDetail {
    /// Done and planned kilometers across the whole plan, in that order
    pub fn totals(&self) -> (f64, f64) {
        self.weeks_summary
            .iter()
            .fold((0.0, 0.0), |(done, planned), week| {
                (done + week.done_km, planned + week.planned_km)
            })
    }

    pub fn week(&self, number: u32) -> Option<&WeekSummary> {
        self.weeks_summary.iter().find(|week| week.number == number)
    }

    /// Workouts scheduled on `date` (empty on rest days and outside the plan)
    pub fn workouts_on(&self, date: NaiveDate) -> Vec<&Workout> {
        self.weeks_summary
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|day| day.date == date)
            .flat_map(|day| day.workouts.iter())
            .collect()
    }
}

/// Build the week-by-week detail of a plan
///
/// Workouts keep their input order within a day. Workouts dated outside the
/// window have no week to land in and are left out. Any workout failing
/// [`Workout::validate`] rejects the whole summary with `InvalidArgument`.
pub fn build_plan_detail(name: &str, window: &PlanWindow, workouts: &[Workout]) -> Result<PlanDetail> {
    for workout in workouts {
        workout.validate()?;
    }

    let mut weeks_summary: Vec<WeekSummary> = window
        .week_ranges()
        .map(|range| WeekSummary {
            number: range.number,
            days: range
                .days()
                .map(|date| DaySummary {
                    date,
                    day_name: date.format("%A").to_string(),
                    workouts: Vec::new(),
                })
                .collect(),
            planned_km: 0.0,
            done_km: 0.0,
            all_done: false,
        })
        .collect();

    let mut skipped = 0;
    for workout in workouts {
        let Some(week) = window.week_of(workout.day) else {
            tracing::debug!(
                "Workout {} on {} is outside the plan ({} to {}), leaving it out",
                workout.id,
                workout.day,
                window.start_date(),
                window.last_day()
            );
            skipped += 1;
            continue;
        };
        let Some(summary) = weeks_summary.get_mut((week - 1) as usize) else {
            continue;
        };

        let offset = days_since_monday(workout.day) as usize;
        if let Some(day) = summary.days.get_mut(offset) {
            day.workouts.push(workout.clone());
        }
        summary.planned_km += workout.distance;
        if workout.is_completed() {
            summary.done_km += workout.distance;
        }
    }

    for summary in &mut weeks_summary {
        let all_done = {
            let mut scheduled = summary.workouts().peekable();
            scheduled.peek().is_some() && scheduled.all(|w| !w.is_pending())
        };
        summary.all_done = all_done;
    }

    tracing::debug!(
        "Built {}-week summary for {:?} ({} workouts, {} outside the plan)",
        window.weeks(),
        name,
        workouts.len() - skipped,
        skipped
    );

    Ok(PlanDetail {
        name: name.to_string(),
        start_date: window.start_date(),
        end_date: window.end_date(),
        weeks: window.weeks(),
        weeks_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_date;
    use crate::{Error, RunType, WorkoutStatus};

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn workout(id: &str, day: &str, distance: f64, status: WorkoutStatus) -> Workout {
        Workout {
            id: id.into(),
            plan_id: "plan-1".into(),
            run_type: RunType::EasyRun,
            day: d(day),
            description: String::new(),
            notes: String::new(),
            status,
            distance,
        }
    }

    fn marathon_plan() -> PlanWindow {
        PlanWindow::new(d("2026-03-08"), 4).unwrap()
    }

    #[test]
    fn test_empty_plan_has_all_days() {
        let detail = build_plan_detail("Marathon Training", &marathon_plan(), &[]).unwrap();
        assert_eq!(detail.weeks_summary.len(), 4);
        assert_eq!(detail.start_date, d("2026-02-09"));

        let week1 = &detail.weeks_summary[0];
        assert_eq!(week1.days.len(), 7);
        assert_eq!(week1.days[0].date, d("2026-02-09"));
        assert_eq!(week1.days[0].day_name, "Monday");
        assert_eq!(week1.days[6].date, d("2026-02-15"));
        assert_eq!(week1.days[6].day_name, "Sunday");
        assert!(!week1.all_done);
        assert_eq!(detail.totals(), (0.0, 0.0));
    }

    #[test]
    fn test_workouts_grouped_by_week_and_day() {
        let workouts = vec![
            workout("w-1", "2026-02-09", 8.0, WorkoutStatus::Pending),
            workout("w-2", "2026-02-16", 10.0, WorkoutStatus::Completed),
            workout("w-3", "2026-02-21", 25.0, WorkoutStatus::Pending),
            workout("w-4", "2026-03-08", 20.0, WorkoutStatus::Completed),
        ];
        let detail = build_plan_detail("Marathon Training", &marathon_plan(), &workouts).unwrap();

        let week2 = detail.week(2).unwrap();
        assert_eq!(week2.planned_km, 35.0);
        assert_eq!(week2.done_km, 10.0);
        assert!(!week2.all_done);
        assert_eq!(week2.days[0].workouts[0].id, "w-2");
        assert_eq!(week2.days[5].day_name, "Saturday");
        assert_eq!(week2.days[5].workouts[0].id, "w-3");

        let week4 = detail.week(4).unwrap();
        assert!(week4.all_done);
        assert_eq!(week4.days[6].workouts[0].id, "w-4");

        // Week 3 has nothing scheduled
        assert!(!detail.week(3).unwrap().all_done);

        assert_eq!(detail.totals(), (30.0, 63.0));
    }

    #[test]
    fn test_skipped_workouts_count_as_done_but_not_distance() {
        let workouts = vec![
            workout("w-1", "2026-02-10", 8.0, WorkoutStatus::Completed),
            workout("w-2", "2026-02-12", 6.0, WorkoutStatus::Skipped),
        ];
        let detail = build_plan_detail("Plan", &marathon_plan(), &workouts).unwrap();
        let week1 = detail.week(1).unwrap();
        assert!(week1.all_done);
        assert_eq!(week1.done_km, 8.0);
        assert_eq!(week1.planned_km, 14.0);
    }

    #[test]
    fn test_workouts_outside_plan_are_left_out() {
        crate::logging::init_test();

        let workouts = vec![
            workout("early", "2026-02-08", 5.0, WorkoutStatus::Pending),
            workout("late", "2026-03-09", 5.0, WorkoutStatus::Pending),
        ];
        let detail = build_plan_detail("Plan", &marathon_plan(), &workouts).unwrap();
        assert_eq!(detail.totals(), (0.0, 0.0));
        assert!(detail.workouts_on(d("2026-02-08")).is_empty());
    }

    #[test]
    fn test_invalid_distances_reject_the_summary() {
        let mut strength = workout("w-2", "2026-02-11", 12.0, WorkoutStatus::Pending);
        strength.run_type = RunType::StrengthTraining;

        let negative = vec![workout("w-1", "2026-02-10", -30.0, WorkoutStatus::Completed)];
        let err = build_plan_detail("Plan", &marathon_plan(), &negative).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let with_strength = vec![
            workout("w-1", "2026-02-10", 8.0, WorkoutStatus::Completed),
            strength,
        ];
        let err = build_plan_detail("Plan", &marathon_plan(), &with_strength).unwrap_err();
        assert!(err.to_string().contains("strength training"));
    }

    #[test]
    fn test_same_day_keeps_input_order() {
        let mut strength = workout("w-2", "2026-03-03", 0.0, WorkoutStatus::Pending);
        strength.run_type = RunType::StrengthTraining;
        let workouts = vec![
            workout("w-1", "2026-03-03", 8.0, WorkoutStatus::Pending),
            strength,
        ];
        let detail = build_plan_detail("Plan", &marathon_plan(), &workouts).unwrap();
        let today: Vec<_> = detail
            .workouts_on(d("2026-03-03"))
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(today, vec!["w-1", "w-2"]);
        assert!(detail.workouts_on(d("2026-03-04")).is_empty());
    }

    #[test]
    fn test_detail_serializes_camel_case() {
        let workouts = vec![workout("w-1", "2026-02-09", 8.0, WorkoutStatus::Pending)];
        let detail = build_plan_detail("Plan", &marathon_plan(), &workouts).unwrap();
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["startDate"], "2026-02-09");
        assert_eq!(json["endDate"], "2026-03-08");
        assert_eq!(json["weeksSummary"][0]["plannedKm"], 8.0);
        assert_eq!(json["weeksSummary"][0]["allDone"], false);
        assert_eq!(json["weeksSummary"][0]["days"][0]["dayName"], "Monday");
        assert_eq!(
            json["weeksSummary"][0]["days"][0]["workouts"][0]["runType"],
            "easy_run"
        );
    }
}
