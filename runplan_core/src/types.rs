//! Workout types consumed by plan summaries.
//!
//! Workouts are read-only inputs here: the tracker creates and updates them
//! elsewhere, and this crate only buckets them into plan weeks.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Workout Kinds
// ============================================================================

/// Type of run (or other session) scheduled on a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    EasyRun,
    Intervals,
    LongRun,
    TempoRun,
    StrengthTraining,
    Race,
}

impl RunType {
    /// Human-readable label (e.g. "Easy Run")
    pub fn label(&self) -> &'static str {
        match self {
            RunType::EasyRun => "Easy Run",
            RunType::Intervals => "Intervals",
            RunType::LongRun => "Long Run",
            RunType::TempoRun => "Tempo Run",
            RunType::StrengthTraining => "Strength Training",
            RunType::Race => "Race",
        }
    }
}

/// Lifecycle status of a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    #[default]
    Pending,
    Completed,
    Skipped,
}

impl WorkoutStatus {
    /// Wire name ("pending", "completed", "skipped")
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Pending => "pending",
            WorkoutStatus::Completed => "completed",
            WorkoutStatus::Skipped => "skipped",
        }
    }
}

// ============================================================================
// Workout
// ============================================================================

/// A workout scheduled on one day of a plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    #[serde(default)]
    pub plan_id: String,
    pub run_type: RunType,
    #[serde(deserialize_with = "deserialize_day")]
    pub day: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: WorkoutStatus,
    /// Distance in kilometers
    #[serde(default)]
    pub distance: f64,
}

impl Workout {
    pub fn is_completed(&self) -> bool {
        self.status == WorkoutStatus::Completed
    }

    pub fn is_pending(&self) -> bool {
        self.status == WorkoutStatus::Pending
    }

    /// Check the distance rules the tracker enforces on every workout
    ///
    /// Distances must be non-negative (NaN is rejected too), and strength
    /// sessions carry no distance at all.
    pub fn validate(&self) -> Result<()> {
        if self.distance.is_nan() || self.distance < 0.0 {
            return Err(Error::invalid_argument(format!(
                "workout {}: distance cannot be negative",
                self.id
            )));
        }
        if self.run_type == RunType::StrengthTraining && self.distance != 0.0 {
            return Err(Error::invalid_argument(format!(
                "workout {}: strength training must have a distance of 0km",
                self.id
            )));
        }
        Ok(())
    }
}

/// Accept both `YYYY-MM-DD` and RFC 3339 timestamps (`2026-03-10T00:00:00Z`)
///
/// Timestamps keep the calendar date written in them; the offset is ignored
/// so a stored midnight never shifts to the previous day.
fn deserialize_day<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = crate::calendar::parse_date(&raw) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.date_naive())
        .map_err(|e| serde::de::Error::custom(format!("invalid day {:?}: {}", raw, e)))
}
