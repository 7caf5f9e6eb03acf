#![forbid(unsafe_code)]

//! Training-plan calendar for the runplan tracker.
//!
//! This crate provides:
//! - Plan start date and week index calculation
//! - Plan windows partitioned into Monday-to-Sunday weeks
//! - Week-by-week plan summaries over workouts
//! - Configuration and logging setup shared by the CLI

pub mod error;
pub mod calendar;
pub mod window;
pub mod types;
pub mod summary;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use calendar::{format_date, parse_date, start_date_for, week_index_for};
pub use window::{PlanSpec, PlanWindow, WeekRange};
pub use types::*;
pub use summary::{build_plan_detail, DaySummary, PlanDetail, WeekSummary};
pub use config::{Config, OutputFormat};
