use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use runplan_core::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "runplan")]
#[command(about = "Training plan calendar calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the Monday a plan starts on
    StartDate {
        /// Race day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        end_date: NaiveDate,

        /// Plan length in weeks (defaults to plan.default_weeks)
        #[arg(long)]
        weeks: Option<u32>,
    },

    /// Compute which week of a plan a date falls into
    WeekIndex {
        /// First Monday of the plan (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        start_date: NaiveDate,

        /// Plan length in weeks
        #[arg(long)]
        weeks: u32,

        /// Reference date (defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        on: Option<NaiveDate>,
    },

    /// List every week of a plan
    Weeks {
        /// Race day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        end_date: NaiveDate,

        /// Plan length in weeks (defaults to plan.default_weeks)
        #[arg(long)]
        weeks: Option<u32>,
    },

    /// Group workouts from a JSON file into plan weeks
    Summary {
        /// Race day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        end_date: NaiveDate,

        /// Plan length in weeks (defaults to plan.default_weeks)
        #[arg(long)]
        weeks: Option<u32>,

        /// JSON array of workouts
        #[arg(long)]
        workouts: PathBuf,

        /// Plan name shown in the summary
        #[arg(long, default_value = "Training Plan")]
        name: String,
    },
}

/// Settings resolved from flags and config
struct Context {
    today: NaiveDate,
    json: bool,
    default_weeks: u32,
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {

    if cli.verbose {
        runplan_core::logging::init_with_level("debug");
    } else {
        runplan_core::logging::init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = Context {
        today: cli.today.unwrap_or_else(|| config.today()),
        json: cli.json || config.output.format == OutputFormat::Json,
        default_weeks: config.plan.default_weeks,
    };
    tracing::debug!("Using {} as today", ctx.today);

    match cli.command {
        Commands::StartDate { end_date, weeks } => {
            cmd_start_date(&ctx, end_date, weeks.unwrap_or(ctx.default_weeks))
        }
        Commands::WeekIndex {
            start_date,
            weeks,
            on,
        } => cmd_week_index(&ctx, start_date, weeks, on.unwrap_or(ctx.today)),
        Commands::Weeks { end_date, weeks } => {
            cmd_weeks(&ctx, end_date, weeks.unwrap_or(ctx.default_weeks))
        }
        Commands::Summary {
            end_date,
            weeks,
            workouts,
            name,
        } => cmd_summary(
            &ctx,
            end_date,
            weeks.unwrap_or(ctx.default_weeks),
            &workouts,
            &name,
        ),
    }
}

fn cmd_start_date(ctx: &Context, end_date: NaiveDate, weeks: u32) -> Result<()> {
    let start = start_date_for(end_date, weeks)?;

    if ctx.json {
        print_json(&json!({
            "endDate": end_date,
            "weeks": weeks,
            "startDate": start,
        }))?;
    } else {
        println!("{}", format_date(start));
    }
    Ok(())
}

fn cmd_week_index(ctx: &Context, start_date: NaiveDate, weeks: u32, on: NaiveDate) -> Result<()> {
    let week = week_index_for(start_date, weeks, on)?;

    if ctx.json {
        print_json(&json!({
            "startDate": start_date,
            "weeks": weeks,
            "on": on,
            "week": week,
        }))?;
    } else {
        println!("{}", week);
    }
    Ok(())
}

fn cmd_weeks(ctx: &Context, end_date: NaiveDate, weeks: u32) -> Result<()> {
    let window = PlanWindow::new(end_date, weeks)?;
    let current = window.current_week(ctx.today);
    let ranges: Vec<WeekRange> = window.week_ranges().collect();

    if ctx.json {
        print_json(&json!({
            "startDate": window.start_date(),
            "endDate": window.end_date(),
            "weeks": window.weeks(),
            "currentWeek": current,
            "weekRanges": ranges,
        }))?;
        return Ok(());
    }

    println!(
        "{} to {} ({} weeks)",
        format_date(window.start_date()),
        format_date(window.end_date()),
        window.weeks()
    );
    for range in &ranges {
        let marker = if range.number == current { "  (current)" } else { "" };
        println!(
            "Week {:>2}  {} .. {}{}",
            range.number,
            format_date(range.start),
            format_date(range.end),
            marker
        );
    }
    Ok(())
}

fn cmd_summary(
    ctx: &Context,
    end_date: NaiveDate,
    weeks: u32,
    workouts_path: &Path,
    name: &str,
) -> Result<()> {
    let window = PlanWindow::new(end_date, weeks)?;
    let contents = std::fs::read_to_string(workouts_path)?;
    let workouts: Vec<Workout> = serde_json::from_str(&contents)?;
    tracing::debug!(
        "Read {} workouts from {}",
        workouts.len(),
        workouts_path.display()
    );

    let detail = build_plan_detail(name, &window, &workouts)?;
    let current = window.current_week(ctx.today);

    if ctx.json {
        print_json(&json!({
            "plan": detail,
            "currentWeek": current,
        }))?;
        return Ok(());
    }

    display_summary(&detail, current);
    Ok(())
}

fn display_summary(detail: &PlanDetail, current: u32) {
    let (done_km, planned_km) = detail.totals();
    println!(
        "{}  {} to {} ({} weeks)  {} / {} km",
        detail.name,
        format_date(detail.start_date),
        format_date(detail.end_date),
        detail.weeks,
        done_km,
        planned_km
    );

    for week in &detail.weeks_summary {
        println!();
        let mut header = format!("Week {}  {} / {} km", week.number, week.done_km, week.planned_km);
        if week.number == current {
            header.push_str("  (current)");
        }
        if week.all_done {
            header.push_str("  ✓");
        }
        println!("{}", header);

        for day in &week.days {
            for workout in &day.workouts {
                println!(
                    "  {:<9} {}  {} {} km [{}]",
                    day.day_name,
                    format_date(day.date),
                    workout.run_type.label(),
                    workout.distance,
                    workout.status.as_str()
                );
            }
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
