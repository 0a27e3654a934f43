//! CLI handlers for plan lifecycle commands.
//!
//! Implements:
//! - `studyplan generate <syllabus>` -- build a new plan and make it active
//! - `studyplan show`                -- print the day-by-day schedule
//! - `studyplan toggle <day> <topic>` -- flip a topic's completion
//! - `studyplan reset`               -- discard the active plan

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use studyplan_core::{
    GeneratePlanRequest, StudyPlanner, ToggleOutcome, ToggleTopicRequest, load_syllabus,
};
use studyplan_store::{PlanStore, StudyDay, StudyPlan};

/// Arguments for `studyplan generate`, after config resolution.
#[derive(Debug)]
pub struct GenerateArgs {
    pub syllabus: PathBuf,
    pub university: Option<String>,
    pub course: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub hours_per_day: u32,
    pub today: NaiveDate,
}

// -----------------------------------------------------------------------
// studyplan generate <syllabus>
// -----------------------------------------------------------------------

/// Read a syllabus file, generate a plan from it, persist it, and print a
/// summary.
pub fn cmd_generate<S: PlanStore>(
    planner: &mut StudyPlanner<S>,
    args: &GenerateArgs,
) -> Result<()> {
    // 1. Read and validate the syllabus.
    let syllabus = load_syllabus(&args.syllabus)
        .with_context(|| format!("failed to load syllabus: {}", args.syllabus.display()))?;
    let topic_count = syllabus.topic_count();

    // 2. Build the request from whatever the user selected.
    let mut request = GeneratePlanRequest::new(syllabus)
        .today(args.today)
        .hours_per_day(args.hours_per_day);
    request.university_id = args.university.clone();
    request.course_id = args.course.clone();
    request.exam_date = args.exam_date;

    let replacing = planner.active().map(|p| p.id);

    // 3. Generate and persist.
    let plan = planner.generate(&request)?;

    // 4. Print summary.
    println!("Study plan created.");
    println!();
    println!("  Plan ID:        {}", plan.id);
    println!("  University:     {}", plan.university_id);
    println!("  Course:         {}", plan.course_id);
    println!("  Exam date:      {}", plan.exam_date);
    println!("  Hours per day:  {}", plan.hours_per_day);
    println!("  Topics:         {topic_count}");
    println!("  Study days:     {}", plan.study_days().count());
    println!("  Revision days:  {}", plan.revision_days().count());
    if let Some(old) = replacing {
        println!();
        println!("Replaced previous plan {old}.");
    }

    Ok(())
}

// -----------------------------------------------------------------------
// studyplan show
// -----------------------------------------------------------------------

/// Print every day of the active plan with numbered topics.
pub fn cmd_show<S: PlanStore>(planner: &StudyPlanner<S>, today: NaiveDate) -> Result<()> {
    let Some(plan) = planner.active() else {
        println!("No active plan. Use `studyplan generate <syllabus.toml>` to create one.");
        return Ok(());
    };

    print!("{}", render_schedule(plan, today));
    Ok(())
}

/// Render the schedule as text. Day and topic numbers are 1-based, matching
/// what `studyplan toggle` expects.
pub fn render_schedule(plan: &StudyPlan, today: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Plan {} ({} / {}), exam on {}, progress {}%\n\n",
        plan.id, plan.university_id, plan.course_id, plan.exam_date, plan.progress
    ));

    for (i, day) in plan.days.iter().enumerate() {
        out.push_str(&format!(
            "Day {:>2}  {}  {}{}\n",
            i + 1,
            day.date,
            day_marker(day),
            if day.date == today { "  <- today" } else { "" },
        ));
        for (j, topic) in day.topics.iter().enumerate() {
            let check = if topic.completed { "x" } else { " " };
            out.push_str(&format!(
                "    {}. [{}] {} / {} ({})\n",
                j + 1,
                check,
                topic.unit_title,
                topic.topic_name,
                topic.importance
            ));
            if !topic.subtopics.is_empty() {
                out.push_str(&format!("         {}\n", topic.subtopics.join(", ")));
            }
        }
    }
    out
}

fn day_marker(day: &StudyDay) -> &'static str {
    match (day.is_revision(), day.is_completed) {
        (_, true) => "[done]",
        (true, false) => "[revision]",
        (false, false) => "",
    }
}

// -----------------------------------------------------------------------
// studyplan toggle <day> <topic>
// -----------------------------------------------------------------------

/// Convert a 1-based number from the command line to an index.
pub fn to_index(n: usize, what: &str) -> Result<usize> {
    match n.checked_sub(1) {
        Some(i) => Ok(i),
        None => bail!("{what} numbers start at 1"),
    }
}

/// Flip a topic's completion and report progress and milestones.
pub fn cmd_toggle<S: PlanStore>(
    planner: &mut StudyPlanner<S>,
    day: usize,
    topic: usize,
) -> Result<()> {
    let request = ToggleTopicRequest::new(to_index(day, "day")?, to_index(topic, "topic")?);
    let outcome = planner.toggle(request)?;

    let name = planner
        .active()
        .and_then(|p| p.days.get(request.day_index))
        .and_then(|d| d.topics.get(request.topic_index))
        .map(|t| t.topic_name.clone())
        .unwrap_or_default();

    let state = if outcome.completed { "done" } else { "not done" };
    println!("Marked \"{name}\" as {state}.");
    if outcome.day_completed {
        println!("Day {day} complete.");
    }
    println!("Progress: {}% (was {}%)", outcome.progress, outcome.previous_progress);
    if !outcome.milestones.is_empty() {
        println!();
        print!("{}", render_milestones(&outcome));
    }

    Ok(())
}

/// One line per milestone reached, lowest threshold first.
pub fn render_milestones(outcome: &ToggleOutcome) -> String {
    outcome
        .milestones
        .iter()
        .map(|m| format!("Milestone reached: {}% of your plan is complete!\n", m.threshold))
        .collect()
}

// -----------------------------------------------------------------------
// studyplan reset
// -----------------------------------------------------------------------

pub fn cmd_reset<S: PlanStore>(planner: &mut StudyPlanner<S>) -> Result<()> {
    let had_plan = planner.active().is_some();
    planner.reset()?;
    if had_plan {
        println!("Study plan discarded.");
    } else {
        println!("No active plan; nothing to reset.");
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
