//! `studyplan status` command: show plan progress and what to study today.

use anyhow::Result;
use chrono::NaiveDate;

use studyplan_core::StudyPlanner;
use studyplan_store::{PlanStore, StudyDay, StudyPlan};

/// Run the status command.
pub fn run_status<S: PlanStore>(planner: &StudyPlanner<S>, today: NaiveDate) -> Result<()> {
    match planner.active() {
        Some(plan) => print!("{}", render_status(plan, today)),
        None => {
            println!("No active plan. Use `studyplan generate <syllabus.toml>` to create one.")
        }
    }
    Ok(())
}

pub fn render_status(plan: &StudyPlan, today: NaiveDate) -> String {
    let mut out = String::new();
    let days_left = (plan.exam_date - today).num_days();

    out.push_str(&format!("Plan: {} / {} ({})\n", plan.university_id, plan.course_id, plan.id));
    out.push_str(&format!(
        "Exam: {} ({})\n",
        plan.exam_date,
        match days_left {
            d if d > 1 => format!("in {d} days"),
            1 => "tomorrow".to_owned(),
            0 => "today".to_owned(),
            d => format!("{} day(s) ago", -d),
        }
    ));
    out.push_str(&format!(
        "Progress: {}% ({}/{} topics, {}/{} days)\n",
        plan.progress,
        plan.completed_topics(),
        plan.total_topics(),
        plan.completed_days(),
        plan.days.len()
    ));
    out.push('\n');

    match plan.day_for(today) {
        Some((index, day)) => {
            out.push_str(&format!("Today (day {}):\n", index + 1));
            push_topics(&mut out, day);
        }
        None => out.push_str("Nothing scheduled for today.\n"),
    }

    match plan.next_incomplete_day() {
        Some((index, day)) if day.date != today => {
            out.push('\n');
            out.push_str(&format!("Next open day: day {} ({})\n", index + 1, day.date));
            push_topics(&mut out, day);
        }
        Some(_) => {}
        None => {
            out.push('\n');
            out.push_str("All topics complete.\n");
        }
    }
    out
}

fn push_topics(out: &mut String, day: &StudyDay) {
    for (j, topic) in day.topics.iter().enumerate() {
        let check = if topic.completed { "x" } else { " " };
        out.push_str(&format!("  {}. [{}] {}\n", j + 1, check, topic.topic_name));
    }
}
