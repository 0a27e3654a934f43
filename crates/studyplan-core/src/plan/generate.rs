//! Day-by-day schedule generation.
//!
//! The syllabus is flattened into (unit, topic) pairs, stable-sorted by
//! importance, and spread evenly over the days between tomorrow and the
//! revision block that ends the day before the exam.

use chrono::{Duration, Local, NaiveDate, Utc};
use studyplan_store::{ScheduledTopic, StudyDay, StudyPlan, Syllabus};
use tracing::info;
use uuid::Uuid;

use super::PlanError;

/// Labels for the synthetic topics on revision days, in order.
const REVISION_LABELS: [&str; 3] = [
    "High-priority topic review",
    "Practice previous year papers",
    "Quick formula and concept revision",
];

/// Tunables for plan generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Minimum number of days between today and the exam.
    pub min_lead_days: i64,
    /// Days before the exam reserved for revision.
    pub reserved_revision_days: u32,
}

impl PlannerConfig {
    pub const DEFAULT_MIN_LEAD_DAYS: i64 = 7;
    pub const DEFAULT_RESERVED_REVISION_DAYS: u32 = 3;
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_lead_days: Self::DEFAULT_MIN_LEAD_DAYS,
            reserved_revision_days: Self::DEFAULT_RESERVED_REVISION_DAYS,
        }
    }
}

/// Everything needed to generate a plan.
///
/// University, course, and exam date start unset and must all be selected
/// before [`generate_plan`] accepts the request. Use the builder-style
/// setters to fill them in.
#[derive(Debug, Clone)]
pub struct GeneratePlanRequest {
    pub university_id: Option<String>,
    pub course_id: Option<String>,
    pub exam_date: Option<NaiveDate>,
    /// The current date. Defaults to the local wall-clock date.
    pub today: NaiveDate,
    pub hours_per_day: u32,
    pub syllabus: Syllabus,
}

impl GeneratePlanRequest {
    pub const DEFAULT_HOURS_PER_DAY: u32 = 2;

    pub fn new(syllabus: Syllabus) -> Self {
        Self {
            university_id: None,
            course_id: None,
            exam_date: None,
            today: Local::now().date_naive(),
            hours_per_day: Self::DEFAULT_HOURS_PER_DAY,
            syllabus,
        }
    }

    pub fn university(mut self, id: impl Into<String>) -> Self {
        self.university_id = Some(id.into());
        self
    }

    pub fn course(mut self, id: impl Into<String>) -> Self {
        self.course_id = Some(id.into());
        self
    }

    pub fn exam_date(mut self, date: NaiveDate) -> Self {
        self.exam_date = Some(date);
        self
    }

    pub fn today(mut self, date: NaiveDate) -> Self {
        self.today = date;
        self
    }

    pub fn hours_per_day(mut self, hours: u32) -> Self {
        self.hours_per_day = hours;
        self
    }
}

/// Validate `request` and generate a fresh plan from it.
///
/// Fails with [`PlanError::IncompleteConfiguration`] when a selection is
/// missing and [`PlanError::InsufficientLeadTime`] when the exam is too
/// close. Nothing is produced on failure.
pub fn generate_plan(
    request: &GeneratePlanRequest,
    config: &PlannerConfig,
) -> Result<StudyPlan, PlanError> {
    let university_id = selected(&request.university_id, "university")?;
    let course_id = selected(&request.course_id, "course")?;
    let exam_date = request
        .exam_date
        .ok_or(PlanError::IncompleteConfiguration {
            missing: "exam date",
        })?;
    if request.hours_per_day == 0 {
        return Err(PlanError::InvalidHoursPerDay);
    }

    let days = build_schedule(&request.syllabus, exam_date, request.today, config)?;

    let plan = StudyPlan {
        id: Uuid::new_v4(),
        university_id: university_id.to_owned(),
        course_id: course_id.to_owned(),
        exam_date,
        hours_per_day: request.hours_per_day,
        created_at: Utc::now(),
        days,
        progress: 0,
    };

    info!(
        plan_id = %plan.id,
        course = %plan.course_id,
        exam_date = %plan.exam_date,
        days = plan.days.len(),
        topics = plan.total_topics(),
        "study plan generated"
    );

    Ok(plan)
}

fn selected<'a>(value: &'a Option<String>, what: &'static str) -> Result<&'a str, PlanError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(PlanError::IncompleteConfiguration { missing: what })
}

/// Build the ordered list of study and revision days.
///
/// 1. Flatten the syllabus into (unit, topic) pairs in source order.
/// 2. Stable-sort by importance (high first); ties keep source order.
/// 3. Spread `ceil(topics / study_days)` topics per day starting tomorrow,
///    where `study_days = days_until_exam - reserved_revision_days`.
/// 4. Append one day per reserved revision slot, the last one on the day
///    before the exam.
pub fn build_schedule(
    syllabus: &Syllabus,
    exam_date: NaiveDate,
    today: NaiveDate,
    config: &PlannerConfig,
) -> Result<Vec<StudyDay>, PlanError> {
    let days_until_exam = (exam_date - today).num_days();
    let reserved = i64::from(config.reserved_revision_days);

    if days_until_exam < config.min_lead_days {
        return Err(PlanError::InsufficientLeadTime {
            days_until_exam,
            minimum: config.min_lead_days,
        });
    }

    let study_days = days_until_exam - reserved;
    if study_days <= 0 {
        return Err(PlanError::InsufficientLeadTime {
            days_until_exam,
            minimum: reserved + 1,
        });
    }

    let mut flattened: Vec<ScheduledTopic> = syllabus
        .units
        .iter()
        .flat_map(|unit| {
            unit.topics
                .iter()
                .map(move |topic| ScheduledTopic::from_syllabus(unit, topic))
        })
        .collect();
    // `sort_by_key` is stable: equal importances keep syllabus order.
    flattened.sort_by_key(|t| t.importance);

    let mut days = Vec::new();

    if !flattened.is_empty() {
        let per_day = flattened.len().div_ceil(study_days as usize);
        for (i, chunk) in flattened.chunks(per_day).enumerate() {
            let date = today + Duration::days(i as i64 + 1);
            days.push(StudyDay::new(date, chunk.to_vec()));
        }
    }

    for r in 0..reserved {
        let date = exam_date - Duration::days(reserved - r);
        days.push(StudyDay::new(
            date,
            vec![ScheduledTopic::revision(revision_label(r as usize))],
        ));
    }

    Ok(days)
}

fn revision_label(index: usize) -> String {
    REVISION_LABELS
        .get(index)
        .map(|l| (*l).to_owned())
        .unwrap_or_else(|| format!("Revision day {}", index + 1))
}
