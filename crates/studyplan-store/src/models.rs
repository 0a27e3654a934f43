use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unit title carried by the synthetic topics on revision days.
pub const REVISION_UNIT_TITLE: &str = "Revision";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Priority tier of a syllabus topic.
///
/// Variant order is the scheduling order: `High < Medium < Low`, so sorting
/// ascending puts high-priority topics first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        f.write_str(s)
    }
}

impl FromStr for Importance {
    type Err = ImportanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ImportanceParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Importance`] string.
#[derive(Debug, Clone)]
pub struct ImportanceParseError(pub String);

impl fmt::Display for ImportanceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid importance: {:?}", self.0)
    }
}

impl std::error::Error for ImportanceParseError {}

// ---------------------------------------------------------------------------
// Syllabus
// ---------------------------------------------------------------------------

/// A course syllabus as delivered by the syllabus provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabus {
    /// Optional course label, informational only.
    pub course: Option<String>,
    /// Units in teaching order.
    pub units: Vec<SyllabusUnit>,
}

impl Syllabus {
    /// Number of (unit, topic) pairs across the whole syllabus.
    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|u| u.topics.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusUnit {
    /// 1-based sequencing number. Gaps are allowed.
    pub number: u32,
    pub title: String,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub subtopics: Vec<String>,
    pub importance: Importance,
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// A topic placed on a specific study day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTopic {
    pub unit_title: String,
    pub topic_name: String,
    pub subtopics: Vec<String>,
    pub importance: Importance,
    #[serde(default)]
    pub completed: bool,
    /// Synthetic revision entry rather than a syllabus topic.
    #[serde(default)]
    pub revision: bool,
}

impl ScheduledTopic {
    /// Copy a syllabus topic into a schedule slot, not yet completed.
    pub fn from_syllabus(unit: &SyllabusUnit, topic: &Topic) -> Self {
        Self {
            unit_title: unit.title.clone(),
            topic_name: topic.name.clone(),
            subtopics: topic.subtopics.clone(),
            importance: topic.importance,
            completed: false,
            revision: false,
        }
    }

    /// Build the single synthetic topic carried by a revision day.
    pub fn revision(label: impl Into<String>) -> Self {
        Self {
            unit_title: REVISION_UNIT_TITLE.to_owned(),
            topic_name: label.into(),
            subtopics: Vec::new(),
            importance: Importance::High,
            completed: false,
            revision: true,
        }
    }

    pub fn is_revision(&self) -> bool {
        self.revision
    }
}

/// One calendar day of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDay {
    pub date: NaiveDate,
    pub topics: Vec<ScheduledTopic>,
    /// True iff every topic on this day is completed. Kept in sync by
    /// [`StudyDay::refresh_completion`].
    #[serde(default)]
    pub is_completed: bool,
}

impl StudyDay {
    pub fn new(date: NaiveDate, topics: Vec<ScheduledTopic>) -> Self {
        let mut day = Self {
            date,
            topics,
            is_completed: false,
        };
        day.refresh_completion();
        day
    }

    pub fn refresh_completion(&mut self) {
        self.is_completed = !self.topics.is_empty() && self.topics.iter().all(|t| t.completed);
    }

    pub fn is_revision(&self) -> bool {
        !self.topics.is_empty() && self.topics.iter().all(ScheduledTopic::is_revision)
    }

    pub fn completed_topics(&self) -> usize {
        self.topics.iter().filter(|t| t.completed).count()
    }
}

/// The single active study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub id: Uuid,
    pub university_id: String,
    pub course_id: String,
    pub exam_date: NaiveDate,
    /// Advisory only; scheduling never reads it.
    pub hours_per_day: u32,
    pub created_at: DateTime<Utc>,
    pub days: Vec<StudyDay>,
    /// Percent of all scheduled topics completed, 0..=100.
    #[serde(default)]
    pub progress: u8,
}

impl StudyPlan {
    pub fn total_topics(&self) -> usize {
        self.days.iter().map(|d| d.topics.len()).sum()
    }

    pub fn completed_topics(&self) -> usize {
        self.days.iter().map(StudyDay::completed_topics).sum()
    }

    pub fn completed_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_completed).count()
    }

    /// Recompute `progress` from topic completion flags and return it.
    ///
    /// A plan without topics has progress 0.
    pub fn recompute_progress(&mut self) -> u8 {
        self.progress = percent(self.completed_topics(), self.total_topics());
        self.progress
    }

    /// Days carrying syllabus topics, in schedule order.
    pub fn study_days(&self) -> impl Iterator<Item = &StudyDay> {
        self.days.iter().filter(|d| !d.is_revision())
    }

    /// The reserved revision days, in schedule order.
    pub fn revision_days(&self) -> impl Iterator<Item = &StudyDay> {
        self.days.iter().filter(|d| d.is_revision())
    }

    /// Index and day of the first scheduled day on `date`, if any.
    pub fn day_for(&self, date: NaiveDate) -> Option<(usize, &StudyDay)> {
        self.days.iter().enumerate().find(|(_, d)| d.date == date)
    }

    /// First day (by schedule order) not yet completed.
    pub fn next_incomplete_day(&self) -> Option<(usize, &StudyDay)> {
        self.days.iter().enumerate().find(|(_, d)| !d.is_completed)
    }
}

/// Round-half-up integer percentage. Returns 0 when `total` is 0.
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (200 * done + total) / (2 * total);
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan_with(days: Vec<StudyDay>) -> StudyPlan {
        StudyPlan {
            id: Uuid::new_v4(),
            university_id: "uni".to_owned(),
            course_id: "course".to_owned(),
            exam_date: date(2025, 3, 20),
            hours_per_day: 2,
            created_at: Utc::now(),
            days,
            progress: 0,
        }
    }

    fn topic(name: &str, completed: bool) -> ScheduledTopic {
        ScheduledTopic {
            unit_title: "Unit".to_owned(),
            topic_name: name.to_owned(),
            subtopics: vec![],
            importance: Importance::Medium,
            completed,
            revision: false,
        }
    }

    #[test]
    fn importance_orders_high_first() {
        let mut v = vec![Importance::Low, Importance::High, Importance::Medium];
        v.sort();
        assert_eq!(v, vec![Importance::High, Importance::Medium, Importance::Low]);
    }

    #[test]
    fn importance_parse_is_case_insensitive() {
        assert_eq!("High".parse::<Importance>().unwrap(), Importance::High);
        assert_eq!("MEDIUM".parse::<Importance>().unwrap(), Importance::Medium);
        assert_eq!("low".parse::<Importance>().unwrap(), Importance::Low);
        let err = "urgent".parse::<Importance>().unwrap_err();
        assert_eq!(err.to_string(), "invalid importance: \"urgent\"");
    }

    #[test]
    fn importance_display_roundtrips() {
        for imp in [Importance::High, Importance::Medium, Importance::Low] {
            assert_eq!(imp.to_string().parse::<Importance>().unwrap(), imp);
        }
    }

    #[test]
    fn day_completion_requires_every_topic() {
        let mut day = StudyDay::new(date(2025, 3, 1), vec![topic("a", true), topic("b", false)]);
        assert!(!day.is_completed);
        day.topics[1].completed = true;
        day.refresh_completion();
        assert!(day.is_completed);
    }

    #[test]
    fn progress_rounds_half_up() {
        // 1 of 8 = 12.5% -> 13
        let topics = (0..8).map(|i| topic(&i.to_string(), i == 0)).collect();
        let mut plan = plan_with(vec![StudyDay::new(date(2025, 3, 1), topics)]);
        assert_eq!(plan.recompute_progress(), 13);
    }

    #[test]
    fn progress_of_empty_plan_is_zero() {
        let mut plan = plan_with(vec![]);
        assert_eq!(plan.recompute_progress(), 0);
    }

    #[test]
    fn revision_days_are_recognized() {
        let plan = plan_with(vec![
            StudyDay::new(date(2025, 3, 1), vec![topic("a", false)]),
            StudyDay::new(date(2025, 3, 2), vec![ScheduledTopic::revision("Review")]),
        ]);
        assert_eq!(plan.study_days().count(), 1);
        assert_eq!(plan.revision_days().count(), 1);
        let rev = plan.revision_days().next().unwrap();
        assert_eq!(rev.topics[0].unit_title, REVISION_UNIT_TITLE);
        assert_eq!(rev.topics[0].importance, Importance::High);
        assert!(rev.topics[0].subtopics.is_empty());
    }

    #[test]
    fn syllabus_unit_named_revision_is_not_a_revision_day() {
        let unit = SyllabusUnit {
            number: 9,
            title: REVISION_UNIT_TITLE.to_owned(),
            topics: vec![],
        };
        let t = Topic {
            name: "Past papers".to_owned(),
            subtopics: vec![],
            importance: Importance::Low,
        };
        assert!(!ScheduledTopic::from_syllabus(&unit, &t).is_revision());
    }

    #[test]
    fn day_for_finds_scheduled_date() {
        let plan = plan_with(vec![
            StudyDay::new(date(2025, 3, 1), vec![topic("a", false)]),
            StudyDay::new(date(2025, 3, 2), vec![topic("b", false)]),
        ]);
        let (idx, day) = plan.day_for(date(2025, 3, 2)).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(day.topics[0].topic_name, "b");
        assert!(plan.day_for(date(2025, 4, 1)).is_none());
    }
}
