//! Study plan generation, completion tracking, and calendar export.

pub mod calendar;
pub mod plan;
pub mod planner;
pub mod syllabus;

pub use calendar::export_schedule_as_calendar;
pub use plan::{
    GeneratePlanRequest, Milestone, PlanError, PlannerConfig, ToggleOutcome, build_schedule,
    generate_plan, toggle_topic_completion,
};
pub use planner::{PlanState, PlannerError, StudyPlanner, ToggleTopicRequest};
pub use syllabus::{SyllabusParseError, load_syllabus, parse_syllabus_toml, validate_syllabus};
