//! Study plan data model and persistence.
//!
//! Holds the serde types shared by every other crate and the single-slot
//! [`PlanStore`](store::PlanStore) that keeps the active plan between runs.

pub mod config;
pub mod models;
pub mod store;

pub use config::StoreConfig;
pub use models::{
    Importance, REVISION_UNIT_TITLE, ScheduledTopic, StudyDay, StudyPlan, Syllabus, SyllabusUnit,
    Topic,
};
pub use store::{JsonFileStore, MemoryStore, PlanStore, StoreError};
