//! TOML format types for syllabus files.
//!
//! These types map directly to the `syllabus.toml` on-disk format and are
//! deserialized via `serde` + the `toml` crate. Importance stays a plain
//! string here; the parser turns it into an [`Importance`] and reports the
//! offending topic when it is not recognized.
//!
//! [`Importance`]: studyplan_store::Importance

use serde::{Deserialize, Serialize};

/// Top-level structure of a `syllabus.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyllabusToml {
    /// Optional syllabus metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus: Option<SyllabusMeta>,
    /// Units in teaching order.
    #[serde(default)]
    pub units: Vec<UnitToml>,
}

/// Syllabus-level metadata in `[syllabus]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SyllabusMeta {
    /// Course label shown in summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

/// A single `[[units]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitToml {
    /// 1-based unit number. Must be unique, need not be contiguous.
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub topics: Vec<TopicToml>,
}

/// A single `[[units.topics]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicToml {
    pub name: String,
    /// "high", "medium", or "low" (case-insensitive).
    pub importance: String,
    #[serde(default)]
    pub subtopics: Vec<String>,
}
