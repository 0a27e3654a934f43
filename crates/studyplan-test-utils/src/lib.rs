//! Shared test fixtures for studyplan integration tests.
//!
//! Provides syllabus builders, a fixed reference date, and plan stores
//! backed by a temporary directory that is removed on drop.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

use studyplan_store::{Importance, JsonFileStore, Syllabus, SyllabusUnit, Topic};

/// Reference "today" used across tests: 2025-01-06.
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).expect("valid fixed date")
}

/// `base_date() + offset` days.
pub fn day(offset: i64) -> NaiveDate {
    base_date() + Duration::days(offset)
}

pub fn topic(name: &str, importance: Importance) -> Topic {
    Topic {
        name: name.to_owned(),
        subtopics: Vec::new(),
        importance,
    }
}

pub fn unit(number: u32, title: &str, topics: Vec<Topic>) -> SyllabusUnit {
    SyllabusUnit {
        number,
        title: title.to_owned(),
        topics,
    }
}

/// Build a syllabus from per-unit importance lists.
///
/// Unit `i` is titled `"Unit {i+1}"`; topic `j` of that unit is named
/// `"U{i+1}T{j+1}"`.
pub fn syllabus_from(units: &[&[Importance]]) -> Syllabus {
    let units = units
        .iter()
        .enumerate()
        .map(|(i, imps)| {
            let n = i + 1;
            let topics = imps
                .iter()
                .enumerate()
                .map(|(j, imp)| topic(&format!("U{n}T{}", j + 1), *imp))
                .collect();
            unit(n as u32, &format!("Unit {n}"), topics)
        })
        .collect();
    Syllabus {
        course: Some("Test course".to_owned()),
        units,
    }
}

/// Two units of three topics with importances
/// `[High, Low, Medium]` and `[High, Medium, Low]`.
pub fn two_unit_syllabus() -> Syllabus {
    use Importance::{High, Low, Medium};
    syllabus_from(&[&[High, Low, Medium], &[High, Medium, Low]])
}

/// A syllabus with `n` topics in one unit, all of the given importance.
pub fn flat_syllabus(n: usize, importance: Importance) -> Syllabus {
    let imps = vec![importance; n];
    syllabus_from(&[imps.as_slice()])
}

/// A plan file inside a temporary directory.
///
/// The directory (and the file) is deleted when this value is dropped.
pub struct TempPlanFile {
    _dir: TempDir,
    path: PathBuf,
}

impl TempPlanFile {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("plan.json");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.path)
    }
}

impl Default for TempPlanFile {
    fn default() -> Self {
        Self::new()
    }
}
