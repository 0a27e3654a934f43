//! Syllabus TOML parser with validation.
//!
//! Parses a `syllabus.toml` string into a [`Syllabus`] and validates:
//! - Importance values are `high`, `medium`, or `low`.
//! - Unit numbers are at least 1 and unique.
//! - Unit titles and topic names are not blank.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use studyplan_store::{Importance, Syllabus, SyllabusUnit, Topic};
use thiserror::Error;

use super::toml_format::SyllabusToml;

/// Errors that can occur while loading or validating a syllabus.
#[derive(Debug, Error)]
pub enum SyllabusParseError {
    #[error("failed to read syllabus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid importance {value:?} on topic {topic:?} (expected high, medium, or low)")]
    InvalidImportance { topic: String, value: String },

    #[error("unit {title:?} has number 0 (unit numbers start at 1)")]
    InvalidUnitNumber { title: String },

    #[error("duplicate unit number: {0}")]
    DuplicateUnitNumber(u32),

    #[error("unit {0} has an empty title")]
    EmptyUnitTitle(u32),

    #[error("unit {0} has a topic with an empty name")]
    EmptyTopicName(u32),
}

/// Read and parse a syllabus file from disk.
pub fn load_syllabus(path: &Path) -> Result<Syllabus, SyllabusParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| SyllabusParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_syllabus_toml(&content)
}

/// Parse and validate a `syllabus.toml` string.
pub fn parse_syllabus_toml(content: &str) -> Result<Syllabus, SyllabusParseError> {
    let raw: SyllabusToml = toml::from_str(content)?;
    let syllabus = convert(raw)?;
    validate_syllabus(&syllabus)?;
    Ok(syllabus)
}

fn convert(raw: SyllabusToml) -> Result<Syllabus, SyllabusParseError> {
    let mut units = Vec::with_capacity(raw.units.len());
    for unit in raw.units {
        let mut topics = Vec::with_capacity(unit.topics.len());
        for topic in unit.topics {
            let importance = topic.importance.parse::<Importance>().map_err(|_| {
                SyllabusParseError::InvalidImportance {
                    topic: topic.name.clone(),
                    value: topic.importance.clone(),
                }
            })?;
            topics.push(Topic {
                name: topic.name,
                subtopics: topic.subtopics,
                importance,
            });
        }
        units.push(SyllabusUnit {
            number: unit.number,
            title: unit.title,
            topics,
        });
    }

    Ok(Syllabus {
        course: raw.syllabus.and_then(|m| m.course),
        units,
    })
}

/// Validate a syllabus that entered the system from any provider.
///
/// An empty syllabus is valid; generating from it yields revision days only.
pub fn validate_syllabus(syllabus: &Syllabus) -> Result<(), SyllabusParseError> {
    let mut seen = HashSet::new();
    for unit in &syllabus.units {
        if unit.number == 0 {
            return Err(SyllabusParseError::InvalidUnitNumber {
                title: unit.title.clone(),
            });
        }
        if !seen.insert(unit.number) {
            return Err(SyllabusParseError::DuplicateUnitNumber(unit.number));
        }
        if unit.title.trim().is_empty() {
            return Err(SyllabusParseError::EmptyUnitTitle(unit.number));
        }
        if unit.topics.iter().any(|t| t.name.trim().is_empty()) {
            return Err(SyllabusParseError::EmptyTopicName(unit.number));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_syllabus() {
        let toml_str = r#"
[syllabus]
course = "Biology"

[[units]]
number = 1
title = "Cells"

[[units.topics]]
name = "Cell structure"
importance = "High"
subtopics = ["Membrane", "Nucleus"]

[[units.topics]]
name = "Cell division"
importance = "medium"

[[units]]
number = 3
title = "Genetics"

[[units.topics]]
name = "Mendel"
importance = "LOW"
"#;
        let s = parse_syllabus_toml(toml_str).expect("should parse");
        assert_eq!(s.course.as_deref(), Some("Biology"));
        assert_eq!(s.units.len(), 2);
        assert_eq!(s.topic_count(), 3);
        assert_eq!(s.units[0].topics[0].importance, Importance::High);
        assert_eq!(s.units[0].topics[1].importance, Importance::Medium);
        assert_eq!(s.units[1].topics[0].importance, Importance::Low);
        assert_eq!(s.units[0].topics[0].subtopics, vec!["Membrane", "Nucleus"]);
    }

    #[test]
    fn accepts_empty_syllabus() {
        let s = parse_syllabus_toml("[syllabus]\ncourse = \"Empty\"\n").expect("should parse");
        assert!(s.units.is_empty());
        assert_eq!(s.topic_count(), 0);
    }

    #[test]
    fn rejects_invalid_importance() {
        let toml_str = r#"
[[units]]
number = 1
title = "Cells"

[[units.topics]]
name = "Cell structure"
importance = "critical"
"#;
        let err = parse_syllabus_toml(toml_str).unwrap_err();
        assert!(
            matches!(
                err,
                SyllabusParseError::InvalidImportance { ref value, .. } if value == "critical"
            ),
            "expected InvalidImportance, got: {err}"
        );
    }

    #[test]
    fn rejects_duplicate_unit_numbers() {
        let toml_str = r#"
[[units]]
number = 2
title = "A"

[[units]]
number = 2
title = "B"
"#;
        let err = parse_syllabus_toml(toml_str).unwrap_err();
        assert!(
            matches!(err, SyllabusParseError::DuplicateUnitNumber(2)),
            "expected DuplicateUnitNumber, got: {err}"
        );
    }

    #[test]
    fn rejects_unit_number_zero() {
        let toml_str = r#"
[[units]]
number = 0
title = "Zero"
"#;
        let err = parse_syllabus_toml(toml_str).unwrap_err();
        assert!(
            matches!(err, SyllabusParseError::InvalidUnitNumber { .. }),
            "expected InvalidUnitNumber, got: {err}"
        );
    }

    #[test]
    fn rejects_blank_titles_and_names() {
        let blank_title = r#"
[[units]]
number = 1
title = "   "
"#;
        let err = parse_syllabus_toml(blank_title).unwrap_err();
        assert!(matches!(err, SyllabusParseError::EmptyUnitTitle(1)), "got: {err}");

        let blank_topic = r#"
[[units]]
number = 5
title = "Unit"

[[units.topics]]
name = ""
importance = "low"
"#;
        let err = parse_syllabus_toml(blank_topic).unwrap_err();
        assert!(matches!(err, SyllabusParseError::EmptyTopicName(5)), "got: {err}");
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_syllabus_toml("this is not valid toml {{{").unwrap_err();
        assert!(
            matches!(err, SyllabusParseError::TomlError(_)),
            "expected TomlError, got: {err}"
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_syllabus(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SyllabusParseError::Io { .. }), "got: {err}");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("syllabus.toml");
        std::fs::write(
            &path,
            "[[units]]\nnumber = 1\ntitle = \"Only\"\n\n\
             [[units.topics]]\nname = \"T\"\nimportance = \"medium\"\n",
        )
        .unwrap();
        let s = load_syllabus(&path).expect("should load");
        assert_eq!(s.topic_count(), 1);
    }
}
