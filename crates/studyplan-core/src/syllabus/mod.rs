//! Syllabus input: TOML file format and boundary validation.

pub mod parser;
pub mod toml_format;

pub use parser::{SyllabusParseError, load_syllabus, parse_syllabus_toml, validate_syllabus};
pub use toml_format::{SyllabusMeta, SyllabusToml, TopicToml, UnitToml};
