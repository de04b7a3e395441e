//! Known signal definitions.
//!
//! A built-in table of IALA buoyage characteristics, plus loading of user catalogs
//! from YAML:
//!
//! ```yaml
//! - name: Harbour entrance, port side
//!   notation: Fl(2) R 6s
//! - name: Breakwater head
//!   notation: Oc G 4s
//! ```

use crate::ast::LightSpecification;
use crate::error::{ConfigError, NotationError};
use crate::parser::parse;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in marks: (name, notation).
pub static MARKS: &[(&str, &str)] = &[
    ("North cardinal", "Q W"),
    ("North cardinal (very quick)", "VQ W"),
    ("East cardinal", "Q(3) W 10s"),
    ("East cardinal (very quick)", "VQ(3) W 5s"),
    ("South cardinal", "Q(6)+LFl W 15s"),
    ("South cardinal (very quick)", "VQ(6)+LFl W 10s"),
    ("West cardinal", "Q(9) W 15s"),
    ("West cardinal (very quick)", "VQ(9) W 10s"),
    ("Isolated danger", "Fl(2) W 5s"),
    ("Safe water (isophase)", "Iso W 4s"),
    ("Safe water (occulting)", "Oc W 6s"),
    ("Safe water (long flash)", "LFl W 10s"),
    ("Safe water (Morse)", "Mo(A) W 6s"),
    ("Special mark", "Fl Y 5s"),
    ("Emergency wreck mark", "Al BuY 3s"),
    ("Port lateral, region A", "Fl R 4s"),
    ("Starboard lateral, region A", "Fl G 4s"),
    ("Preferred channel to starboard, region A", "Fl(2+1) R 10s"),
    ("Preferred channel to port, region A", "Fl(2+1) G 10s"),
    ("Offshore structure", "Mo(U) W 15s"),
];

/// A named light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    pub notation: String,
}

impl Mark {
    pub fn spec(&self) -> Result<LightSpecification, NotationError> {
        parse(&self.notation)
    }
}

/// All built-in marks.
pub fn builtin_marks() -> Vec<Mark> {
    MARKS
        .iter()
        .map(|(name, notation)| Mark {
            name: name.to_string(),
            notation: notation.to_string(),
        })
        .collect()
}

/// Find a mark by name, ignoring case and surrounding whitespace.
pub fn find_mark<'a>(marks: &'a [Mark], name: &str) -> Option<&'a Mark> {
    let name = name.trim();
    marks.iter().find(|mark| mark.name.eq_ignore_ascii_case(name))
}

/// Parse a YAML catalog. Every entry must have a notation that parses.
pub fn marks_from_yaml(content: &str) -> Result<Vec<Mark>, ConfigError> {
    let marks: Vec<Mark> =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    for mark in &marks {
        mark.spec().map_err(|source| ConfigError::Entry {
            name: mark.name.clone(),
            source,
        })?;
    }
    Ok(marks)
}

pub fn load_marks(path: &Path) -> Result<Vec<Mark>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    marks_from_yaml(&content)
}
