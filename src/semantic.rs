//! # Semantic Validation Module
//!
//! The parser only ever builds well-formed specifications, but a
//! [`LightSpecification`] can also be built by hand or deserialized from a catalog
//! file. This module checks the data model invariants for those cases.
//!
//! ## Validation Rules
//! - The period is a finite number of seconds in `(0, MAX_PERIOD_SECONDS]`
//! - Every group element is at most `MAX_GROUP_ELEMENT`
//! - A Morse light carries exactly one letter `A`–`Z`, and only Morse lights carry one
//! - Eclipse durations belong to Occulting lights, and an Occulting group is not empty
//! - A composite group has at least two parts
//!
//! ## Example
//! ```rust
//! use seamark::{validate, LightSpecification, RhythmKind};
//!
//! let spec = LightSpecification::new(RhythmKind::Isophase).with_period(0.0);
//! assert!(validate(&spec).is_err());
//! ```

use crate::ast::*;
use crate::error::NotationError;

/// Validate a specification against the model invariants.
pub fn validate(spec: &LightSpecification) -> Result<(), NotationError> {
    validate_period(spec)?;
    validate_group_elements(spec)?;
    validate_group(spec)?;
    Ok(())
}

fn validate_period(spec: &LightSpecification) -> Result<(), NotationError> {
    if !spec.period_seconds.is_finite() || spec.period_seconds <= 0.0 {
        return Err(NotationError::InvalidSpecification(format!(
            "period must be greater than zero, got {}",
            spec.period_seconds
        )));
    }
    if spec.period_seconds > MAX_PERIOD_SECONDS {
        return Err(NotationError::InvalidSpecification(format!(
            "period must be at most {} s, got {}",
            MAX_PERIOD_SECONDS, spec.period_seconds
        )));
    }
    Ok(())
}

fn validate_group_elements(spec: &LightSpecification) -> Result<(), NotationError> {
    match spec.group.values().into_iter().find(|&v| v > MAX_GROUP_ELEMENT) {
        Some(value) => Err(NotationError::InvalidSpecification(format!(
            "group element {} is more than {}",
            value, MAX_GROUP_ELEMENT
        ))),
        None => Ok(()),
    }
}

fn validate_group(spec: &LightSpecification) -> Result<(), NotationError> {
    match (&spec.group, spec.rhythm) {
        (Group::Letter(c), RhythmKind::Morse) if c.is_ascii_uppercase() => Ok(()),
        (Group::Letter(c), RhythmKind::Morse) => Err(NotationError::InvalidSpecification(format!(
            "Morse letter must be A-Z, got '{}'",
            c
        ))),
        (_, RhythmKind::Morse) => Err(NotationError::InvalidSpecification(
            "Morse light needs exactly one letter".to_string(),
        )),
        (Group::Letter(_), rhythm) => Err(NotationError::InvalidSpecification(format!(
            "{} light cannot carry a Morse letter",
            rhythm
        ))),
        (Group::Eclipses(eclipses), RhythmKind::Occulting) if eclipses.is_empty() => Err(
            NotationError::InvalidSpecification("Occulting group has no eclipses".to_string()),
        ),
        (Group::Eclipses(_), RhythmKind::Occulting) => Ok(()),
        (Group::Eclipses(_), rhythm) => Err(NotationError::InvalidSpecification(format!(
            "{} light cannot carry eclipse durations",
            rhythm
        ))),
        (Group::Composite(parts), _) if parts.len() < 2 => Err(NotationError::InvalidSpecification(
            "composite group needs at least two parts".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_parsed_specs_are_valid() {
        for notation in ["Q", "Fl(2+1) R 10s", "Mo(A) W", "Oc(2) 6s", "Al WR 4s", "F G"] {
            let spec = parse(notation).unwrap();
            assert!(validate(&spec).is_ok(), "{}", notation);
        }
    }

    #[test]
    fn test_non_positive_period() {
        let spec = LightSpecification::new(RhythmKind::Fixed).with_period(-1.0);
        assert!(validate(&spec).is_err());
        let spec = LightSpecification::new(RhythmKind::Fixed).with_period(f64::NAN);
        assert!(validate(&spec).is_err());
    }

    #[test]
    fn test_period_upper_bound() {
        let spec = LightSpecification::new(RhythmKind::Occulting).with_period(1e16);
        assert!(validate(&spec).is_err());
        let spec = LightSpecification::new(RhythmKind::Occulting).with_period(MAX_PERIOD_SECONDS);
        assert!(validate(&spec).is_ok());
    }

    #[test]
    fn test_group_elements_bounded() {
        let flashing = LightSpecification::new(RhythmKind::Flashing);
        assert!(validate(&flashing.clone().with_group(Group::Count(u32::MAX))).is_err());
        assert!(validate(&flashing.with_group(Group::Composite(vec![2, 100]))).is_err());
        let occulting = LightSpecification::new(RhythmKind::Occulting);
        assert!(validate(&occulting.with_group(Group::Eclipses(vec![1000]))).is_err());
    }

    #[test]
    fn test_morse_needs_letter() {
        let spec = LightSpecification::new(RhythmKind::Morse);
        assert!(validate(&spec).is_err());
        let spec = LightSpecification::new(RhythmKind::Morse).with_group(Group::Letter('a'));
        assert!(validate(&spec).is_err());
        let spec = LightSpecification::new(RhythmKind::Morse).with_group(Group::Letter('U'));
        assert!(validate(&spec).is_ok());
    }

    #[test]
    fn test_letter_only_for_morse() {
        let spec = LightSpecification::new(RhythmKind::Flashing).with_group(Group::Letter('A'));
        assert!(validate(&spec).is_err());
    }

    #[test]
    fn test_eclipses_only_for_occulting() {
        let spec =
            LightSpecification::new(RhythmKind::Flashing).with_group(Group::Eclipses(vec![2]));
        assert!(validate(&spec).is_err());
        let spec =
            LightSpecification::new(RhythmKind::Occulting).with_group(Group::Eclipses(vec![]));
        assert!(validate(&spec).is_err());
    }

    #[test]
    fn test_composite_needs_two_parts() {
        let spec =
            LightSpecification::new(RhythmKind::Flashing).with_group(Group::Composite(vec![2]));
        assert!(validate(&spec).is_err());
    }
}
