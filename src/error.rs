//! # Error Types
//!
//! This module defines the error type produced by the light notation parser, and the
//! error type for loading configuration and catalog files.
//!
//! Only parsing (and validation of hand-built specifications) can fail. Compiling a
//! valid [`LightSpecification`](crate::LightSpecification) and playing it back are
//! total operations, so a caller that holds a specification never handles errors again.
//!
//! ## Error Kinds
//! - `UnrecognizedRhythm` - no rhythm keyword matched the notation
//! - `InvalidGroup` - the parenthesized group could not be read
//! - `InvalidPeriod` - the trailing period is zero or unreadable
//! - `InvalidSpecification` - a specification violates the data model invariants
//!
//! ## Usage
//! ```rust
//! use seamark::{parse, NotationError};
//!
//! match parse("Zx 5s") {
//!     Ok(spec) => println!("{:?}", spec),
//!     Err(NotationError::UnrecognizedRhythm) => eprintln!("Unknown rhythm"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotationError {
    /// No entry of the rhythm keyword table matched the notation.
    ///
    /// # Example
    /// ```
    /// # use seamark::NotationError;
    /// assert_eq!(NotationError::UnrecognizedRhythm.to_string(), "unrecognized rhythm");
    /// ```
    #[error("unrecognized rhythm")]
    UnrecognizedRhythm,

    /// The group (the part in parentheses) is malformed.
    ///
    /// # Example
    /// ```
    /// # use seamark::NotationError;
    /// let err = NotationError::InvalidGroup("'X' is not a number".to_string());
    /// assert_eq!(err.to_string(), "invalid group syntax: 'X' is not a number");
    /// ```
    #[error("invalid group syntax: {0}")]
    InvalidGroup(String),

    /// The period suffix is not a positive number of seconds.
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// A specification that breaks one of the model invariants.
    #[error("invalid light specification: {0}")]
    InvalidSpecification(String),
}

impl NotationError {
    /// Short reason without the detail, suitable for a status line.
    pub fn reason(&self) -> &'static str {
        match self {
            NotationError::UnrecognizedRhythm => "unrecognized rhythm",
            NotationError::InvalidGroup(_) => "invalid group syntax",
            NotationError::InvalidPeriod(_) => "invalid period",
            NotationError::InvalidSpecification(_) => "invalid light specification",
        }
    }
}

/// Errors from loading a configuration or catalog file.
///
/// Kept apart from [`NotationError`]: the notation core never touches files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid YAML, or YAML that does not match the expected shape.
    ///
    /// # Example
    /// ```
    /// # use seamark::ConfigError;
    /// let err = ConfigError::Invalid("time-scale must be greater than zero".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: time-scale must be greater than zero");
    /// ```
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A catalog entry whose notation does not parse.
    #[error("Catalog entry '{name}': {source}")]
    Entry {
        name: String,
        #[source]
        source: NotationError,
    },
}
