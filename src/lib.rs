//! # seamark
//!
//! Decode maritime light characteristics (`Fl(2+1) R 10s`, `Mo(A) W`, `Q G`) and
//! play them back as a precisely timed on/off sequence.
//!
//! ## Pipeline
//! 1. [`parse()`] - notation string to [`LightSpecification`]
//! 2. [`playback::compile()`] - specification to [`playback::CompiledSequence`]
//! 3. [`playback::Scheduler`] - sequence to callbacks, looping until cancelled
//!
//! [`describe()`] turns a specification into English or French prose for the
//! display next to the lamp.

pub mod api;
pub mod ast;
pub mod catalog;
pub mod config;
pub mod describe;
pub mod error;
pub mod morse;
pub mod parser;
pub mod playback;
pub mod semantic;

pub use api::*;
pub use ast::*;
pub use config::PlayerConfig;
pub use describe::{describe, Language};
pub use error::*;
pub use parser::{parse, parse_with_default_period};
pub use semantic::validate;
