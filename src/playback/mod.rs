//! # Playback Module
//!
//! Turn a parsed light characteristic into timed on/off segments and play them back
//! in real time.
//!
//! ## Purpose
//! This module converts a [`LightSpecification`](crate::LightSpecification) into a
//! [`CompiledSequence`] that can be used for:
//! 1. **Live simulation** - a lamp widget that switches on and off at each boundary
//! 2. **Static timelines** - drawing one period of the characteristic as a bar
//! 3. **Checks** - comparing lit time and cycle length against the declared period
//!
//! ## Sub-modules
//! - `types` - TimedSegment, CompiledSequence, OverrunPolicy type definitions
//! - `engine` - Rhythm-specific segment generation and the trailing fill
//! - `scheduler` - PlaybackHandle and Scheduler, the tokio timer loop
//!
//! ## Entry Points
//! - [`compile()`] - Specification to sequence
//! - [`Scheduler::play()`] - Sequence to callbacks, one handle per target
//!
//! ## Example
//! ```rust
//! use seamark::{parse, playback::compile};
//!
//! let spec = parse("Iso G 4s").unwrap();
//! let sequence = compile(&spec);
//!
//! assert_eq!(sequence.len(), 2);
//! assert_eq!(sequence.segments[0].duration_ms, 2000);
//! assert!(sequence.segments[0].on);
//! assert!(!sequence.segments[1].on);
//! ```
//!
//! ## Timing Rules
//!
//! All durations are integer milliseconds so that one cycle sums exactly to the
//! period. After the rhythm's own segments, a single dark segment pads the cycle up
//! to the period. When the rhythm's segments already exceed the period (for example
//! `Oc(6+6) 10s`), [`OverrunPolicy`] decides between keeping the long cycle and
//! clipping it.
//!
//! ## Related Modules
//! - `parser` - Produces the specifications compiled here
//! - `morse` - Letter patterns for `Mo(x)` lights

mod types;
mod engine;
mod scheduler;


pub use types::{CompiledSequence, OverrunPolicy, TimedSegment};
pub use engine::{compile, compile_with};
pub use scheduler::{cancel, play, PlaybackHandle, PlaybackState, Scheduler, SegmentCallback};
