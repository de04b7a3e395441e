//! # Public API
//!
//! One-call entry points for a presentation layer that starts from a notation
//! string, typed into a text field or taken from the catalog.
//!
//! - [`compile_notation()`] - Notation to timed segments
//! - [`describe_notation()`] - Notation to prose
//! - [`simulate()`] - Notation to live playback on a scheduler target
//!
//! Parsing is the only step that can fail, and it fails before anything is
//! scheduled: on error the target keeps whatever it was already playing.
//!
//! ```rust
//! use seamark::compile_notation;
//!
//! let sequence = compile_notation("Iso G 4s")?;
//! assert_eq!(sequence.total_ms(), 4000);
//! # Ok::<(), seamark::NotationError>(())
//! ```

use crate::describe::{describe, Language};
use crate::playback::{
    compile, compile_with, CompiledSequence, PlaybackHandle, Scheduler, TimedSegment,
};
use crate::{parse, NotationError, PlayerConfig};
use crate::parser::parse_with_default_period;

/// Parse and compile in one step.
pub fn compile_notation(notation: &str) -> Result<CompiledSequence, NotationError> {
    let spec = parse(notation)?;
    Ok(compile(&spec))
}

/// Parse and compile honoring the configured default period and overrun policy.
pub fn compile_notation_with(
    notation: &str,
    config: &PlayerConfig,
) -> Result<CompiledSequence, NotationError> {
    let spec = parse_with_default_period(notation, config.default_period_seconds)?;
    Ok(compile_with(&spec, config.overrun))
}

/// Parse and describe in one step.
pub fn describe_notation(notation: &str, language: Language) -> Result<String, NotationError> {
    let spec = parse(notation)?;
    Ok(describe(&spec, language))
}

/// Parse, compile and start playing `notation` on `target`.
///
/// Any playback already on `target` is cancelled, but only once the notation has
/// parsed.
///
/// # Example
/// ```rust
/// use seamark::{simulate, playback::Scheduler};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut scheduler = Scheduler::new();
/// simulate(&mut scheduler, "buoy", "Q(3) W 10s", |segment| {
///     println!("{}", if segment.on { "on" } else { "off" });
/// })
/// .unwrap();
///
/// assert!(simulate(&mut scheduler, "buoy", "Zx 5s", |_| {}).is_err());
/// assert!(scheduler.is_playing("buoy"));
/// # }
/// ```
pub fn simulate<'a>(
    scheduler: &'a mut Scheduler,
    target: &str,
    notation: &str,
    on_segment: impl FnMut(&TimedSegment) + Send + 'static,
) -> Result<&'a PlaybackHandle, NotationError> {
    let sequence = compile_notation(notation)?;
    Ok(scheduler.play(target, sequence, on_segment))
}
