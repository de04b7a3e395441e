//! Sequence compilation engine
//!
//! Converts a [`LightSpecification`] into the cyclic list of on/off segments that
//! reproduces the characteristic, with exact integer millisecond timing.

use crate::ast::*;
use crate::morse::{self, Symbol};
use super::types::{CompiledSequence, OverrunPolicy, TimedSegment};
use tracing::{trace, warn};

/// Flash and eclipse for `Fl`.
const FLASH_MS: u64 = 500;
const FLASH_GAP_MS: u64 = 1000;

/// Flash and eclipse for `LFl` (a long flash is at least two seconds).
const LONG_FLASH_MS: u64 = 2000;
const LONG_FLASH_GAP_MS: u64 = 2000;

/// Flashes inside a composite group such as `Fl(2+1)`.
const GROUP_FLASH_MS: u64 = 500;
const GROUP_GAP_MS: u64 = 500;
/// Dark pause between the sub-groups of a composite group.
const GROUP_PAUSE_MS: u64 = 1500;

const MORSE_DOT_MS: u64 = 300;
const MORSE_DASH_MS: u64 = 900;
const MORSE_GAP_MS: u64 = 300;

/// Accumulates segments, dropping zero-length ones.
struct SegmentBuilder {
    color: Color,
    segments: Vec<TimedSegment>,
}

impl SegmentBuilder {
    fn new(color: Color) -> Self {
        Self {
            color,
            segments: Vec::new(),
        }
    }

    fn on(&mut self, duration_ms: u64) {
        self.on_in(duration_ms, self.color);
    }

    fn on_in(&mut self, duration_ms: u64, color: Color) {
        if duration_ms > 0 {
            self.segments.push(TimedSegment::on(duration_ms, color));
        }
    }

    fn off(&mut self, duration_ms: u64) {
        if duration_ms > 0 {
            self.segments.push(TimedSegment::off(duration_ms, self.color));
        }
    }

    fn total_ms(&self) -> u64 {
        self.segments.iter().map(|s| s.duration_ms).sum()
    }
}

/// Compile a specification, keeping cycles that overrun the period.
///
/// The result is deterministic: compiling the same specification twice yields the
/// same sequence.
///
/// # Example
/// ```rust
/// use seamark::{parse, playback::compile};
///
/// let spec = parse("Mo(A) W").unwrap();
/// let sequence = compile(&spec);
///
/// let timings: Vec<(u64, bool)> = sequence.iter().map(|s| (s.duration_ms, s.on)).collect();
/// assert_eq!(timings, vec![(300, true), (300, false), (900, true), (8500, false)]);
/// assert_eq!(sequence.total_ms(), 10_000);
/// ```
pub fn compile(spec: &LightSpecification) -> CompiledSequence {
    compile_with(spec, OverrunPolicy::Extend)
}

/// Compile a specification with an explicit overrun policy.
///
/// Rhythm segments are generated first. If they fall short of the period, one
/// trailing dark segment pads the cycle to exactly one period. If they already
/// exceed it, `policy` decides whether the cycle is kept long or clipped.
pub fn compile_with(spec: &LightSpecification, policy: OverrunPolicy) -> CompiledSequence {
    let period_ms = spec.period_ms();
    let mut builder = SegmentBuilder::new(spec.color);

    match (&spec.group, spec.rhythm) {
        (Group::Composite(parts), _) => composite(&mut builder, parts),
        (_, RhythmKind::Fixed) => builder.on(period_ms),
        (_, RhythmKind::Flashing) => {
            flashes(&mut builder, flash_count(&spec.group), FLASH_MS, FLASH_GAP_MS)
        }
        (_, RhythmKind::LongFlashing) => flashes(
            &mut builder,
            flash_count(&spec.group),
            LONG_FLASH_MS,
            LONG_FLASH_GAP_MS,
        ),
        (_, RhythmKind::Isophase) => {
            let half = period_ms / 2;
            builder.on(half);
            builder.off(period_ms - half);
        }
        (_, RhythmKind::Occulting) => occulting(&mut builder, &spec.group, period_ms),
        (_, RhythmKind::Morse) => morse_letter(&mut builder, spec.group.letter()),
        (_, RhythmKind::Alternating) => match spec.alt_color {
            Some(alt_color) => {
                let half = period_ms / 2;
                builder.on(half);
                builder.on_in(period_ms - half, alt_color);
            }
            None => builder.on(period_ms),
        },
        (_, rhythm) => quick_flashes(&mut builder, rhythm, &spec.group, period_ms),
    }

    if spec.long_flash_tail {
        builder.on(LONG_FLASH_MS);
    }

    let total = builder.total_ms();
    let mut segments = builder.segments;
    if total < period_ms {
        segments.push(TimedSegment::off(period_ms - total, spec.color));
    } else if total > period_ms {
        match policy {
            OverrunPolicy::Extend => warn!(
                "{} runs {} ms per cycle, longer than its {} ms period",
                spec, total, period_ms
            ),
            OverrunPolicy::Truncate => truncate(&mut segments, period_ms),
        }
    }

    trace!("Compiled {} into {} segments", spec, segments.len());
    CompiledSequence {
        period_ms,
        segments,
    }
}

/// Flash count for `Fl` / `LFl`; a missing or zero count means a single flash.
fn flash_count(group: &Group) -> u32 {
    explicit_count(group).unwrap_or(1)
}

/// A non-zero `Count`, capped at [`MAX_GROUP_ELEMENT`].
fn explicit_count(group: &Group) -> Option<u32> {
    group
        .count()
        .filter(|&n| n > 0)
        .map(|n| n.min(MAX_GROUP_ELEMENT))
}

/// `count` flashes separated by `gap_ms`; the dark time after the last flash is
/// left to the trailing fill.
fn flashes(builder: &mut SegmentBuilder, count: u32, flash_ms: u64, gap_ms: u64) {
    for i in 0..count {
        if i > 0 {
            builder.off(gap_ms);
        }
        builder.on(flash_ms);
    }
}

fn composite(builder: &mut SegmentBuilder, parts: &[u32]) {
    for (i, &flashes_in_part) in parts.iter().enumerate() {
        if i > 0 {
            builder.off(GROUP_PAUSE_MS);
        }
        for _ in 0..flashes_in_part.min(MAX_GROUP_ELEMENT) {
            builder.on(GROUP_FLASH_MS);
            builder.off(GROUP_GAP_MS);
        }
    }
}

/// With eclipses, the bright time left over is shared evenly between the
/// eclipses (any rounding remainder goes to the last one). Without, the light is
/// lit for three quarters of the period.
fn occulting(builder: &mut SegmentBuilder, group: &Group, period_ms: u64) {
    let eclipses = match group {
        Group::Eclipses(eclipses) if !eclipses.is_empty() => eclipses,
        _ => {
            let lit = period_ms - period_ms / 4;
            builder.on(lit);
            builder.off(period_ms - lit);
            return;
        }
    };

    let dark_ms: u64 = eclipses.iter().map(|&e| u64::from(e) * 1000).sum();
    let bright_ms = period_ms.saturating_sub(dark_ms);
    let count = eclipses.len() as u64;
    let share = bright_ms / count;
    let remainder = bright_ms % count;

    for (i, &eclipse) in eclipses.iter().enumerate() {
        let last = i + 1 == eclipses.len();
        builder.on(if last { share + remainder } else { share });
        builder.off(u64::from(eclipse) * 1000);
    }
}

fn morse_letter(builder: &mut SegmentBuilder, letter: Option<char>) {
    let Some(letter) = letter else {
        return;
    };
    for (i, symbol) in morse::symbols(letter).into_iter().enumerate() {
        if i > 0 {
            builder.off(MORSE_GAP_MS);
        }
        builder.on(match symbol {
            Symbol::Dot => MORSE_DOT_MS,
            Symbol::Dash => MORSE_DASH_MS,
        });
    }
}

/// Quick family. Each flash is half the rate lit, half dark. Without an explicit
/// count, plain variants fill the period and interrupted variants fill three
/// quarters of it, leaving the long eclipse to the trailing fill.
fn quick_flashes(builder: &mut SegmentBuilder, rhythm: RhythmKind, group: &Group, period_ms: u64) {
    let Some(rate_ms) = rhythm.quick_rate_ms() else {
        return;
    };
    let count = match explicit_count(group) {
        Some(n) => u64::from(n),
        None if rhythm.is_interrupted() => ((period_ms - period_ms / 4) / rate_ms).max(1),
        None => (period_ms / rate_ms).max(1),
    };

    let lit = rate_ms / 2;
    for _ in 0..count {
        builder.on(lit);
        builder.off(rate_ms - lit);
    }
}

/// Clip a cycle to exactly `period_ms`.
fn truncate(segments: &mut Vec<TimedSegment>, period_ms: u64) {
    let mut elapsed = 0;
    let mut keep = 0;
    for segment in segments.iter_mut() {
        if elapsed >= period_ms {
            break;
        }
        segment.duration_ms = segment.duration_ms.min(period_ms - elapsed);
        elapsed += segment.duration_ms;
        keep += 1;
    }
    segments.truncate(keep);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings(sequence: &CompiledSequence) -> Vec<(u64, bool)> {
        sequence.iter().map(|s| (s.duration_ms, s.on)).collect()
    }

    #[test]
    fn test_truncate_clips_crossing_segment() {
        let mut segments = vec![
            TimedSegment::on(600, Color::White),
            TimedSegment::off(600, Color::White),
            TimedSegment::on(600, Color::White),
        ];
        truncate(&mut segments, 1000);
        assert_eq!(
            segments,
            vec![TimedSegment::on(600, Color::White), TimedSegment::off(400, Color::White)]
        );
    }

    #[test]
    fn test_builder_skips_empty_segments() {
        let mut builder = SegmentBuilder::new(Color::Red);
        builder.on(0);
        builder.off(0);
        builder.on(10);
        assert_eq!(builder.segments.len(), 1);
        assert_eq!(builder.total_ms(), 10);
    }

    #[test]
    fn test_flash_count_defaults() {
        assert_eq!(flash_count(&Group::Single), 1);
        assert_eq!(flash_count(&Group::Count(0)), 1);
        assert_eq!(flash_count(&Group::Count(4)), 4);
        assert_eq!(flash_count(&Group::Count(u32::MAX)), MAX_GROUP_ELEMENT);
    }

    #[test]
    fn test_unbounded_specs_compile_within_limits() {
        // Built by hand, so neither the parser nor validation has seen them
        let occulting = LightSpecification::new(RhythmKind::Occulting).with_period(1e16);
        let sequence = compile(&occulting);
        assert_eq!(timings(&sequence), vec![(2_700_000, true), (900_000, false)]);

        let interrupted = LightSpecification::new(RhythmKind::InterruptedUltraQuick)
            .with_period(f64::INFINITY);
        assert_eq!(compile(&interrupted).total_ms(), 3_600_000);

        let flashing = LightSpecification::new(RhythmKind::Flashing)
            .with_group(Group::Count(u32::MAX))
            .with_period(1000.0);
        let lit = compile(&flashing).iter().filter(|s| s.on).count();
        assert_eq!(lit, MAX_GROUP_ELEMENT as usize);
    }

    #[test]
    fn test_uneven_occulting_split() {
        let spec = LightSpecification::new(RhythmKind::Occulting)
            .with_group(Group::Eclipses(vec![1, 1, 1]))
            .with_period(10.0);
        let sequence = compile(&spec);
        assert_eq!(
            timings(&sequence),
            vec![
                (2333, true),
                (1000, false),
                (2333, true),
                (1000, false),
                (2334, true),
                (1000, false),
            ]
        );
        assert_eq!(sequence.total_ms(), 10_000);
    }
}
