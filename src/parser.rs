//! # Parser Module
//!
//! This module turns a light characteristic string into a [`LightSpecification`].
//!
//! ## Purpose
//! Chart notation is short and loosely written: `Fl(2+1) R 10s`, `Al.WR.`, `Q G`,
//! `Mo(A) W`, `VQ(6)+LFl 10s`. The parser peels the string from both ends rather than
//! lexing it left to right, because the period and the colors are always trailing
//! and the rhythm keyword is always leading.
//!
//! ## Algorithm
//! 1. Normalize: uppercase, drop abbreviation periods (`Fl.` → `FL`) but keep decimal
//!    points between digits (`2.5s`), trim.
//! 2. Take a trailing `<number>S` as the period (default 10 seconds).
//! 3. Take trailing color codes `W R G Y BU`, optionally separated by `-` or spaces.
//! 4. Drop a leading group abbreviation `GP` / `GR`.
//! 5. Match the longest rhythm keyword from [`RHYTHM_KEYWORDS`].
//! 6. Read the group: parenthesized content, or a bare number, then an optional
//!    `+LFl` tail (south cardinal).
//!
//! ## Example
//! ```rust
//! use seamark::{parse, Color, Group, RhythmKind};
//!
//! let spec = parse("Fl(2+1) R 10s").unwrap();
//! assert_eq!(spec.rhythm, RhythmKind::Flashing);
//! assert_eq!(spec.group, Group::Composite(vec![2, 1]));
//! assert_eq!(spec.color, Color::Red);
//! assert_eq!(spec.period_seconds, 10.0);
//! ```

use crate::ast::*;
use crate::error::NotationError;

/// Rhythm keywords in match order.
///
/// Longer keywords come first so that `VQ`, `IQ` and `IVQ` are never read as `Q`,
/// and `LFL` / `FL` are never read as `F`.
pub const RHYTHM_KEYWORDS: &[(&str, RhythmKind)] = &[
    ("IVQ", RhythmKind::InterruptedVeryQuick),
    ("IUQ", RhythmKind::InterruptedUltraQuick),
    ("LFL", RhythmKind::LongFlashing),
    ("ISO", RhythmKind::Isophase),
    ("OCC", RhythmKind::Occulting),
    ("ALT", RhythmKind::Alternating),
    ("FL", RhythmKind::Flashing),
    ("OC", RhythmKind::Occulting),
    ("IQ", RhythmKind::InterruptedQuick),
    ("VQ", RhythmKind::VeryQuick),
    ("UQ", RhythmKind::UltraQuick),
    ("MO", RhythmKind::Morse),
    ("AL", RhythmKind::Alternating),
    ("F", RhythmKind::Fixed),
    ("Q", RhythmKind::Quick),
];

/// Parse a light characteristic using the default 10 second period.
pub fn parse(input: &str) -> Result<LightSpecification, NotationError> {
    parse_with_default_period(input, DEFAULT_PERIOD_SECONDS)
}

/// Parse a light characteristic, using `default_period` when the notation has no
/// `<n>s` suffix.
pub fn parse_with_default_period(
    input: &str,
    default_period: f64,
) -> Result<LightSpecification, NotationError> {
    check_period(default_period)?;
    let normalized = normalize(input);

    let (rest, period_seconds) = take_period(&normalized, default_period)?;
    let (rest, colors) = take_colors(rest);
    let rest = strip_group_prefix(rest);
    let (rhythm, rest) = match_rhythm(rest).ok_or(NotationError::UnrecognizedRhythm)?;
    let (group, long_flash_tail) = parse_group(rhythm, rest)?;

    Ok(LightSpecification {
        rhythm,
        group,
        color: colors.first().copied().unwrap_or_default(),
        alt_color: colors.get(1).copied(),
        period_seconds,
        long_flash_tail,
    })
}

/// Uppercase, drop abbreviation dots, trim.
fn normalize(input: &str) -> String {
    let chars: Vec<char> = input.trim().to_uppercase().chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '.' {
            let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
            let digit_after = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if !(digit_before && digit_after) {
                continue;
            }
        }
        out.push(c);
    }
    out.trim().to_string()
}

/// Split a trailing `<number>S` off the text.
fn take_period(text: &str, default_period: f64) -> Result<(&str, f64), NotationError> {
    let Some(body) = text.strip_suffix('S') else {
        return Ok((text, default_period));
    };
    let body = body.trim_end();
    let head = body.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    let number = &body[head.len()..];
    if number.is_empty() {
        return Ok((text, default_period));
    }

    let period: f64 = number
        .parse()
        .map_err(|_| NotationError::InvalidPeriod(format!("'{}' is not a number", number)))?;
    check_period(period)?;
    Ok((head.trim_end(), period))
}

/// Periods must lie in `(0, MAX_PERIOD_SECONDS]`.
pub(crate) fn check_period(period: f64) -> Result<(), NotationError> {
    if !period.is_finite() || period <= 0.0 {
        return Err(NotationError::InvalidPeriod(format!(
            "period must be greater than zero, got {}",
            period
        )));
    }
    if period > MAX_PERIOD_SECONDS {
        return Err(NotationError::InvalidPeriod(format!(
            "period must be at most {} s, got {}",
            MAX_PERIOD_SECONDS, period
        )));
    }
    Ok(())
}

/// Split trailing color codes off the text. Colors are returned in reading order.
fn take_colors(text: &str) -> (&str, Vec<Color>) {
    let mut rest = text.trim_end();
    let mut colors = Vec::new();

    loop {
        let candidate = rest.trim_end_matches(|c: char| c == '-' || c.is_whitespace());
        if let Some(head) = candidate.strip_suffix("BU") {
            colors.push(Color::Blue);
            rest = head;
            continue;
        }
        let Some(last) = candidate.chars().last() else {
            break;
        };
        match Color::from_code(&last.to_string()) {
            Some(color) => {
                colors.push(color);
                rest = &candidate[..candidate.len() - last.len_utf8()];
            }
            None => break,
        }
    }

    colors.reverse();
    (rest.trim_end(), colors)
}

fn strip_group_prefix(text: &str) -> &str {
    let text = text.trim_start();
    text.strip_prefix("GP")
        .or_else(|| text.strip_prefix("GR"))
        .unwrap_or(text)
        .trim_start()
}

/// Longest-prefix match against [`RHYTHM_KEYWORDS`].
pub fn match_rhythm(text: &str) -> Option<(RhythmKind, &str)> {
    RHYTHM_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.starts_with(keyword))
        .map(|(keyword, rhythm)| (*rhythm, text[keyword.len()..].trim()))
}

fn parse_group(rhythm: RhythmKind, text: &str) -> Result<(Group, bool), NotationError> {
    let (content, after) = if let Some(inner) = text.strip_prefix('(') {
        let close = inner
            .find(')')
            .ok_or_else(|| NotationError::InvalidGroup("missing closing parenthesis".to_string()))?;
        (Some(inner[..close].trim()), inner[close + 1..].trim())
    } else if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        (Some(text), "")
    } else {
        (None, text)
    };

    let long_flash_tail = match after.replace(char::is_whitespace, "").as_str() {
        "" => false,
        "+LFL" => true,
        other => {
            return Err(NotationError::InvalidGroup(format!("unexpected '{}'", other)));
        }
    };

    if rhythm == RhythmKind::Morse {
        let letter = content.ok_or_else(|| {
            NotationError::InvalidGroup("Morse light needs a letter, e.g. Mo(A)".to_string())
        })?;
        let mut chars = letter.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok((Group::Letter(c), long_flash_tail)),
            _ => Err(NotationError::InvalidGroup(format!(
                "'{}' is not a single Morse letter",
                letter
            ))),
        };
    }

    let Some(content) = content else {
        return Ok((Group::Single, long_flash_tail));
    };

    let parts = content
        .split('+')
        .map(|part| {
            let part = part.trim();
            let value = part
                .parse::<u32>()
                .map_err(|_| NotationError::InvalidGroup(format!("'{}' is not a number", part)))?;
            if value > MAX_GROUP_ELEMENT {
                return Err(NotationError::InvalidGroup(format!(
                    "{} is more than {} per group",
                    value, MAX_GROUP_ELEMENT
                )));
            }
            Ok(value)
        })
        .collect::<Result<Vec<u32>, _>>()?;

    let group = match (rhythm, parts.len()) {
        (RhythmKind::Occulting, _) => Group::Eclipses(parts),
        (_, 1) => Group::Count(parts[0]),
        _ => Group::Composite(parts),
    };
    Ok((group, long_flash_tail))
}
