//! # Light Specification Types
//!
//! This module defines the structured form of a light characteristic, as produced by
//! the parser and consumed by the sequence compiler and the description formatter.
//!
//! ## Type Hierarchy
//! ```text
//! LightSpecification
//!   ├── rhythm: RhythmKind (Fixed, Flashing, Occulting, Quick, Morse, ...)
//!   ├── group: Group
//!   │     ├── Single              no group given
//!   │     ├── Count(n)            Fl(3), Q(6)
//!   │     ├── Composite([a, b])   Fl(2+1)
//!   │     ├── Eclipses([s, ...])  Oc(2), eclipse lengths in seconds
//!   │     └── Letter(c)           Mo(A)
//!   ├── color / alt_color: Color (W, R, G, Y, Bu)
//!   ├── period_seconds
//!   └── long_flash_tail           the "+LFl" of Q(6)+LFl
//! ```
//!
//! ## Key Concepts
//!
//! ### Group
//! The same parenthesized text means different things per rhythm. `Fl(3)` is a flash
//! count, `Oc(3)` is an eclipse length and `Mo(U)` is a Morse letter. The parser
//! resolves this once, so the compiler never reinterprets raw numbers.
//!
//! ### Period
//! The time for one complete cycle. Defaults to 10 seconds when the notation has no
//! `<n>s` suffix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Period used when the notation carries no `<n>s` suffix.
pub const DEFAULT_PERIOD_SECONDS: f64 = 10.0;

/// Longest accepted period, one hour.
pub const MAX_PERIOD_SECONDS: f64 = 3600.0;
const MAX_PERIOD_MS: u64 = 3_600_000;

/// Largest accepted group element: a flash count, or an eclipse in seconds.
pub const MAX_GROUP_ELEMENT: u32 = 99;

/// The temporal pattern class of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RhythmKind {
    Fixed,
    Flashing,
    LongFlashing,
    Occulting,
    Isophase,
    Quick,
    VeryQuick,
    UltraQuick,
    InterruptedQuick,
    InterruptedVeryQuick,
    InterruptedUltraQuick,
    Morse,
    Alternating,
}

impl RhythmKind {
    /// Chart abbreviation, as printed on Admiralty charts (`Fl`, `LFl`, `VQ`, ...).
    pub fn abbreviation(&self) -> &'static str {
        match self {
            RhythmKind::Fixed => "F",
            RhythmKind::Flashing => "Fl",
            RhythmKind::LongFlashing => "LFl",
            RhythmKind::Occulting => "Oc",
            RhythmKind::Isophase => "Iso",
            RhythmKind::Quick => "Q",
            RhythmKind::VeryQuick => "VQ",
            RhythmKind::UltraQuick => "UQ",
            RhythmKind::InterruptedQuick => "IQ",
            RhythmKind::InterruptedVeryQuick => "IVQ",
            RhythmKind::InterruptedUltraQuick => "IUQ",
            RhythmKind::Morse => "Mo",
            RhythmKind::Alternating => "Al",
        }
    }

    /// Full flash cycle (on + off) in milliseconds for the quick family.
    ///
    /// Quick = 60 flashes/min, very quick = 120, ultra quick = 240.
    pub fn quick_rate_ms(&self) -> Option<u64> {
        match self {
            RhythmKind::Quick | RhythmKind::InterruptedQuick => Some(1000),
            RhythmKind::VeryQuick | RhythmKind::InterruptedVeryQuick => Some(500),
            RhythmKind::UltraQuick | RhythmKind::InterruptedUltraQuick => Some(250),
            _ => None,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            RhythmKind::InterruptedQuick
                | RhythmKind::InterruptedVeryQuick
                | RhythmKind::InterruptedUltraQuick
        )
    }
}

impl fmt::Display for RhythmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Light color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    /// Parse an uppercase chart color code (`W`, `R`, `G`, `Y`, `BU`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Color::White),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            "Y" => Some(Color::Yellow),
            "BU" => Some(Color::Blue),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Red => "R",
            Color::Green => "G",
            Color::Yellow => "Y",
            Color::Blue => "Bu",
        }
    }
}

/// Rhythm-specific grouping, resolved by the parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Group {
    /// No group in the notation.
    #[default]
    Single,
    /// Flash repeat count, e.g. `Fl(3)`.
    Count(u32),
    /// Sub-group sizes, e.g. `Fl(2+1)` → `[2, 1]`.
    Composite(Vec<u32>),
    /// Occulting eclipse lengths in seconds.
    Eclipses(Vec<u32>),
    /// Morse letter, e.g. `Mo(A)`.
    Letter(char),
}

impl Group {
    /// Numeric elements in notation order (empty for `Single` and `Letter`).
    pub fn values(&self) -> Vec<u32> {
        match self {
            Group::Single | Group::Letter(_) => Vec::new(),
            Group::Count(n) => vec![*n],
            Group::Composite(parts) | Group::Eclipses(parts) => parts.clone(),
        }
    }

    pub fn letter(&self) -> Option<char> {
        match self {
            Group::Letter(c) => Some(*c),
            _ => None,
        }
    }

    /// The flash count of a `Count` group.
    pub fn count(&self) -> Option<u32> {
        match self {
            Group::Count(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Single => Ok(()),
            Group::Letter(c) => write!(f, "({})", c),
            _ => {
                let parts: Vec<String> = self.values().iter().map(|v| v.to_string()).collect();
                write!(f, "({})", parts.join("+"))
            }
        }
    }
}

/// Parsed light characteristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSpecification {
    pub rhythm: RhythmKind,
    #[serde(default)]
    pub group: Group,
    #[serde(default)]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_color: Option<Color>,
    #[serde(default = "default_period")]
    pub period_seconds: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub long_flash_tail: bool,
}

fn default_period() -> f64 {
    DEFAULT_PERIOD_SECONDS
}

impl LightSpecification {
    /// A white, ungrouped light of the given rhythm with the default period.
    pub fn new(rhythm: RhythmKind) -> Self {
        Self {
            rhythm,
            group: Group::Single,
            color: Color::White,
            alt_color: None,
            period_seconds: DEFAULT_PERIOD_SECONDS,
            long_flash_tail: false,
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.group = group;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_alt_color(mut self, alt_color: Color) -> Self {
        self.alt_color = Some(alt_color);
        self
    }

    pub fn with_period(mut self, period_seconds: f64) -> Self {
        self.period_seconds = period_seconds;
        self
    }

    /// Period in whole milliseconds, clamped to `1..=MAX_PERIOD_SECONDS` worth.
    pub fn period_ms(&self) -> u64 {
        // `as` saturates: negative and NaN become 0, infinity becomes u64::MAX.
        ((self.period_seconds * 1000.0).round() as u64).clamp(1, MAX_PERIOD_MS)
    }
}

/// Canonical chart notation, e.g. `Fl(2+1) R 10s` or `Al WR 10s`.
impl fmt::Display for LightSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rhythm, self.group)?;
        if self.long_flash_tail {
            f.write_str("+LFl")?;
        }
        write!(f, " {}", self.color.code())?;
        if let Some(alt) = self.alt_color {
            f.write_str(alt.code())?;
        }
        if self.period_seconds.fract() == 0.0 {
            write!(f, " {}s", self.period_seconds as u64)
        } else {
            write!(f, " {}s", self.period_seconds)
        }
    }
}
