//! Plain-language description of a light characteristic, in English or French.
//!
//! ```rust
//! use seamark::{describe, parse, Language};
//!
//! let spec = parse("Fl(3) G 10s").unwrap();
//! assert_eq!(
//!     describe(&spec, Language::English),
//!     "Green flashing light, group of 3 flashes, period 10 s."
//! );
//! assert_eq!(
//!     describe(&spec, Language::French),
//!     "Feu vert à éclats, groupe de 3 éclats, période 10 s."
//! );
//! ```

use crate::ast::*;
use crate::morse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "fr" | "french" | "français" => Some(Language::French),
            _ => None,
        }
    }
}

pub fn describe(spec: &LightSpecification, language: Language) -> String {
    match language {
        Language::English => describe_english(spec),
        Language::French => describe_french(spec),
    }
}

fn rhythm_name_en(rhythm: RhythmKind) -> &'static str {
    match rhythm {
        RhythmKind::Fixed => "fixed",
        RhythmKind::Flashing => "flashing",
        RhythmKind::LongFlashing => "long-flashing",
        RhythmKind::Occulting => "occulting",
        RhythmKind::Isophase => "isophase",
        RhythmKind::Quick => "quick",
        RhythmKind::VeryQuick => "very quick",
        RhythmKind::UltraQuick => "ultra quick",
        RhythmKind::InterruptedQuick => "interrupted quick",
        RhythmKind::InterruptedVeryQuick => "interrupted very quick",
        RhythmKind::InterruptedUltraQuick => "interrupted ultra quick",
        RhythmKind::Morse => "Morse code",
        RhythmKind::Alternating => "alternating",
    }
}

fn rhythm_name_fr(rhythm: RhythmKind) -> &'static str {
    match rhythm {
        RhythmKind::Fixed => "fixe",
        RhythmKind::Flashing => "à éclats",
        RhythmKind::LongFlashing => "à éclats longs",
        RhythmKind::Occulting => "à occultations",
        RhythmKind::Isophase => "isophase",
        RhythmKind::Quick => "scintillant",
        RhythmKind::VeryQuick => "scintillant rapide",
        RhythmKind::UltraQuick => "scintillant ultra-rapide",
        RhythmKind::InterruptedQuick => "scintillant discontinu",
        RhythmKind::InterruptedVeryQuick => "scintillant rapide discontinu",
        RhythmKind::InterruptedUltraQuick => "scintillant ultra-rapide discontinu",
        RhythmKind::Morse => "Morse",
        RhythmKind::Alternating => "alterné",
    }
}

fn color_en(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Red => "red",
        Color::Green => "green",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
    }
}

fn color_fr(color: Color) -> &'static str {
    match color {
        Color::White => "blanc",
        Color::Red => "rouge",
        Color::Green => "vert",
        Color::Yellow => "jaune",
        Color::Blue => "bleu",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn seconds(period: f64, decimal_separator: char) -> String {
    if period.fract() == 0.0 {
        format!("{}", period as u64)
    } else {
        period.to_string().replace('.', &decimal_separator.to_string())
    }
}

fn joined(values: &[u32], separator: &str) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

fn describe_english(spec: &LightSpecification) -> String {
    let mut text = match (spec.rhythm, spec.alt_color) {
        (RhythmKind::Alternating, Some(alt)) => format!(
            "Alternating light, {} and {}",
            color_en(spec.color),
            color_en(alt)
        ),
        (rhythm, _) => capitalize(&format!(
            "{} {} light",
            color_en(spec.color),
            rhythm_name_en(rhythm)
        )),
    };

    let flash = if spec.rhythm == RhythmKind::LongFlashing { "long flash" } else { "flash" };
    match &spec.group {
        Group::Single => {}
        Group::Count(n) => {
            let noun = if *n == 1 { flash.to_string() } else { format!("{}es", flash) };
            text.push_str(&format!(", group of {} {}", n, noun));
        }
        Group::Composite(parts) => {
            text.push_str(&format!(", composite group of {} flashes", joined(parts, " + ")));
        }
        Group::Eclipses(eclipses) => {
            let unit = if eclipses.len() == 1 { "eclipse" } else { "eclipses" };
            text.push_str(&format!(", {} of {} s", unit, joined(eclipses, " + ")));
        }
        Group::Letter(c) => {
            text.push_str(&format!(", letter {} ({})", c, morse::pattern(*c).unwrap_or("?")));
        }
    }

    if spec.long_flash_tail {
        text.push_str(", followed by a long flash");
    }
    text.push_str(&format!(", period {} s.", seconds(spec.period_seconds, '.')));
    text
}

fn describe_french(spec: &LightSpecification) -> String {
    let mut text = match (spec.rhythm, spec.alt_color) {
        (RhythmKind::Alternating, Some(alt)) => format!(
            "Feu alterné {} et {}",
            color_fr(spec.color),
            color_fr(alt)
        ),
        (RhythmKind::Morse, _) => format!("Feu Morse {}", color_fr(spec.color)),
        (rhythm, _) => format!("Feu {} {}", color_fr(spec.color), rhythm_name_fr(rhythm)),
    };

    let flash = if spec.rhythm == RhythmKind::LongFlashing { "éclat long" } else { "éclat" };
    match &spec.group {
        Group::Single => {}
        Group::Count(n) => {
            let noun = if *n == 1 {
                flash.to_string()
            } else if spec.rhythm == RhythmKind::LongFlashing {
                "éclats longs".to_string()
            } else {
                "éclats".to_string()
            };
            text.push_str(&format!(", groupe de {} {}", n, noun));
        }
        Group::Composite(parts) => {
            text.push_str(&format!(", groupe composé de {} éclats", joined(parts, " + ")));
        }
        Group::Eclipses(eclipses) => {
            let unit = if eclipses.len() == 1 { "occultation" } else { "occultations" };
            text.push_str(&format!(", {} de {} s", unit, joined(eclipses, " + ")));
        }
        Group::Letter(c) => {
            text.push_str(&format!(", lettre {} ({})", c, morse::pattern(*c).unwrap_or("?")));
        }
    }

    if spec.long_flash_tail {
        text.push_str(", suivi d'un éclat long");
    }
    text.push_str(&format!(", période {} s.", seconds(spec.period_seconds, ',')));
    text
}
