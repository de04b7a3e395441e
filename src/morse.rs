//! International Morse code lookup for `Mo(x)` lights.
//!
//! Maritime Morse lights only use letters (`Mo(A)` safe water, `Mo(U)` rigs,
//! `Mo(D)`/`Mo(N)` in some buoyage), but digits are in the table as well.

/// A single Morse element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
}

/// Morse pattern for a character, written with `.` and `-`.
///
/// # Examples
/// ```
/// use seamark::morse::pattern;
///
/// assert_eq!(pattern('A'), Some(".-"));
/// assert_eq!(pattern('u'), Some("..-"));
/// assert_eq!(pattern('#'), None);
/// ```
pub fn pattern(c: char) -> Option<&'static str> {
    let code = match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        _ => return None,
    };
    Some(code)
}

/// Morse elements for a character, empty when the character has no code.
pub fn symbols(c: char) -> Vec<Symbol> {
    pattern(c)
        .map(|code| {
            code.chars()
                .map(|s| if s == '-' { Symbol::Dash } else { Symbol::Dot })
                .collect()
        })
        .unwrap_or_default()
}
