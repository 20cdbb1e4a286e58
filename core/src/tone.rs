//! Tone marker codes.
//!
//! A tone code is `T` followed by a run of digits `1`-`5` (Chao tone
//! letters). Several tone codes may be chained, `T35T1`, so the digit run is
//! allowed to end either at the end of the code or at another `T`. Segments
//! that convert a tone code get ranking priority in the engine.

use once_cell::sync::Lazy;
use regex::Regex;

static TONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^T([1-5]+)(?:T|$)").expect("tone pattern compiles"));

/// Number of tone digits if `code` is a tone code, `None` otherwise.
///
/// # Example
/// ```
/// use scripa_core::tone::tone_digits;
///
/// assert_eq!(tone_digits("T35"), Some(2));
/// assert_eq!(tone_digits("T1T2"), Some(1));
/// assert_eq!(tone_digits("T6"), None);
/// ```
pub fn tone_digits(code: &str) -> Option<usize> {
    TONE_PATTERN
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().len())
}

/// Whether `code` matches the tone grammar.
pub fn is_tone_code(code: &str) -> bool {
    tone_digits(code).is_some()
}
