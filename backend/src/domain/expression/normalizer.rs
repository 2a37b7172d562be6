//! Textual rewriting of constants, scientific functions, and the power
//! operator into the canonical form understood by the parser.

use std::f64::consts::{E, PI};
use std::sync::OnceLock;

use regex::Regex;

use super::CalculationMode;

/// Scientific rewrites in application order. Each pattern captures the
/// argument up to the first closing parenthesis.
const SCIENTIFIC_REWRITES: [(&str, &str); 6] = [
    (r"sin\(([^)]+)\)", "math.sin(math.radians(${1}))"),
    (r"cos\(([^)]+)\)", "math.cos(math.radians(${1}))"),
    (r"tan\(([^)]+)\)", "math.tan(math.radians(${1}))"),
    (r"log\(([^)]+)\)", "math.log10(${1})"),
    (r"ln\(([^)]+)\)", "math.log(${1})"),
    (r"sqrt\(([^)]+)\)", "math.sqrt(${1})"),
];

static SCIENTIFIC_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn scientific_patterns() -> &'static [(Regex, &'static str)] {
    SCIENTIFIC_PATTERNS.get_or_init(|| {
        SCIENTIFIC_REWRITES
            .iter()
            .map(|(pattern, replacement)| {
                let regex = Regex::new(pattern).unwrap_or_else(|error| {
                    panic!("scientific rewrite pattern {pattern} failed to compile: {error}")
                });
                (regex, *replacement)
            })
            .collect()
    })
}

/// Rewrite raw input into canonical evaluable text.
///
/// Substitution is substring based: `pi` and `e` are replaced wherever they
/// occur, including inside longer words.
///
/// # Examples
/// ```
/// use calculator_backend::domain::expression::{normalize, CalculationMode};
///
/// assert_eq!(normalize(" 2^3 ", CalculationMode::Basic), "2**3");
/// assert_eq!(
///     normalize("sqrt(16)", CalculationMode::Scientific),
///     "math.sqrt(16)"
/// );
/// ```
pub fn normalize(raw: &str, mode: CalculationMode) -> String {
    let mut text = raw
        .trim()
        .replace("pi", &PI.to_string())
        .replace('e', &E.to_string());

    if mode == CalculationMode::Scientific {
        for (pattern, replacement) in scientific_patterns() {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }
    }

    text.replace('^', "**")
}
