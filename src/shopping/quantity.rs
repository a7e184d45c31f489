//! Quantity parsing
//!
//! Turns free-text recipe quantities ("1½", "about 2-3", "2 1/2") into numbers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUALIFIER_REGEX: Regex =
        Regex::new(r"(?i)[~≈]|\b(?:approximately|about|around|roughly)\b|\bapprox\.?")
            .expect("Qualifier pattern should be valid");
    static ref RANGE_REGEX: Regex = Regex::new(
        r"(\d+(?:\.\d+)?(?:/\d+)?)\s*[-–]\s*\d+(?:\.\d+)?(?:/\d+)?"
    )
    .expect("Range pattern should be valid");
}

/// ASCII form of a unicode vulgar fraction
fn vulgar_fraction(c: char) -> Option<&'static str> {
    let ascii = match c {
        '¼' => "1/4",
        '½' => "1/2",
        '¾' => "3/4",
        '⅐' => "1/7",
        '⅑' => "1/9",
        '⅒' => "1/10",
        '⅓' => "1/3",
        '⅔' => "2/3",
        '⅕' => "1/5",
        '⅖' => "2/5",
        '⅗' => "3/5",
        '⅘' => "4/5",
        '⅙' => "1/6",
        '⅚' => "5/6",
        '⅛' => "1/8",
        '⅜' => "3/8",
        '⅝' => "5/8",
        '⅞' => "7/8",
        _ => return None,
    };
    Some(ascii)
}

/// Replace vulgar fractions with `n/d`, splitting "1½" into "1 1/2"
fn expand_vulgar_fractions(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match vulgar_fraction(c) {
            Some(ascii) => {
                if out.ends_with(|p: char| p.is_ascii_digit()) {
                    out.push(' ');
                }
                out.push_str(ascii);
                out.push(' ');
            }
            None => out.push(c),
        }
    }
    out
}

/// Value of a single cleaned token; anything unparseable is zero
fn token_value(token: &str) -> f64 {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if let Some((num, den)) = token.split_once('/') {
        if is_digits(num) && is_digits(den) {
            if let (Ok(n), Ok(d)) = (num.parse::<f64>(), den.parse::<f64>()) {
                if d != 0.0 && n.is_finite() && d.is_finite() {
                    return n / d;
                }
            }
        }
        return 0.0;
    }

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a free-text quantity.
///
/// Never fails: empty, non-numeric or malformed input yields `0.0`. A range
/// like "2-3" resolves to its first bound. Whitespace-separated parts are
/// summed, so "2 1/2" is 2.5.
pub fn parse_quantity(raw: &str) -> f64 {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return 0.0;
    }

    let text = expand_vulgar_fractions(&text);
    let text = QUALIFIER_REGEX.replace_all(&text, " ");
    let text = RANGE_REGEX.replace_all(&text, "${1}");

    text.split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '/')
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .map(|token| token_value(&token))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(parse_quantity(""), 0.0);
        assert_eq!(parse_quantity("   "), 0.0);
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_quantity("2"), 2.0);
        assert_eq!(parse_quantity("1.25"), 1.25);
        assert_eq!(parse_quantity(".5"), 0.5);
    }

    #[test]
    fn test_fractions_and_mixed_numbers() {
        assert_eq!(parse_quantity("1/2"), 0.5);
        assert_eq!(parse_quantity("2 1/2"), 2.5);
        assert!(approx(parse_quantity("1 1/3"), 4.0 / 3.0));
    }

    #[test]
    fn test_vulgar_fractions() {
        assert_eq!(parse_quantity("1½"), 1.5);
        assert_eq!(parse_quantity("½"), 0.5);
        assert_eq!(parse_quantity("2 ¾"), 2.75);
        assert!(approx(parse_quantity("⅓"), 1.0 / 3.0));
        assert_eq!(parse_quantity("⅒"), 0.1);
        assert_eq!(parse_quantity("½cup"), 0.5);
    }

    #[test]
    fn test_qualifiers_are_ignored() {
        assert_eq!(parse_quantity("about 1/2"), 0.5);
        assert_eq!(parse_quantity("~2"), 2.0);
        assert_eq!(parse_quantity("≈ 3"), 3.0);
        assert_eq!(parse_quantity("Approx. 4"), 4.0);
        assert_eq!(parse_quantity("approximately 1.5"), 1.5);
        assert_eq!(parse_quantity("roughly 2"), 2.0);
        assert_eq!(parse_quantity("around 6"), 6.0);
    }

    #[test]
    fn test_ranges_take_first_bound() {
        assert_eq!(parse_quantity("1-2"), 1.0);
        assert_eq!(parse_quantity("2 – 3"), 2.0);
        assert_eq!(parse_quantity("1/2-1"), 0.5);
        assert_eq!(parse_quantity("about 3-4"), 3.0);
        assert_eq!(parse_quantity("2-3 1/2"), 2.5);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_quantity("to taste"), 0.0);
        assert_eq!(parse_quantity("a pinch"), 0.0);
        assert_eq!(parse_quantity("1/0"), 0.0);
        assert_eq!(parse_quantity("1.2.3"), 0.0);
        assert_eq!(parse_quantity("1/2/3"), 0.0);
        assert_eq!(parse_quantity("🍋🍋"), 0.0);
    }

    #[test]
    fn test_units_glued_to_numbers_are_stripped() {
        assert_eq!(parse_quantity("200g"), 200.0);
        assert_eq!(parse_quantity("3 large"), 3.0);
    }
}
