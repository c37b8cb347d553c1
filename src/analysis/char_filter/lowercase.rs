//! Lowercase char filter.
//!
//! # Examples
//!
//! ```
//! use newsrank::analysis::char_filter::CharFilter;
//! use newsrank::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Elections in İstanbul"), "elections in istanbul");
//! ```

use super::CharFilter;

/// Lowercases the whole text with the Unicode case mapping.
///
/// A few capitals lowercase to a letter plus a combining mark (`İ` becomes
/// `i` + U+0307). Only the letters of such expansions are kept, so the
/// result still matches the plain lowercase spelling typed in a query.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

fn push_lowercase(out: &mut String, c: char) {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => out.push(single),
        (first, second) => out.extend(
            first
                .into_iter()
                .chain(second)
                .chain(lower)
                .filter(|l| l.is_alphanumeric()),
        ),
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            return input.to_ascii_lowercase();
        }
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            push_lowercase(&mut out, c);
        }
        out
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_ascii() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Cats, CATS!! Running"), "cats, cats!! running");
    }

    #[test]
    fn test_lowercase_other_scripts() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÜBER Ελλάδα ǅemal"), "über ελλάδα ǆemal");
    }

    #[test]
    fn test_dotted_capital_i_lowercases_to_plain_i() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("İSTANBUL"), "istanbul");
        assert_eq!(filter.filter("İstanbul"), filter.filter("istanbul"));
    }

    #[test]
    fn test_existing_combining_marks_survive() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("CAFE\u{301}"), "cafe\u{301}");
    }
}
