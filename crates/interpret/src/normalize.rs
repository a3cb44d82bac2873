use std::str::FromStr;
use std::sync::OnceLock;

use overmoney_core::DecimalMark;
use regex::Regex;
use rust_decimal::Decimal;

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// ASCII digits only: `\d` would also accept other scripts' digits.
// A bare leading or trailing point is allowed ("5." and ".5").
re!(re_plain_decimal, r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$");

/// Parses a lone amount token under the given decimal mark.
/// Signs, exponents, currency symbols and grouping separators are rejected.
pub fn parse_amount(token: &str, mark: DecimalMark) -> Option<Decimal> {
    let candidate = match mark {
        DecimalMark::Dot => token.to_string(),
        DecimalMark::Comma => token.replace(',', "."),
    };
    if !re_plain_decimal().is_match(&candidate) {
        return None;
    }

    let (whole, fraction) = candidate.split_once('.').unwrap_or((candidate.as_str(), ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    let written = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };

    // Out-of-range integers fail to parse; over-long fractions parse but get
    // rounded, which shows up as a smaller scale than was written.
    let value = Decimal::from_str(&written).ok()?;
    (value.scale() as usize == fraction.len()).then_some(value)
}

/// Lowercases and collapses whitespace runs to a single space.
pub fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lowercased whitespace-delimited words. Each word is yielded as written
/// and, when it differs, once more with surrounding punctuation stripped, so
/// "coffee," matches "coffee" and "c++" still matches "c++".
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().flat_map(|word| {
        let word = word.to_lowercase();
        let stripped = word.trim_matches(|c: char| !c.is_alphanumeric());
        let stripped = (!stripped.is_empty() && stripped != word).then(|| stripped.to_string());
        std::iter::once(word).chain(stripped)
    })
}
