//! Extraction of typed values from the free-text listing columns.
//!
//! Each parser does a single best-effort pattern match. Only experience and
//! review count are mandatory; the other fields report `None` when the text
//! does not match.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, ParseFailure};

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("integer regex"));

/// First integer, then a later integer separated by at least one non-digit.
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\D+(\d+)").expect("range regex"));

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").expect("decimal regex"));

static UPPER_BOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"to[ ]*(\d+\.?\d*)").expect("upper bound regex"));

/// Parsed salary column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryInfo {
    pub disclosed: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

fn first_integer(text: &str) -> Result<i64, ParseFailure> {
    let digits = INTEGER_RE.find(text).ok_or(ParseFailure::NoInteger)?;
    digits
        .as_str()
        .parse()
        .map_err(|_| ParseFailure::OutOfRange)
}

/// All integers in `text`, in order of appearance.
pub fn integers(text: &str) -> Vec<i64> {
    INTEGER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// `"3-5 Years"` → `(3, 5)`, `"4 Years"` → `(4, 4)`.
pub fn parse_experience(text: &str) -> Result<(i64, i64), ParseError> {
    let min = first_integer(text).map_err(|reason| ParseError::new("Experience", text, reason))?;
    let max = RANGE_RE
        .captures(text)
        .and_then(|c| c[2].parse::<i64>().ok())
        .unwrap_or(min);
    Ok((min, max.max(min)))
}

/// `"1,234 Reviews"` → `1`; separators are deliberately not stripped.
pub fn parse_reviews(text: &str) -> Result<i64, ParseError> {
    first_integer(text).map_err(|reason| ParseError::new("Reviews", text, reason))
}

/// Relative posting age in days, e.g. `"5 Days Ago"` → `5.0`.
pub fn parse_post_age(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    let leading = || {
        text.split_whitespace()
            .next()
            .and_then(|tok| tok.parse::<i64>().ok())
    };

    if lower.contains("day") {
        leading().map(|days| days as f64)
    } else if lower.contains("month") {
        leading()
            .and_then(|months| months.checked_mul(30))
            .map(|days| days as f64)
    } else if lower.contains("hour") || lower.contains("few") {
        Some(0.0)
    } else {
        None
    }
}

/// `"6,00,000 to 9,00,000"` → disclosed, 600000..900000.
pub fn parse_salary(text: &str) -> SalaryInfo {
    let disclosed = !text.contains("Not disclosed");
    let plain = text.replace(',', "");

    let min = DECIMAL_RE
        .captures(&plain)
        .and_then(|c| c[1].parse::<f64>().ok());
    let max = UPPER_BOUND_RE
        .captures(&plain)
        .and_then(|c| c[1].parse::<f64>().ok())
        .or(min);

    let max = match (min, max) {
        (Some(lo), Some(hi)) => Some(hi.max(lo)),
        (_, hi) => hi,
    };

    SalaryInfo {
        disclosed,
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_ranges_and_single_values() {
        assert_eq!(parse_experience("3-5 Years"), Ok((3, 5)));
        assert_eq!(parse_experience("12-15 Years"), Ok((12, 15)));
        assert_eq!(parse_experience("4 Years"), Ok((4, 4)));
        assert_eq!(parse_experience("Fresher, 0 Years"), Ok((0, 0)));
    }

    #[test]
    fn experience_without_digits_is_an_error() {
        let err = parse_experience("Not mentioned").unwrap_err();
        assert_eq!(err.field, "Experience");
        assert_eq!(err.value, "Not mentioned");
        assert_eq!(err.reason, ParseFailure::NoInteger);
    }

    #[test]
    fn oversized_numbers_are_reported_as_out_of_range() {
        let err = parse_reviews("99999999999999999999 Reviews").unwrap_err();
        assert_eq!(err.reason, ParseFailure::OutOfRange);
        assert!(err.to_string().starts_with("integer out of range in Reviews"));
    }

    #[test]
    fn reversed_experience_range_keeps_max_at_least_min() {
        assert_eq!(parse_experience("5-3 Years"), Ok((5, 5)));
        assert_eq!(parse_experience("10 to 2 Years"), Ok((10, 10)));
    }

    #[test]
    fn every_enumerated_range_parses_to_its_bounds() {
        for range in crate::predict::EXPERIENCE_RANGES {
            let (a, b) = range
                .trim_end_matches(" Years")
                .split_once('-')
                .unwrap();
            let expected = (a.parse().unwrap(), b.parse().unwrap());
            assert_eq!(parse_experience(range), Ok(expected), "{range}");
        }
    }

    #[test]
    fn reviews_take_the_first_integer() {
        assert_eq!(parse_reviews("512 Reviews"), Ok(512));
        assert_eq!(parse_reviews("1,234 Reviews"), Ok(1));
        assert!(parse_reviews("No reviews").is_err());
    }

    #[test]
    fn post_age_keywords() {
        assert_eq!(parse_post_age("5 days"), Some(5.0));
        assert_eq!(parse_post_age("5 Days Ago"), Some(5.0));
        assert_eq!(parse_post_age("2 months"), Some(60.0));
        assert_eq!(parse_post_age("a few hours ago"), Some(0.0));
        assert_eq!(parse_post_age("Just now"), None);
        assert_eq!(parse_post_age("30+ Days Ago"), None);
    }

    #[test]
    fn huge_month_counts_do_not_overflow() {
        assert_eq!(parse_post_age("999999999999999999 Months Ago"), None);
        assert_eq!(parse_post_age("99999999999999999999 Days Ago"), None);
    }

    #[test]
    fn salary_disclosure_and_bounds() {
        let hidden = parse_salary("Not disclosed");
        assert!(!hidden.disclosed);
        assert_eq!(hidden.min, None);
        assert_eq!(hidden.max, None);

        let range = parse_salary("6,00,000 to 9,00,000");
        assert!(range.disclosed);
        assert_eq!(range.min, Some(600000.0));
        assert_eq!(range.max, Some(900000.0));

        let reversed = parse_salary("9,00,000 to 6,00,000");
        assert_eq!(reversed.min, Some(900000.0));
        assert_eq!(reversed.max, Some(900000.0));
        assert!(reversed.max >= reversed.min);

        let single = parse_salary("4.5 Lacs PA");
        assert_eq!(single.min, Some(4.5));
        assert_eq!(single.max, Some(4.5));
    }

    #[test]
    fn integers_in_order() {
        assert_eq!(integers("5-10 Years"), vec![5, 10]);
        assert!(integers("none").is_empty());
    }
}
