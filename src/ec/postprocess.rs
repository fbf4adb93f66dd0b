//! Post-match repair shared by the series grammars.
//!
//! Holdings data spans ~150 years of cataloging practice, so matched
//! features still need repair before canonicalization:
//! - short end years expanded against the start year, with century rollover
//! - month names resolved through tiers of increasingly fuzzy matching
//! - implausible years (beyond current year + 5) rejected outright

use chrono::{Datelike, Utc};

/// Month full names and canonical 3-letter abbreviations, in order.
pub const MONTHS: [(&str, &str); 12] = [
    ("JANUARY", "JAN"),
    ("FEBRUARY", "FEB"),
    ("MARCH", "MAR"),
    ("APRIL", "APR"),
    ("MAY", "MAY"),
    ("JUNE", "JUN"),
    ("JULY", "JUL"),
    ("AUGUST", "AUG"),
    ("SEPTEMBER", "SEP"),
    ("OCTOBER", "OCT"),
    ("NOVEMBER", "NOV"),
    ("DECEMBER", "DEC"),
];

/// Conventional two-letter contractions seen in older holdings data.
const CONTRACTIONS: [(&str, &str); 13] = [
    ("JA", "JAN"),
    ("FE", "FEB"),
    ("MR", "MAR"),
    ("AP", "APR"),
    ("MY", "MAY"),
    ("JE", "JUN"),
    ("JY", "JUL"),
    ("AG", "AUG"),
    ("AU", "AUG"),
    ("SE", "SEP"),
    ("OC", "OCT"),
    ("NV", "NOV"),
    ("DE", "DEC"),
];

/// Resolve a month designation to its canonical abbreviation ("JAN").
///
/// Tiers, in order: exact abbreviation or full name; ordinal ("01", "1");
/// conventional contraction ("JY" => JUL); unambiguous prefix ("SEPT" =>
/// SEP); unique first-and-last-letter match; Jaro similarity above 0.84 as
/// a last resort.
pub fn normalize_month(raw: &str) -> Option<&'static str> {
    let m = raw.trim().trim_end_matches('.').to_ascii_uppercase();
    if m.is_empty() {
        return None;
    }

    // Exact abbreviation or full name
    for (full, abbr) in &MONTHS {
        if m == *abbr || m == *full {
            return Some(abbr);
        }
    }

    // Ordinal
    if let Ok(n) = m.parse::<usize>() {
        return month_abbr(n);
    }

    // Conventional contraction
    if let Some((_, abbr)) = CONTRACTIONS.iter().find(|(c, _)| *c == m) {
        return Some(abbr);
    }

    // Unambiguous prefix ("SEPT", "JA", "AUG.")
    let prefix_hits: Vec<&'static str> = MONTHS
        .iter()
        .filter(|(full, _)| full.starts_with(&m))
        .map(|(_, abbr)| *abbr)
        .collect();
    if prefix_hits.len() == 1 {
        return Some(prefix_hits[0]);
    }

    // First-and-last-letter contraction ("JY" => JULY, "MR" => ambiguous)
    if m.len() == 2 {
        let first = m.chars().next()?;
        let last = m.chars().nth(1)?;
        let hits: Vec<&'static str> = MONTHS
            .iter()
            .filter(|(full, _)| {
                full.starts_with(first) && full.ends_with(last)
            })
            .map(|(_, abbr)| *abbr)
            .collect();
        if hits.len() == 1 {
            return Some(hits[0]);
        }
    }

    // Fuzzy tier for OCR-ish forms ("JANUWARY")
    let mut best: Option<(&'static str, f64)> = None;
    for (full, abbr) in &MONTHS {
        let score = strsim::jaro(&m, full);
        if score > 0.84 && best.map_or(true, |(_, b)| score > b) {
            best = Some((abbr, score));
        }
    }
    best.map(|(abbr, _)| abbr)
}

/// Month abbreviation for a 1-based ordinal.
pub fn month_abbr(n: usize) -> Option<&'static str> {
    MONTHS.get(n.checked_sub(1)?).map(|(_, abbr)| *abbr)
}

/// 1-based ordinal for a canonical month abbreviation.
pub fn month_number(abbr: &str) -> Option<usize> {
    MONTHS.iter().position(|(_, a)| *a == abbr).map(|i| i + 1)
}

/// Expand a 2- or 3-digit end year against a 4-digit start year.
///
/// "1995"/"98" => "1998"; "1999"/"02" => "2002" (rollover when the short
/// end is less than the start's trailing digits). Already-4-digit ends
/// pass through; anything else is unrepairable.
pub fn expand_end_year(start: &str, end: &str) -> Option<String> {
    if start.len() != 4 || !start.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let start_num: u32 = start.parse().ok()?;
    match end.len() {
        4 => end.chars().all(|c| c.is_ascii_digit()).then(|| end.to_string()),
        2 => {
            let end_num: u32 = end.parse().ok()?;
            let century = start_num / 100;
            let trailing = start_num % 100;
            let century = if end_num < trailing { century + 1 } else { century };
            Some(format!("{:02}{:02}", century, end_num))
        }
        3 => {
            let end_num: u32 = end.parse().ok()?;
            let millennium = start_num / 1000;
            let trailing = start_num % 1000;
            let millennium = if end_num < trailing { millennium + 1 } else { millennium };
            Some(format!("{}{:03}", millennium, end_num))
        }
        _ => None,
    }
}

/// A year is plausible when it falls in [1600, current year + 5].
pub fn plausible_year(year: &str) -> bool {
    match year.parse::<i32>() {
        Ok(y) => y >= 1600 && y <= Utc::now().year() + 5,
        Err(_) => false,
    }
}

/// Strip leading zeros from a numeric designator ("06" => "6"); all-zero
/// input collapses to "0".
pub fn trim_leading_zeros(v: &str) -> String {
    let trimmed = v.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_exact_and_prefix() {
        assert_eq!(normalize_month("JAN."), Some("JAN"));
        assert_eq!(normalize_month("January"), Some("JAN"));
        assert_eq!(normalize_month("SEPT"), Some("SEP"));
        assert_eq!(normalize_month("Ju"), None); // JUNE/JULY ambiguous
    }

    #[test]
    fn month_ordinal_and_contraction() {
        assert_eq!(normalize_month("01"), Some("JAN"));
        assert_eq!(normalize_month("12"), Some("DEC"));
        assert_eq!(normalize_month("JY"), Some("JUL"));
        assert_eq!(normalize_month("JE"), Some("JUN"));
    }

    #[test]
    fn month_fuzzy_tier() {
        assert_eq!(normalize_month("JANUWARY"), Some("JAN"));
        assert_eq!(normalize_month("FEBUARY"), Some("FEB"));
        assert_eq!(normalize_month("QXZ"), None);
    }

    #[test]
    fn end_year_expansion() {
        assert_eq!(expand_end_year("1995", "98").as_deref(), Some("1998"));
        assert_eq!(expand_end_year("1999", "02").as_deref(), Some("2002"));
        assert_eq!(expand_end_year("1898", "05").as_deref(), Some("1905"));
        assert_eq!(expand_end_year("1995", "998").as_deref(), Some("1998"));
        assert_eq!(expand_end_year("1983", "1984").as_deref(), Some("1984"));
        assert_eq!(expand_end_year("83", "98"), None);
    }

    #[test]
    fn year_plausibility() {
        assert!(plausible_year("1983"));
        assert!(!plausible_year("2999"));
        assert!(!plausible_year("1599"));
        assert!(!plausible_year("19x3"));
    }
}
