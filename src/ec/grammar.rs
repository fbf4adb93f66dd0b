//! The series-grammar capability and the default fallback grammar.
//!
//! A [`SeriesGrammar`] turns one raw enumeration/chronology string into a
//! [`FeatureMap`] (`parse_ec`), expands a parsed range into discrete issues
//! (`explode`), and renders a feature map as its canonical key
//! (`canonicalize`). The default implementations carry the behavior shared
//! by every series; bespoke grammars override patterns, canonical order,
//! and explosion.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::pattern::PatternSet;
use crate::ec::postprocess::{
    expand_end_year, normalize_month, plausible_year, trim_leading_zeros,
};
use crate::ec::tokens;
use crate::error::GrammarBuildError;

/// Feature-rendering order used when a series does not declare its own.
pub const DEFAULT_CANONICAL_ORDER: &[Feature] = &[
    Feature::Volume,
    Feature::StartVolume,
    Feature::EndVolume,
    Feature::Part,
    Feature::StartPart,
    Feature::EndPart,
    Feature::Number,
    Feature::StartNumber,
    Feature::EndNumber,
    Feature::Book,
    Feature::Sheet,
    Feature::Congress,
    Feature::Session,
    Feature::Series,
    Feature::Edition,
    Feature::Year,
    Feature::StartYear,
    Feature::EndYear,
    Feature::Month,
    Feature::StartMonth,
    Feature::EndMonth,
    Feature::Day,
    Feature::StartDay,
    Feature::EndDay,
    Feature::StartPage,
    Feature::EndPage,
    Feature::Supplement,
];

/// Ranges wider than this are treated as implausible and not exploded.
const MAX_RANGE_WIDTH: u32 = 2_000;

// =============================================================================
// Preprocessing
// =============================================================================

/// Superficial-noise stripping applied before pattern matching.
///
/// Compiled once per grammar at construction; no global state.
pub struct Preprocessor {
    copy_noise: Regex,
    widen_paren: Regex,
    widen_bare: Regex,
    dup_year: Regex,
    whitespace: Regex,
}

impl Preprocessor {
    pub fn build(series: &'static str) -> Result<Self, GrammarBuildError> {
        let compile = |src: &str| {
            Regex::new(src).map_err(|source| GrammarBuildError::Pattern { series, source })
        };
        Ok(Self {
            copy_noise: compile(tokens::COPY_NOISE)?,
            widen_paren: compile(r"\(\s*([89]\d{2})\s*\)")?,
            widen_bare: compile(r"^([89]\d{2})$")?,
            dup_year: compile(r"(\d{4})\s*\(\s*(\d{4})\s*\)")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Uppercase, collapse whitespace, strip copy annotations, widen
    /// 3-digit years, collapse duplicated years.
    ///
    /// Returns `None` when the string repeats a year with two different
    /// values; the parse is internally contradictory and is abandoned.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let s = raw.trim().to_ascii_uppercase();
        let s = self.whitespace.replace_all(&s, " ").into_owned();
        let s = self.copy_noise.replace(&s, "").into_owned();
        // "983" was a dropped-digit "1983" in enough hand-keyed holdings
        // to warrant repair, but only where a year can sit: parenthesized
        // or standing alone. Issue numbers also run three digits.
        let s = self.widen_paren.replace_all(&s, "(1$1)").into_owned();
        let s = self.widen_bare.replace(&s, "1$1").into_owned();

        let mut contradictory = false;
        let s = self
            .dup_year
            .replace_all(&s, |caps: &regex::Captures<'_>| {
                if caps[1] == caps[2] {
                    caps[1].to_string()
                } else {
                    contradictory = true;
                    caps[0].to_string()
                }
            })
            .into_owned();
        if contradictory {
            debug!(raw, "duplicate years disagree; abandoning parse");
            return None;
        }
        Some(s.trim().to_string())
    }
}

// =============================================================================
// The grammar capability
// =============================================================================

pub trait SeriesGrammar {
    /// Display name of the serial ("Federal Register").
    fn name(&self) -> &'static str;

    fn patterns(&self) -> &PatternSet;

    fn preprocessor(&self) -> &Preprocessor;

    /// OCLC numbers identifying this serial. Empty for the default grammar.
    fn oclc_allowlist(&self) -> &[u64] {
        &[]
    }

    /// SuDoc stem prefixes identifying this serial.
    fn sudoc_prefixes(&self) -> &[&'static str] {
        &[]
    }

    fn canonical_order(&self) -> &[Feature] {
        DEFAULT_CANONICAL_ORDER
    }

    /// Strip superficial noise ahead of matching.
    fn preprocess(&self, raw: &str) -> Option<String> {
        self.preprocessor().clean(raw)
    }

    /// Repair matched features ahead of canonicalization.
    fn postprocess(&self, features: FeatureMap) -> Option<FeatureMap> {
        default_postprocess(features)
    }

    /// Parse one raw EC string. `None` means no pattern fit or the data
    /// was too damaged to trust; the caller retains the raw string.
    fn parse_ec(&self, raw: &str) -> Option<FeatureMap> {
        let cleaned = self.preprocess(raw)?;
        if cleaned.is_empty() {
            return None;
        }
        let matched = self.patterns().first_match(&cleaned)?;
        let features = self.postprocess(matched)?;
        if !years_plausible(&features) {
            debug!(raw, "implausible year; abandoning parse");
            return None;
        }
        Some(features)
    }

    /// Render the canonical key for a feature map.
    fn canonicalize(&self, features: &FeatureMap) -> Option<String> {
        features.canonical_key(self.canonical_order())
    }

    /// Expand one parsed feature map into discrete issues, keyed by
    /// canonical key. The default wraps the map as a single entry.
    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        explode_single(self, features)
    }
}

/// One canonical entry wrapping the map unchanged (the non-enumerable case).
pub fn explode_single<G: SeriesGrammar + ?Sized>(
    grammar: &G,
    features: &FeatureMap,
) -> BTreeMap<String, FeatureMap> {
    let mut out = BTreeMap::new();
    if let Some(key) = grammar.canonicalize(features) {
        out.insert(key, features.clone());
    }
    out
}

/// Every year-valued feature must be plausible or the parse is rejected.
pub fn years_plausible(features: &FeatureMap) -> bool {
    [Feature::Year, Feature::StartYear, Feature::EndYear]
        .iter()
        .all(|f| features.get(*f).map_or(true, plausible_year))
}

/// Shared post-match repair: month normalization, end-year expansion,
/// leading-zero trimming on day features.
pub fn default_postprocess(features: FeatureMap) -> Option<FeatureMap> {
    let mut out = features;

    for f in [Feature::Month, Feature::StartMonth, Feature::EndMonth] {
        if let Some(raw) = out.get(f) {
            match normalize_month(raw) {
                Some(abbr) => out = out.with(f, abbr),
                // A chronology segment matched as a month but resolves to
                // no month; the match was spurious.
                None => return None,
            }
        }
    }

    if let (Some(start), Some(end)) = (out.get(Feature::StartYear), out.get(Feature::EndYear)) {
        let expanded = expand_end_year(start, end)?;
        out = out.with(Feature::EndYear, expanded);
    }

    for f in [Feature::Day, Feature::StartDay, Feature::EndDay] {
        if let Some(v) = out.get(f) {
            let trimmed = trim_leading_zeros(v);
            out = out.with(f, trimmed);
        }
    }

    Some(out)
}

// =============================================================================
// Range explosion helpers
// =============================================================================

/// Explode a numeric `[start, end]` range into one entry per value of
/// `target`, dropping the range features. Falls back to a single entry for
/// inverted or implausibly wide ranges.
pub fn explode_numeric_range<G: SeriesGrammar + ?Sized>(
    grammar: &G,
    features: &FeatureMap,
    start: Feature,
    end: Feature,
    target: Feature,
) -> BTreeMap<String, FeatureMap> {
    let bounds = features
        .get(start)
        .zip(features.get(end))
        .and_then(|(s, e)| Some((s.parse::<u32>().ok()?, e.parse::<u32>().ok()?)));

    let (lo, hi) = match bounds {
        Some((lo, hi)) if lo <= hi && hi - lo < MAX_RANGE_WIDTH => (lo, hi),
        // Non-enumerable range: exactly one entry.
        _ => return explode_single(grammar, features),
    };

    let mut out = BTreeMap::new();
    for n in lo..=hi {
        let single = features
            .clone()
            .without(start)
            .without(end)
            .with(target, n.to_string());
        if let Some(key) = grammar.canonicalize(&single) {
            out.insert(key, single);
        }
    }
    out
}

/// Explode a month range ("JAN-MAR") into one entry per month.
pub fn explode_month_range<G: SeriesGrammar + ?Sized>(
    grammar: &G,
    features: &FeatureMap,
) -> BTreeMap<String, FeatureMap> {
    use crate::ec::postprocess::{month_abbr, month_number};

    let bounds = features
        .get(Feature::StartMonth)
        .zip(features.get(Feature::EndMonth))
        .and_then(|(s, e)| Some((month_number(s)?, month_number(e)?)));

    let (lo, hi) = match bounds {
        Some((lo, hi)) if lo <= hi => (lo, hi),
        _ => return explode_single(grammar, features),
    };

    let mut out = BTreeMap::new();
    for n in lo..=hi {
        let abbr = match month_abbr(n) {
            Some(a) => a,
            None => continue,
        };
        let single = features
            .clone()
            .without(Feature::StartMonth)
            .without(Feature::EndMonth)
            .with(Feature::Month, abbr);
        if let Some(key) = grammar.canonicalize(&single) {
            out.insert(key, single);
        }
    }
    out
}

// =============================================================================
// Default grammar
// =============================================================================

/// Generic fallback grammar for serials without a bespoke one.
///
/// Pattern order goes simplest first, then increasingly composite; the
/// first full-string match wins.
pub struct DefaultGrammar {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl DefaultGrammar {
    pub fn build() -> Result<Self, GrammarBuildError> {
        use tokens::*;
        let sources = vec![
            // Bare chronology
            format!(r"\(?{YEAR}\)?"),
            format!(r"\(?{YEAR_RANGE}\)?"),
            // Bare enumeration
            VOLUME.to_string(),
            NUMBER.to_string(),
            PART.to_string(),
            EDITION.to_string(),
            SUPPLEMENT.to_string(),
            NUMBER_RANGE.to_string(),
            VOLUME_RANGE.to_string(),
            // Enumeration + chronology
            format!(r"{VOLUME}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{YEAR}"),
            format!(r"{NUMBER}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}"),
            format!(r"{VOLUME}{SEP}{PART}"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\s*{DAY}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER_RANGE}"),
            // Chronology-led forms
            format!(r"{MONTH}\s*{YEAR}"),
            format!(r"{MONTH}\s*{DAY},?\s*{YEAR}"),
            format!(r"{MONTH_RANGE}\s*{YEAR}"),
            format!(r"{YEAR}:{MONTH}"),
            format!(r"{YEAR}:{MONTH}\.?\s*{DAY}"),
            format!(r"\({YEAR}:{MONTH}\)"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build("default")?,
            patterns: PatternSet::compile("default", &sources)?,
        })
    }
}

impl SeriesGrammar for DefaultGrammar {
    fn name(&self) -> &'static str {
        "Default"
    }

    fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> DefaultGrammar {
        DefaultGrammar::build().unwrap()
    }

    #[test]
    fn bare_year_and_volume() {
        let g = grammar();
        let f = g.parse_ec("1983").unwrap();
        assert_eq!(f.get(Feature::Year), Some("1983"));

        let f = g.parse_ec("v. 48").unwrap();
        assert_eq!(f.get(Feature::Volume), Some("48"));
    }

    #[test]
    fn copy_annotations_are_stripped() {
        let g = grammar();
        let f = g.parse_ec("V. 48 C. 2").unwrap();
        assert_eq!(f.get(Feature::Volume), Some("48"));
        assert!(!f.contains(Feature::Year));
    }

    #[test]
    fn three_digit_year_widened() {
        let g = grammar();
        let f = g.parse_ec("V. 5 (983)").unwrap();
        assert_eq!(f.get(Feature::Year), Some("1983"));
    }

    #[test]
    fn future_year_invalidates_parse() {
        let g = grammar();
        assert!(g.parse_ec("2098").is_none());
    }

    #[test]
    fn contradictory_duplicate_years_fail() {
        let g = grammar();
        assert!(g.parse_ec("V. 10 1983 (1984)").is_none());
    }

    #[test]
    fn first_match_precedence_is_order_not_length() {
        let g = grammar();
        // "1983-85" must hit the year-range pattern, not bare year.
        let f = g.parse_ec("1983-85").unwrap();
        assert_eq!(f.get(Feature::StartYear), Some("1983"));
        assert_eq!(f.get(Feature::EndYear), Some("1985"));
    }

    #[test]
    fn default_explode_is_identity() {
        let g = grammar();
        let f = g.parse_ec("V. 48:NO. 4").unwrap();
        let exploded = g.explode(&f);
        assert_eq!(exploded.len(), 1);
        assert!(exploded.contains_key("Volume:48, Number:4"));
    }

    #[test]
    fn unresolvable_month_rejects_match() {
        let g = grammar();
        // "INDEX 1983" would otherwise match the month-year pattern.
        assert!(g.parse_ec("INDEX 1983").is_none());
    }

    #[test]
    fn numeric_range_explosion_helper() {
        let g = grammar();
        let f = g.parse_ec("NO. 201-250").unwrap();
        let exploded =
            explode_numeric_range(&g, &f, Feature::StartNumber, Feature::EndNumber, Feature::Number);
        assert_eq!(exploded.len(), 50);
        assert!(exploded.contains_key("Number:201"));
        assert!(exploded.contains_key("Number:250"));
    }

    #[test]
    fn inverted_range_explodes_to_single_entry() {
        let g = grammar();
        let f = FeatureMap::new()
            .with(Feature::StartNumber, "50")
            .with(Feature::EndNumber, "40");
        let exploded =
            explode_numeric_range(&g, &f, Feature::StartNumber, Feature::EndNumber, Feature::Number);
        assert_eq!(exploded.len(), 1);
    }
}
