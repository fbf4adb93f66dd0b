//! Federal Register.
//!
//! Daily since 1936. One volume per year, issues numbered within the
//! volume, chronology in parentheses:
//! - "V. 48:NO. 4 (1983:JAN. 6)"
//! - "V. 62:NO. 109-133"
//! - "V. 48 (1983)"
//!
//! Issue identity is volume + number; chronology is corroborating detail
//! and does not enter the canonical key.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{DAY, MONTH, MONTH_RANGE, NUMBER, NUMBER_RANGE, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Federal Register";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Number];

pub struct FederalRegister {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl FederalRegister {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\s*{DAY}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER_RANGE}\s*\({YEAR}:{MONTH_RANGE}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER_RANGE}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER_RANGE}"),
            format!(r"{VOLUME}{SEP}{NUMBER}"),
            format!(r"{VOLUME}\s*\({YEAR}\)"),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for FederalRegister {
    fn name(&self) -> &'static str {
        NAME
    }

    fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    fn oclc_allowlist(&self) -> &[u64] {
        &[1768512, 41983385]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["AE 2.106:", "GS 4.107:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        explode_numeric_range(
            self,
            features,
            Feature::StartNumber,
            Feature::EndNumber,
            Feature::Number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> FederalRegister {
        FederalRegister::build().unwrap()
    }

    #[test]
    fn daily_issue_parses_fully() {
        let f = grammar().parse_ec("V. 48:NO. 4 (1983:JAN. 6)").unwrap();
        assert_eq!(f.get(Feature::Volume), Some("48"));
        assert_eq!(f.get(Feature::Number), Some("4"));
        assert_eq!(f.get(Feature::Year), Some("1983"));
        assert_eq!(f.get(Feature::Month), Some("JAN"));
        assert_eq!(f.get(Feature::Day), Some("6"));
    }

    #[test]
    fn canonical_key_is_volume_and_number() {
        let g = grammar();
        let f = g.parse_ec("V. 48:NO. 4 (1983:JAN. 6)").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Volume:48, Number:4"));
    }

    #[test]
    fn issue_range_explodes_per_issue() {
        let g = grammar();
        let f = g.parse_ec("V. 62:NO. 109-133").unwrap();
        let issues = g.explode(&f);
        assert_eq!(issues.len(), 25);
        assert!(issues.contains_key("Volume:62, Number:109"));
        assert!(issues.contains_key("Volume:62, Number:133"));
    }

    #[test]
    fn bare_volume_is_a_single_entry() {
        let g = grammar();
        let f = g.parse_ec("V. 48 (1983)").unwrap();
        let issues = g.explode(&f);
        assert_eq!(issues.len(), 1);
        assert!(issues.contains_key("Volume:48"));
    }

    #[test]
    fn prose_strings_do_not_match() {
        assert!(grammar().parse_ec("MICROFICHE INDEX 1983").is_none());
    }
}
