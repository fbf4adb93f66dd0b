//! Reports of Investigations (Bureau of Mines).
//!
//! A numbered report series, not a chronological serial:
//! - "RI 9301"
//! - "NO. 9301"
//! - "NOS. 9301-9310"
//!
//! Four-digit report numbers overlap the year space, so a bare number
//! needs its RI/NO prefix; only 5-digit numbers stand alone.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{NUMBER_RANGE, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Reports of Investigations";
const CANONICAL: &[Feature] = &[Feature::Number];

const RI_NUMBER: &str = r"(?:RI|NOS?\.?)\s*(?P<number>\d{3,5})";

pub struct ReportsOfInvestigations {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl ReportsOfInvestigations {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{RI_NUMBER}\s*\({YEAR}\)"),
            NUMBER_RANGE.to_string(),
            RI_NUMBER.to_string(),
            r"(?P<number>\d{5})".to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for ReportsOfInvestigations {
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
        &[1770732]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["I 28.23:"]
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

    fn grammar() -> ReportsOfInvestigations {
        ReportsOfInvestigations::build().unwrap()
    }

    #[test]
    fn prefixed_report_number() {
        let g = grammar();
        let f = g.parse_ec("RI 9301").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Number:9301"));
    }

    #[test]
    fn bare_four_digit_number_is_rejected() {
        assert!(grammar().parse_ec("9301").is_none());
    }

    #[test]
    fn report_run_explodes() {
        let g = grammar();
        let f = g.parse_ec("NOS. 9301-9310").unwrap();
        assert_eq!(g.explode(&f).len(), 10);
    }
}
