//! Congressional Record (bound edition).
//!
//! One volume per session, issued in numbered parts; daily-edition
//! holdings carry issue numbers instead:
//! - "V. 129:PT. 2"
//! - "V. 129:PT. 1-3"
//! - "V. 129:NO. 46 (1983:APR. 12)"

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{DAY, MONTH, NUMBER, NUMBER_RANGE, PART, PART_RANGE, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Congressional Record";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Part, Feature::Number];

pub struct CongressionalRecord {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl CongressionalRecord {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\s*{DAY}\)"),
            format!(r"{VOLUME}{SEP}{PART}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{PART_RANGE}"),
            format!(r"{VOLUME}{SEP}{PART}"),
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

impl SeriesGrammar for CongressionalRecord {
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
        &[5058415, 2437919]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["X 1.1:", "X/A."]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        if features.contains(Feature::StartPart) {
            explode_numeric_range(
                self,
                features,
                Feature::StartPart,
                Feature::EndPart,
                Feature::Part,
            )
        } else {
            explode_numeric_range(
                self,
                features,
                Feature::StartNumber,
                Feature::EndNumber,
                Feature::Number,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> CongressionalRecord {
        CongressionalRecord::build().unwrap()
    }

    #[test]
    fn bound_part_parses() {
        let g = grammar();
        let f = g.parse_ec("V. 129:PT. 2").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Volume:129, Part:2"));
    }

    #[test]
    fn part_range_explodes() {
        let g = grammar();
        let f = g.parse_ec("V. 129:PT. 1-3").unwrap();
        let parts = g.explode(&f);
        assert_eq!(parts.len(), 3);
        assert!(parts.contains_key("Volume:129, Part:1"));
        assert!(parts.contains_key("Volume:129, Part:3"));
    }

    #[test]
    fn daily_edition_issue() {
        let g = grammar();
        let f = g.parse_ec("V. 129:NO. 46 (1983:APR. 12)").unwrap();
        assert_eq!(f.get(Feature::Number), Some("46"));
        assert_eq!(f.get(Feature::Month), Some("APR"));
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Volume:129, Number:46"));
    }
}
