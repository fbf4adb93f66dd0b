//! Monthly Catalog of United States Government Publications.
//!
//! Holdings are year-led, subdivided by issue number or month:
//! - "1983:NO. 7"
//! - "1983:NO. 1-12"
//! - "1983:JULY"

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, NUMBER, NUMBER_RANGE, SEP, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Monthly Catalog of United States Government Publications";
const CANONICAL: &[Feature] = &[Feature::Year, Feature::Number, Feature::Month];

pub struct MonthlyCatalog {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl MonthlyCatalog {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR}{SEP}{NUMBER_RANGE}"),
            format!(r"{YEAR}{SEP}{NUMBER}"),
            format!(r"{YEAR}:{MONTH}"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for MonthlyCatalog {
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
        &[2264358, 3888063]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["GP 3.8:"]
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

    #[test]
    fn full_year_of_issues_explodes() {
        let g = MonthlyCatalog::build().unwrap();
        let f = g.parse_ec("1983:NO. 1-12").unwrap();
        let issues = g.explode(&f);
        assert_eq!(issues.len(), 12);
        assert!(issues.contains_key("Year:1983, Number:1"));
        assert!(issues.contains_key("Year:1983, Number:12"));
    }
}
