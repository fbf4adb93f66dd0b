//! Climatological Data. Monthly per-state issues with an annual
//! summary; holdings carry volume, number, and often the month.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_month_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, MONTH_RANGE, NUMBER, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Climatological Data";
const CANONICAL: &[Feature] = &[
    Feature::Volume,
    Feature::Number,
    Feature::Year,
    Feature::Month,
];

pub struct ClimatologicalData {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl ClimatologicalData {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}\s*\({YEAR}:{MONTH_RANGE}\)"),
            format!(r"{VOLUME}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}"),
            format!(r"{YEAR}:{MONTH}"),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for ClimatologicalData {
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
        &[1567589]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["C 55.214:", "C 30.18:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        explode_month_range(self, features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_span_explodes_per_month() {
        let g = ClimatologicalData::build().unwrap();
        let f = g.parse_ec("V. 88 (1984:JAN.-MAR.)").unwrap();
        let issues = g.explode(&f);
        assert_eq!(issues.len(), 3);
        assert!(issues.contains_key("Volume:88, Year:1984, Month:JAN"));
        assert!(issues.contains_key("Volume:88, Year:1984, Month:MAR"));
    }
}
