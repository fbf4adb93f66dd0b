//! Monthly Labor Review.
//!
//! Monthly; volume/number with the month spelled in the chronology.
//! Quarterly bindings show month ranges:
//! - "V. 106:NO. 4 (1983:APR.)"
//! - "V. 106 (1983:JUL.-SEPT.)"
//! - "V. 106:NO. 7-9"

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{
    explode_month_range, explode_numeric_range, Preprocessor, SeriesGrammar,
};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, MONTH_RANGE, NUMBER, NUMBER_RANGE, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Monthly Labor Review";
const CANONICAL: &[Feature] = &[
    Feature::Volume,
    Feature::Number,
    Feature::Year,
    Feature::Month,
];

pub struct MonthlyLaborReview {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl MonthlyLaborReview {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER_RANGE}\s*\({YEAR}:{MONTH_RANGE}\)"),
            format!(r"{VOLUME}\s*\({YEAR}:{MONTH_RANGE}\)"),
            format!(r"{VOLUME}\s*\({YEAR}:{MONTH}\)"),
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

impl SeriesGrammar for MonthlyLaborReview {
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
        &[5345258, 1757953]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["L 2.6:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        if features.contains(Feature::StartNumber) {
            explode_numeric_range(
                self,
                features,
                Feature::StartNumber,
                Feature::EndNumber,
                Feature::Number,
            )
        } else if features.contains(Feature::StartMonth) {
            explode_month_range(self, features)
        } else {
            crate::ec::grammar::explode_single(self, features)
        }
    }
}
