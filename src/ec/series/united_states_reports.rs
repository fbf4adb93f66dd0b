//! United States Reports.
//!
//! Enumerated by volume alone; a year in parentheses is corroboration.
//! Multi-volume holdings ("V. 408-410") are enumerable.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{SEP, VOLUME, VOLUME_RANGE, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "United States Reports";
const CANONICAL: &[Feature] = &[Feature::Volume];

pub struct UnitedStatesReports {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl UnitedStatesReports {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{YEAR}"),
            VOLUME_RANGE.to_string(),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for UnitedStatesReports {
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
        &[1768670, 10506064]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["JU 6.8:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        explode_numeric_range(
            self,
            features,
            Feature::StartVolume,
            Feature::EndVolume,
            Feature::Volume,
        )
    }
}
