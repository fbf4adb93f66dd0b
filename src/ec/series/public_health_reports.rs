//! Public Health Reports.
//!
//! Weekly in its early run, later bimonthly; volume/number plus
//! occasional numbered supplements:
//! - "V. 98:NO. 2 (1983:MAR.-APR.)"
//! - "V. 61:SUP. 186"

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, MONTH_RANGE, NUMBER, NUMBER_RANGE, SEP, SUPPLEMENT, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Public Health Reports";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Number, Feature::Supplement];

pub struct PublicHealthReports {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl PublicHealthReports {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH_RANGE}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{SUPPLEMENT}"),
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

impl SeriesGrammar for PublicHealthReports {
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
        &[1767575, 7830552]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["HE 20.30:", "T 27.6:"]
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
