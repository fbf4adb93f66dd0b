//! Federal Reserve Bulletin. Monthly volume/number.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, NUMBER, NUMBER_RANGE, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Federal Reserve Bulletin";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Number];

pub struct FederalReserveBulletin {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl FederalReserveBulletin {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}\)"),
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

impl SeriesGrammar for FederalReserveBulletin {
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
        &[5156114, 1606843]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["FR 1.3:"]
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
