//! Journal of the National Cancer Institute. Volume/number monthly.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, NUMBER, NUMBER_RANGE, SEP, SUPPLEMENT, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Journal of the National Cancer Institute";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Number, Feature::Supplement];

pub struct JournalOfTheNationalCancerInstitute {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl JournalOfTheNationalCancerInstitute {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}{SEP}{NUMBER}\s*\({YEAR}:{MONTH}\)"),
            format!(r"{VOLUME}{SEP}{NUMBER}{SEP}{SUPPLEMENT}"),
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

impl SeriesGrammar for JournalOfTheNationalCancerInstitute {
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
        &[1064763]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["HE 20.3161:", "FS 2.23:"]
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
