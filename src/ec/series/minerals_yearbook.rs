//! Minerals Yearbook. Annual in several volumes; two-year editions occur.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{SEP, VOLUME, YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Minerals Yearbook";
const CANONICAL: &[Feature] = &[
    Feature::Year,
    Feature::StartYear,
    Feature::EndYear,
    Feature::Volume,
];

pub struct MineralsYearbook {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl MineralsYearbook {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR_RANGE}{SEP}{VOLUME}"),
            format!(r"{YEAR}{SEP}{VOLUME}"),
            format!(r"\(?{YEAR_RANGE}\)?"),
            format!(r"\(?{YEAR}\)?"),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for MineralsYearbook {
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
        &[1847412]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["I 28.37:", "I 19.165:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}
