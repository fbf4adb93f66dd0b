//! Census of Manufactures. Quinquennial; year then volume then part.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PART, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Census of Manufactures";
const CANONICAL: &[Feature] = &[Feature::Year, Feature::Volume, Feature::Part];

pub struct CensusOfManufactures {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl CensusOfManufactures {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR}{SEP}{VOLUME}{SEP}{PART}"),
            format!(r"{YEAR}{SEP}{VOLUME}"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for CensusOfManufactures {
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
        &[1047276]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["C 3.24:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}
