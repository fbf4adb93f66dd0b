//! Yearbook of Agriculture. One thematic volume per year.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::YEAR;
use crate::error::GrammarBuildError;

const NAME: &str = "Yearbook of Agriculture";
const CANONICAL: &[Feature] = &[Feature::Year];

pub struct YearbookOfAgriculture {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl YearbookOfAgriculture {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![format!(r"\(?{YEAR}\)?")];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for YearbookOfAgriculture {
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
        &[1768149]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["A 1.10:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}
