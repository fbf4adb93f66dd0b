//! Public Papers of the Presidents.
//!
//! Annual per president, split into books; transition years cover a span:
//! - "1975:BK. 2"
//! - "1963-64"
//! - "1963-64:BK. 1"

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{BOOK, SEP, YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Public Papers of the Presidents";
const CANONICAL: &[Feature] = &[
    Feature::Year,
    Feature::StartYear,
    Feature::EndYear,
    Feature::Book,
];

pub struct PublicPapersOfThePresidents {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl PublicPapersOfThePresidents {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR_RANGE}{SEP}{BOOK}"),
            format!(r"{YEAR}{SEP}{BOOK}"),
            format!(r"\(?{YEAR_RANGE}\)?"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for PublicPapersOfThePresidents {
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
        &[1198154]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["AE 2.114:", "GS 4.113:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}
