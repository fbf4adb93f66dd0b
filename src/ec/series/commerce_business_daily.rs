//! Commerce Business Daily.
//!
//! Issue-numbered daily; holdings are number-led with a dated chronology:
//! - "NO. 8023 (1992:JAN. 6)"
//! - "NO. 8023-8047"

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{DAY, MONTH, NUMBER, NUMBER_RANGE, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Commerce Business Daily";
const CANONICAL: &[Feature] = &[Feature::Number];

pub struct CommerceBusinessDaily {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl CommerceBusinessDaily {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{NUMBER}\s*\({YEAR}:{MONTH}\s*{DAY}\)"),
            format!(r"{NUMBER}\s*\({YEAR}\)"),
            NUMBER_RANGE.to_string(),
            NUMBER.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for CommerceBusinessDaily {
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
        &[2240818]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["C 1.76:"]
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
