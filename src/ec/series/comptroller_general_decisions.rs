//! Decisions of the Comptroller General of the United States.
//!
//! Bound annual volumes, usually cited with the fiscal span:
//! - "V. 56 (1976/77)"
//! - "V. 56"

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{VOLUME, YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Decisions of the Comptroller General of the United States";
const CANONICAL: &[Feature] = &[
    Feature::Volume,
    Feature::Year,
    Feature::StartYear,
    Feature::EndYear,
];

pub struct DecisionsOfTheComptrollerGeneral {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl DecisionsOfTheComptrollerGeneral {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}\s*\({YEAR_RANGE}\)"),
            format!(r"{VOLUME}\s*\({YEAR}\)"),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for DecisionsOfTheComptrollerGeneral {
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
        &[1768344]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["GA 1.5:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_with_fiscal_span() {
        let g = DecisionsOfTheComptrollerGeneral::build().unwrap();
        let f = g.parse_ec("V. 56 (1976/77)").unwrap();
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Volume:56, Start Year:1976, End Year:1977")
        );
    }
}
