//! Cases Decided in the Court of Claims of the United States.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{VOLUME, VOLUME_RANGE, YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Decisions of the Court of Claims";
const CANONICAL: &[Feature] = &[Feature::Volume];

pub struct DecisionsOfTheCourtOfClaims {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl DecisionsOfTheCourtOfClaims {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{VOLUME}\s*\({YEAR_RANGE}\)"),
            format!(r"{VOLUME}\s*\({YEAR}\)"),
            VOLUME_RANGE.to_string(),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for DecisionsOfTheCourtOfClaims {
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
        &[1768627]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["JU 3.9:"]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_run() {
        let g = DecisionsOfTheCourtOfClaims::build().unwrap();
        let f = g.parse_ec("V. 101-105").unwrap();
        let issues = g.explode(&f);
        assert_eq!(issues.len(), 5);
        assert!(issues.contains_key("Volume:103"));
    }

    #[test]
    fn volume_keeps_only_volume_in_the_key() {
        let g = DecisionsOfTheCourtOfClaims::build().unwrap();
        let f = g.parse_ec("V. 140 (1957)").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Volume:140"));
    }
}
