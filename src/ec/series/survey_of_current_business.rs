//! Survey of Current Business. Monthly volume/number, like the labor
//! review but with terser holdings strings.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, NUMBER, NUMBER_RANGE, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Survey of Current Business";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Number];

pub struct SurveyOfCurrentBusiness {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl SurveyOfCurrentBusiness {
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

impl SeriesGrammar for SurveyOfCurrentBusiness {
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
        &[1697070]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["C 59.11:", "C 43.8:"]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_with_month() {
        let g = SurveyOfCurrentBusiness::build().unwrap();
        let f = g.parse_ec("V. 63:NO. 11 (1983:NOV.)").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Volume:63, Number:11"));
    }
}
