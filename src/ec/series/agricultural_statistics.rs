//! Agricultural Statistics.
//!
//! An annual; some editions cover two years ("1975-76") and stay one
//! issue, not a range of issues.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Agricultural Statistics";
const CANONICAL: &[Feature] = &[Feature::Year, Feature::StartYear, Feature::EndYear];

pub struct AgriculturalStatistics {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl AgriculturalStatistics {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"\(?{YEAR_RANGE}\)?"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for AgriculturalStatistics {
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
        &[1773189]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["A 1.47:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_year_edition_is_one_issue() {
        let g = AgriculturalStatistics::build().unwrap();
        let f = g.parse_ec("1975-76").unwrap();
        assert_eq!(f.get(Feature::EndYear), Some("1976"));
        assert_eq!(g.explode(&f).len(), 1);
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Start Year:1975, End Year:1976")
        );
    }

    #[test]
    fn plain_year() {
        let g = AgriculturalStatistics::build().unwrap();
        let f = g.parse_ec("(1984)").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Year:1984"));
    }
}
