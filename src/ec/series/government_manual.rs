//! United States Government Manual. Annual, issued across a span year
//! ("1999/2000") for most of its run.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "United States Government Manual";
const CANONICAL: &[Feature] = &[Feature::Year, Feature::StartYear, Feature::EndYear];

pub struct UnitedStatesGovernmentManual {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl UnitedStatesGovernmentManual {
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

impl SeriesGrammar for UnitedStatesGovernmentManual {
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
        &[1202448, 2163256]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["AE 2.108/2:", "GS 4.109:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_year_crosses_the_century() {
        let g = UnitedStatesGovernmentManual::build().unwrap();
        let f = g.parse_ec("1999/2000").unwrap();
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Start Year:1999, End Year:2000")
        );
    }
}
