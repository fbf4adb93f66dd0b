//! Budget of the United States Government.
//!
//! Annual by fiscal year; "FY 1984" and "1984" name the same issue.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PART, SEP, YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Budget of the United States Government";
const CANONICAL: &[Feature] = &[
    Feature::Year,
    Feature::StartYear,
    Feature::EndYear,
    Feature::Part,
];

pub struct BudgetOfTheUnitedStates {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl BudgetOfTheUnitedStates {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"(?:FY\s*)?{YEAR}{SEP}{PART}"),
            format!(r"(?:FY\s*)?\(?{YEAR_RANGE}\)?"),
            format!(r"(?:FY\s*)?\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for BudgetOfTheUnitedStates {
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
        &[1198072, 5306379]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["PREX 2.8:", "T 1.8:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fiscal_year_prefix_is_transparent() {
        let g = BudgetOfTheUnitedStates::build().unwrap();
        let a = g.parse_ec("FY 1984").unwrap();
        let b = g.parse_ec("1984").unwrap();
        assert_eq!(g.canonicalize(&a), g.canonicalize(&b));
    }
}
