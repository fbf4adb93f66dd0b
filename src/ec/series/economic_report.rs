//! Economic Report of the President. Annual, occasionally in parts.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PART, SEP, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Economic Report of the President";
const CANONICAL: &[Feature] = &[Feature::Year, Feature::Part];

pub struct EconomicReportOfThePresident {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl EconomicReportOfThePresident {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR}{SEP}{PART}"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for EconomicReportOfThePresident {
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
        &[3160302, 1981025]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["PR 36.9:", "Y 4.EC 7:EC 7/2/"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_and_part() {
        let g = EconomicReportOfThePresident::build().unwrap();
        let f = g.parse_ec("1984:PT. 2").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Year:1984, Part:2"));
    }
}
