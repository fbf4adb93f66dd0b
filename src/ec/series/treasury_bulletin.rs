//! Treasury Bulletin.
//!
//! Unvolumed monthly (quarterly from 1982); identity is year + month:
//! - "1983:JAN."
//! - "JAN. 1983"
//! - "1983:JAN.-MAR."

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_month_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{MONTH, MONTH_RANGE, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Treasury Bulletin";
const CANONICAL: &[Feature] = &[
    Feature::Year,
    Feature::Month,
    Feature::StartMonth,
    Feature::EndMonth,
];

pub struct TreasuryBulletin {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl TreasuryBulletin {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR}:{MONTH_RANGE}"),
            format!(r"{YEAR}:{MONTH}"),
            format!(r"{MONTH_RANGE}\s*{YEAR}"),
            format!(r"{MONTH}\s*{YEAR}"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for TreasuryBulletin {
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
        &[1768722]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["T 63.103/2:", "T 1.3:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn explode(&self, features: &FeatureMap) -> BTreeMap<String, FeatureMap> {
        explode_month_range(self, features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> TreasuryBulletin {
        TreasuryBulletin::build().unwrap()
    }

    #[test]
    fn month_led_and_year_led_forms_agree() {
        let g = grammar();
        let a = g.parse_ec("1983:JAN.").unwrap();
        let b = g.parse_ec("JAN. 1983").unwrap();
        assert_eq!(g.canonicalize(&a), g.canonicalize(&b));
        assert_eq!(g.canonicalize(&a).as_deref(), Some("Year:1983, Month:JAN"));
    }

    #[test]
    fn quarter_explodes_to_three_months() {
        let g = grammar();
        let f = g.parse_ec("1983:JAN.-MAR.").unwrap();
        let months = g.explode(&f);
        assert_eq!(months.len(), 3);
        assert!(months.contains_key("Year:1983, Month:FEB"));
    }
}
