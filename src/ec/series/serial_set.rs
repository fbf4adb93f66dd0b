//! United States Congressional Serial Set.
//!
//! Continuously numbered since 1817; holdings are serial-number runs,
//! sometimes with congress/session context:
//! - "NO. 13216"
//! - "NO. 201-250"
//! - "99TH CONG., 1ST SESS."

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{explode_numeric_range, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{CONGRESS, NUMBER, NUMBER_RANGE, SESSION};
use crate::error::GrammarBuildError;

const NAME: &str = "United States Congressional Serial Set";
const CANONICAL: &[Feature] = &[Feature::Number, Feature::Congress, Feature::Session];

pub struct CongressionalSerialSet {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl CongressionalSerialSet {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{CONGRESS},?\s*{SESSION}"),
            NUMBER_RANGE.to_string(),
            NUMBER.to_string(),
            // Bare serial numbers; 5 digits only, to keep clear of years.
            r"(?P<number>\d{5})".to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for CongressionalSerialSet {
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
        &[3888071, 1769498]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["Y 1.1/2:"]
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

    fn grammar() -> CongressionalSerialSet {
        CongressionalSerialSet::build().unwrap()
    }

    #[test]
    fn number_run_explodes_completely() {
        let g = grammar();
        let f = g.parse_ec("NO. 201-250").unwrap();
        let issues = g.explode(&f);
        assert_eq!(issues.len(), 50);
        assert!(issues.contains_key("Number:201"));
        assert!(issues.contains_key("Number:250"));
        for key in issues.keys() {
            assert!(key.starts_with("Number:"));
        }
    }

    #[test]
    fn congress_and_session() {
        let g = grammar();
        let f = g.parse_ec("99TH CONG., 1ST SESS.").unwrap();
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Congress:99, Session:1")
        );
    }

    #[test]
    fn four_digit_bare_numbers_are_not_serial_numbers() {
        // "1983" would be a year, not serial no. 1983.
        assert!(grammar().parse_ec("1983").is_none());
    }
}
