//! Vital Statistics of the United States.
//!
//! Annual; volumes subdivided into lettered parts:
//! - "1970:V. 2:PT. A"
//! - "1970:V. 1"

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Vital Statistics of the United States";
const CANONICAL: &[Feature] = &[Feature::Year, Feature::Volume, Feature::Part];

/// Parts here are letters ("PT. A") as often as digits.
const LETTER_PART: &str = r"P(?:T|ART)\.?\s*(?P<part>[A-Z]|\d{1,3}[A-Z]?)";

pub struct VitalStatistics {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl VitalStatistics {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR}{SEP}{VOLUME}{SEP}{LETTER_PART}"),
            format!(r"{YEAR}{SEP}{VOLUME}"),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for VitalStatistics {
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
        &[1168068]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["HE 20.6210:", "FS 2.112:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lettered_part() {
        let g = VitalStatistics::build().unwrap();
        let f = g.parse_ec("1970:V. 2:PT. A").unwrap();
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Year:1970, Volume:2, Part:A")
        );
    }
}
