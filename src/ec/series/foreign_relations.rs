//! Foreign Relations of the United States.
//!
//! Enumerated by covered year or span, then volume, then part:
//! - "1948:V. 3"
//! - "1952-54:V. 5:PT. 2"
//!
//! Spans name one compiled volume, never a run of issues.

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PART, SEP, VOLUME, YEAR, YEAR_RANGE};
use crate::error::GrammarBuildError;

const NAME: &str = "Foreign Relations of the United States";
const CANONICAL: &[Feature] = &[
    Feature::Year,
    Feature::StartYear,
    Feature::EndYear,
    Feature::Volume,
    Feature::Part,
];

pub struct ForeignRelations {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl ForeignRelations {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{YEAR_RANGE}{SEP}{VOLUME}{SEP}{PART}"),
            format!(r"{YEAR_RANGE}{SEP}{VOLUME}"),
            format!(r"{YEAR}{SEP}{VOLUME}{SEP}{PART}"),
            format!(r"{YEAR}{SEP}{VOLUME}"),
            format!(r"\(?{YEAR_RANGE}\)?"),
            format!(r"\(?{YEAR}\)?"),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for ForeignRelations {
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
        &[10261332, 1768396]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["S 1.1:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_volume_part() {
        let g = ForeignRelations::build().unwrap();
        let f = g.parse_ec("1952-54:V. 5:PT. 2").unwrap();
        assert_eq!(f.get(Feature::EndYear), Some("1954"));
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Start Year:1952, End Year:1954, Volume:5, Part:2")
        );
        assert_eq!(g.explode(&f).len(), 1);
    }
}
