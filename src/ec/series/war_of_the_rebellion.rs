//! The War of the Rebellion: official records of the Union and
//! Confederate armies.
//!
//! Four series, each with its own volume numbering, some volumes in
//! parts:
//! - "SER. 1:V. 24:PT. 2"
//! - "SERIES 3:V. 5"

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PART, SEP, VOLUME};
use crate::error::GrammarBuildError;

const NAME: &str = "War of the Rebellion";
const CANONICAL: &[Feature] = &[Feature::Series, Feature::Volume, Feature::Part];

const SERIES_DESIGNATION: &str = r"SER(?:IES)?\.?\s*(?P<series>[1-4])";

pub struct WarOfTheRebellion {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl WarOfTheRebellion {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{SERIES_DESIGNATION}{SEP}{VOLUME}{SEP}{PART}"),
            format!(r"{SERIES_DESIGNATION}{SEP}{VOLUME}"),
            format!(r"{VOLUME}{SEP}{PART}"),
            VOLUME.to_string(),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for WarOfTheRebellion {
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
        &[427057, 8697590]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["W 45.5:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_volume_part() {
        let g = WarOfTheRebellion::build().unwrap();
        let f = g.parse_ec("SER. 1:V. 24:PT. 2").unwrap();
        assert_eq!(
            g.canonicalize(&f).as_deref(),
            Some("Series:1, Volume:24, Part:2")
        );
    }

    #[test]
    fn spelled_out_series() {
        let g = WarOfTheRebellion::build().unwrap();
        let f = g.parse_ec("SERIES 3:V. 5").unwrap();
        assert_eq!(g.canonicalize(&f).as_deref(), Some("Series:3, Volume:5"));
    }
}
