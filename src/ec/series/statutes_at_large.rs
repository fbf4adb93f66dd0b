//! United States Statutes at Large.
//!
//! One volume per calendar year in the modern era, so volume and year are
//! interconvertible through the embedded table; holdings frequently name
//! only one of the two:
//! - "V. 96 (1982)"
//! - "V. 96:PT. 1"
//! - "1982"
//! - "V. 96:PP. 1035-1986"

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{default_postprocess, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PAGES, PART, SEP, VOLUME, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "United States Statutes at Large";
const CANONICAL: &[Feature] = &[Feature::Volume, Feature::Part];

/// Modern volumes only (v. 50, 1936, onward); earlier volumes span
/// multiple years and are left underived.
const VOLUME_YEARS: &str = include_str!("data/statutes_volume_years.json");

pub struct StatutesAtLarge {
    preprocessor: Preprocessor,
    patterns: PatternSet,
    volume_to_year: BTreeMap<u32, u32>,
    year_to_volume: BTreeMap<u32, u32>,
}

impl StatutesAtLarge {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let volume_to_year: BTreeMap<u32, u32> = serde_json::from_str(VOLUME_YEARS)
            .map_err(|source| GrammarBuildError::Table { series: NAME, source })?;
        let year_to_volume = volume_to_year.iter().map(|(v, y)| (*y, *v)).collect();

        let sources = vec![
            format!(r"{VOLUME}{SEP}{PAGES}"),
            format!(r"{VOLUME}{SEP}{PART}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{PART}"),
            format!(r"{VOLUME}\s*\({YEAR}\)"),
            format!(r"{VOLUME}{SEP}{YEAR}"),
            VOLUME.to_string(),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
            volume_to_year,
            year_to_volume,
        })
    }
}

impl SeriesGrammar for StatutesAtLarge {
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
        &[1768474, 3678222]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["AE 2.111:", "GS 4.111:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    /// Derive the missing half of the volume/year pair from the table.
    fn postprocess(&self, features: FeatureMap) -> Option<FeatureMap> {
        let mut out = default_postprocess(features)?;

        match (out.get(Feature::Volume), out.get(Feature::Year)) {
            (Some(vol), None) => {
                if let Some(year) = vol.parse().ok().and_then(|v: u32| self.volume_to_year.get(&v))
                {
                    out = out.with(Feature::Year, year.to_string());
                }
            }
            (None, Some(year)) => {
                if let Some(vol) = year.parse().ok().and_then(|y: u32| self.year_to_volume.get(&y))
                {
                    out = out.with(Feature::Volume, vol.to_string());
                }
            }
            _ => {}
        }
        Some(out)
    }
}
