//! Statistical Abstract of the United States.
//!
//! Enumerated by edition ("105TH ED."), one edition per year; the
//! embedded table derives the missing half of the edition/year pair.

use std::collections::BTreeMap;

use crate::ec::features::{Feature, FeatureMap};
use crate::ec::grammar::{default_postprocess, Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{EDITION, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Statistical Abstract of the United States";
const CANONICAL: &[Feature] = &[Feature::Edition, Feature::Year];

const EDITION_YEARS: &str = include_str!("data/statistical_abstract_editions.json");

pub struct StatisticalAbstract {
    preprocessor: Preprocessor,
    patterns: PatternSet,
    edition_to_year: BTreeMap<u32, u32>,
    year_to_edition: BTreeMap<u32, u32>,
}

impl StatisticalAbstract {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let edition_to_year: BTreeMap<u32, u32> = serde_json::from_str(EDITION_YEARS)
            .map_err(|source| GrammarBuildError::Table { series: NAME, source })?;
        let year_to_edition = edition_to_year.iter().map(|(e, y)| (*y, *e)).collect();

        let sources = vec![
            format!(r"{EDITION}\s*\({YEAR}\)"),
            EDITION.to_string(),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
            edition_to_year,
            year_to_edition,
        })
    }
}

impl SeriesGrammar for StatisticalAbstract {
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
        &[1193890, 9060662]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["C 3.134:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    fn postprocess(&self, features: FeatureMap) -> Option<FeatureMap> {
        let mut out = default_postprocess(features)?;

        match (out.get(Feature::Edition), out.get(Feature::Year)) {
            (Some(ed), None) => {
                if let Some(year) = ed.parse().ok().and_then(|e: u32| self.edition_to_year.get(&e))
                {
                    out = out.with(Feature::Year, year.to_string());
                }
            }
            (None, Some(year)) => {
                if let Some(ed) = year.parse().ok().and_then(|y: u32| self.year_to_edition.get(&y))
                {
                    out = out.with(Feature::Edition, ed.to_string());
                }
            }
            (Some(ed), Some(year)) => {
                // Edition and year both given; when the table disagrees the
                // parse is contradictory.
                if let (Ok(e), Ok(y)) = (ed.parse::<u32>(), year.parse::<u32>()) {
                    if self.edition_to_year.get(&e).is_some_and(|known| *known != y) {
                        return None;
                    }
                }
            }
            (None, None) => {}
        }
        Some(out)
    }
}
