//! Compiled pattern sets.
//!
//! A [`PatternSet`] is an ordered list of full-string-anchored regexes.
//! Order is a manually curated precedence rule: the first pattern whose
//! match spans the whole input wins, not the longest match. Sets are
//! compiled once in grammar constructors and shared by reference.

use regex::Regex;

use crate::ec::features::{Feature, FeatureMap};
use crate::error::GrammarBuildError;

pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Anchor and compile an ordered list of pattern sources.
    pub fn compile(
        series: &'static str,
        sources: &[String],
    ) -> Result<Self, GrammarBuildError> {
        let mut patterns = Vec::with_capacity(sources.len());
        for src in sources {
            let anchored = format!("^{src}$");
            let re = Regex::new(&anchored)
                .map_err(|source| GrammarBuildError::Pattern { series, source })?;
            patterns.push(re);
        }
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return the feature map of the first full-string match, or `None`.
    ///
    /// Unmatched optional groups and groups whose name is not a known
    /// feature wire name contribute nothing.
    pub fn first_match(&self, input: &str) -> Option<FeatureMap> {
        for re in &self.patterns {
            if let Some(caps) = re.captures(input) {
                let mut map = FeatureMap::new();
                for name in re.capture_names().flatten() {
                    if let (Some(feature), Some(m)) = (Feature::from_wire(name), caps.name(name)) {
                        map = map.with(feature, m.as_str());
                    }
                }
                return Some(map);
            }
        }
        None
    }
}
