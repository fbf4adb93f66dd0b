//! Series classification from resolved identifiers.
//!
//! Each grammar declares the OCLC numbers and SuDoc stem prefixes that
//! identify its serial; classification walks the grammars in the fixed
//! [`Series::ALL`] priority order and returns the first whose predicate
//! holds. A record matching no predicate stays unclassified and its EC
//! strings pass through unparsed.

use tracing::debug;

use crate::ec::series::{Grammars, Series};

pub struct SeriesClassifier<'a> {
    grammars: &'a Grammars,
}

impl<'a> SeriesClassifier<'a> {
    pub fn new(grammars: &'a Grammars) -> Self {
        Self { grammars }
    }

    /// Resolve a record's identifiers to a series, or `None`.
    ///
    /// A grammar matches when the resolved OCLC set intersects its
    /// allowlist, or when any held SuDoc number starts with one of its
    /// declared stem prefixes. First match in priority order wins.
    pub fn classify(&self, oclcs: &[u64], sudocs: &[String]) -> Option<Series> {
        for (series, grammar) in self.grammars.iter() {
            let by_oclc = oclcs.iter().any(|n| grammar.oclc_allowlist().contains(n));
            let by_sudoc = sudocs
                .iter()
                .any(|s| grammar.sudoc_prefixes().iter().any(|p| s.starts_with(p)));
            if by_oclc || by_sudoc {
                debug!(?series, by_oclc, by_sudoc, "classified");
                return Some(series);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammars() -> Grammars {
        Grammars::build().unwrap()
    }

    #[test]
    fn oclc_match_classifies() {
        let g = grammars();
        let c = SeriesClassifier::new(&g);
        assert_eq!(c.classify(&[1768512], &[]), Some(Series::FederalRegister));
    }

    #[test]
    fn sudoc_prefix_match_classifies() {
        let g = grammars();
        let c = SeriesClassifier::new(&g);
        assert_eq!(
            c.classify(&[], &["AE 2.106:48/4".to_string()]),
            Some(Series::FederalRegister)
        );
    }

    #[test]
    fn priority_resolves_double_matches_to_the_earlier_series() {
        let g = grammars();
        let c = SeriesClassifier::new(&g);
        // Serial Set OCLC plus a Federal Register SuDoc: Federal Register
        // sits earlier in the priority list and must win.
        let got = c.classify(&[3888071], &["AE 2.106:48/4".to_string()]);
        assert_eq!(got, Some(Series::FederalRegister));
    }

    #[test]
    fn no_signal_is_unclassified() {
        let g = grammars();
        let c = SeriesClassifier::new(&g);
        assert_eq!(c.classify(&[999_999_999], &["QA 76.5:".to_string()]), None);
    }
}
