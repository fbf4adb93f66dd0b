//! Grammar-quality measurement over raw EC corpora.
//!
//! Batch tooling runs a grammar against every raw string an institution
//! holds for a series and reports match/no-match counts plus the failing
//! strings; the failures drive grammar refinement.

use tracing::info;

use crate::ec::grammar::SeriesGrammar;

#[derive(Debug, Clone)]
pub struct ParseReport {
    pub series: &'static str,
    pub total: usize,
    pub matched: usize,
    /// Raw strings no pattern matched, in input order.
    pub failures: Vec<String>,
}

impl ParseReport {
    pub fn unmatched(&self) -> usize {
        self.failures.len()
    }

    /// Matched share in [0, 1]; 1.0 for an empty corpus.
    pub fn match_rate(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Run one grammar over a raw EC corpus.
pub fn measure<'a, G, I>(grammar: &G, raws: I) -> ParseReport
where
    G: SeriesGrammar + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut report = ParseReport {
        series: grammar.name(),
        total: 0,
        matched: 0,
        failures: Vec::new(),
    };
    for raw in raws {
        report.total += 1;
        if grammar.parse_ec(raw).is_some() {
            report.matched += 1;
        } else {
            report.failures.push(raw.to_string());
        }
    }
    info!(
        series = report.series,
        total = report.total,
        matched = report.matched,
        "measured grammar"
    );
    report
}
