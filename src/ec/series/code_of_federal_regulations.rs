//! Code of Federal Regulations.
//!
//! Enumerated by title, subdivided into parts, revised annually; the same
//! title/part recurs every year, so the revision year is part of issue
//! identity:
//! - "TITLE 26:PT. 1 (1998)"
//! - "T. 40:PT. 100-135 (1990)"

use crate::ec::features::Feature;
use crate::ec::grammar::{Preprocessor, SeriesGrammar};
use crate::ec::pattern::PatternSet;
use crate::ec::tokens::{PART, PART_RANGE, SEP, YEAR};
use crate::error::GrammarBuildError;

const NAME: &str = "Code of Federal Regulations";
const CANONICAL: &[Feature] = &[
    Feature::Volume,
    Feature::Part,
    Feature::StartPart,
    Feature::EndPart,
    Feature::Year,
];

/// CFR titles are written "TITLE 26" or "T. 26"; they map onto the volume
/// feature.
const TITLE: &str = r"T(?:ITLE)?\.?\s*(?P<volume>\d{1,2})";

pub struct CodeOfFederalRegulations {
    preprocessor: Preprocessor,
    patterns: PatternSet,
}

impl CodeOfFederalRegulations {
    pub fn build() -> Result<Self, GrammarBuildError> {
        let sources = vec![
            format!(r"{TITLE}{SEP}{PART_RANGE}\s*\({YEAR}\)"),
            format!(r"{TITLE}{SEP}{PART}\s*\({YEAR}\)"),
            format!(r"{TITLE}{SEP}{PART_RANGE}"),
            format!(r"{TITLE}{SEP}{PART}"),
            format!(r"{TITLE}\s*\({YEAR}\)"),
            TITLE.to_string(),
            format!(r"\(?{YEAR}\)?"),
        ];
        Ok(Self {
            preprocessor: Preprocessor::build(NAME)?,
            patterns: PatternSet::compile(NAME, &sources)?,
        })
    }
}

impl SeriesGrammar for CodeOfFederalRegulations {
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
        &[2786662, 33953490]
    }

    fn sudoc_prefixes(&self) -> &[&'static str] {
        &["AE 2.106/3:", "GS 4.108:"]
    }

    fn canonical_order(&self) -> &[Feature] {
        CANONICAL
    }

    // Part ranges bind consecutive parts of one title into one physical
    // volume; they are not enumerable issues, so the default single-entry
    // explode stands.
}
