//! Identifier extraction and normalization.
//!
//! Pulls OCLC, LCCN, ISSN, ISBN, and SuDoc numbers out of a bibliographic
//! record under fixed field rules, validates check digits where the scheme
//! has them, and resolves alleged OCLC numbers against the deduplication
//! authority table. Values that fail validation are dropped (or, for
//! SuDocs, bucketed as invalid) with a debug log; extraction itself never
//! fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::marc::BibRecord;

/// Authoritative OCLC duplicate-number mapping. Unresolved numbers pass
/// through unchanged.
#[derive(Debug, Clone, Default)]
pub struct OclcAuthority {
    map: HashMap<u64, u64>,
}

impl OclcAuthority {
    pub fn new(pairs: impl IntoIterator<Item = (u64, u64)>) -> Self {
        Self {
            map: pairs.into_iter().collect(),
        }
    }

    pub fn resolve(&self, alleged: u64) -> u64 {
        self.map.get(&alleged).copied().unwrap_or(alleged)
    }
}

/// Physical carrier of the described item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierFormat {
    Print,
    Microform,
    Electronic,
}

impl CarrierFormat {
    fn from_record(record: &BibRecord) -> Self {
        match record.control("007").and_then(|v| v.chars().next()) {
            Some('h') => CarrierFormat::Microform,
            Some('c') => CarrierFormat::Electronic,
            _ => CarrierFormat::Print,
        }
    }
}

/// Institutions whose exports carry OCLC numbers in a local field instead
/// of 001/035. Values from these fields get an extra digit-count sanity
/// cap; local fields accumulate enough junk that a bare numeric test is
/// not sufficient.
const ALT_OCLC_FIELDS: &[(&str, &str, char)] = &[("COO", "906", 'a'), ("NYP", "959", 'a')];

const MAX_ALT_OCLC_DIGITS: usize = 8;

/// Everything §identifier extraction derives from one record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identifiers {
    /// OCLC numbers as found, before authority resolution.
    pub oclcs_alleged: Vec<u64>,
    /// Authority-resolved OCLC numbers.
    pub oclcs: Vec<u64>,
    pub lccns: Vec<String>,
    pub issns: Vec<String>,
    pub isbns: Vec<String>,
    pub sudocs: Vec<String>,
    /// 086 values that could not be confidently placed either way.
    pub invalid_sudocs: Vec<String>,
    /// 086 values explicitly marked as some other classification scheme.
    pub non_sudocs: Vec<String>,
    pub format: Option<CarrierFormat>,
}

impl Identifiers {
    pub fn extract(record: &BibRecord, institution: &str, authority: &OclcAuthority) -> Self {
        let mut out = Identifiers {
            format: Some(CarrierFormat::from_record(record)),
            ..Identifiers::default()
        };
        out.extract_oclcs(record, institution, authority);
        out.extract_lccns(record);
        out.extract_issns(record);
        out.extract_isbns(record);
        out.extract_sudocs(record);
        out
    }

    fn extract_oclcs(&mut self, record: &BibRecord, institution: &str, authority: &OclcAuthority) {
        // 001 is an OCLC number when 003 says so or the value carries an
        // OCLC prefix (ocm/ocn/on).
        if let Some(v001) = record.control("001") {
            let prefixed = oclc_digits(v001);
            let oclc_source = record.control("003").map_or(false, |s| s.trim() == "OCoLC");
            if oclc_source || v001.trim() != prefixed {
                if let Ok(n) = prefixed.parse::<u64>() {
                    self.oclcs_alleged.push(n);
                }
            }
        }

        for field in record.fields("035") {
            for value in field.subfields('a') {
                if let Some(rest) = value.trim().strip_prefix("(OCoLC)") {
                    if let Ok(n) = oclc_digits(rest).parse::<u64>() {
                        self.oclcs_alleged.push(n);
                    }
                }
            }
        }

        for (inst, tag, code) in ALT_OCLC_FIELDS {
            if *inst != institution {
                continue;
            }
            for field in record.fields(tag) {
                for value in field.subfields(*code) {
                    let digits = oclc_digits(value);
                    if digits.is_empty() || digits.len() > MAX_ALT_OCLC_DIGITS {
                        debug!(institution, tag, value, "implausible alternate-field OCLC");
                        continue;
                    }
                    if let Ok(n) = digits.parse::<u64>() {
                        self.oclcs_alleged.push(n);
                    }
                }
            }
        }

        self.oclcs_alleged.sort_unstable();
        self.oclcs_alleged.dedup();
        self.oclcs = self
            .oclcs_alleged
            .iter()
            .map(|n| authority.resolve(*n))
            .collect();
        self.oclcs.sort_unstable();
        self.oclcs.dedup();
    }

    fn extract_lccns(&mut self, record: &BibRecord) {
        for field in record.fields("010") {
            for value in field.subfields('a') {
                if let Some(n) = normalize_lccn(value) {
                    push_unique(&mut self.lccns, n);
                }
            }
        }
    }

    fn extract_issns(&mut self, record: &BibRecord) {
        for field in record.fields("022") {
            for value in field.subfields('a') {
                match normalize_issn(value) {
                    Some(n) => push_unique(&mut self.issns, n),
                    None => debug!(value, "ISSN failed check digit"),
                }
            }
        }
        // "Other physical form" cross references carry the same work's
        // ISSN under $x.
        for field in record.fields("776") {
            for value in field.subfields('x') {
                if let Some(n) = normalize_issn(value) {
                    push_unique(&mut self.issns, n);
                }
            }
        }
    }

    fn extract_isbns(&mut self, record: &BibRecord) {
        for field in record.fields("020") {
            for value in field.subfields('a') {
                match normalize_isbn(value) {
                    Some(n) => push_unique(&mut self.isbns, n),
                    None => debug!(value, "ISBN failed check digit"),
                }
            }
        }
        for field in record.fields("776") {
            for value in field.subfields('z') {
                if let Some(n) = normalize_isbn(value) {
                    push_unique(&mut self.isbns, n);
                }
            }
        }
    }

    fn extract_sudocs(&mut self, record: &BibRecord) {
        for field in record.fields("086") {
            let scheme = field.subfield('2').map(str::trim);
            for value in field.subfields('a') {
                let value = value.trim().to_string();
                if value.is_empty() {
                    continue;
                }
                match (field.ind1, scheme) {
                    // An explicit non-SuDoc scheme wins over indicators.
                    (_, Some(s)) if s != "sudocs" => self.non_sudocs.push(value),
                    ('0', _) | (_, Some("sudocs")) => self.sudocs.push(value),
                    ('1', _) => self.non_sudocs.push(value),
                    // Unmarked and unindicated: keep, but do not trust.
                    _ => {
                        debug!(value, "086 with no scheme signal");
                        self.invalid_sudocs.push(value);
                    }
                }
            }
        }
        for list in [
            &mut self.sudocs,
            &mut self.non_sudocs,
            &mut self.invalid_sudocs,
        ] {
            list.sort();
            list.dedup();
        }
    }
}

/// Strip OCLC prefixes and leading zeros, keeping only digits.
fn oclc_digits(value: &str) -> String {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("ocm")
        .or_else(|| trimmed.strip_prefix("ocn"))
        .or_else(|| trimmed.strip_prefix("on"))
        .unwrap_or(trimmed);
    rest.trim_start_matches('0')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}

/// LCCN normalization: drop spaces, cut revision suffixes ("/r84").
fn normalize_lccn(value: &str) -> Option<String> {
    let cut = value.split('/').next().unwrap_or(value);
    let compact: String = cut.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        None
    } else {
        Some(compact)
    }
}

/// ISSN check-digit validation (mod 11, X = 10). Returns hyphenated form.
fn normalize_issn(value: &str) -> Option<String> {
    let compact: String = value
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect();
    if compact.len() != 8 {
        return None;
    }
    let mut sum = 0u32;
    for (i, c) in compact.chars().enumerate() {
        let digit = match c {
            'X' | 'x' if i == 7 => 10,
            c => c.to_digit(10)?,
        };
        sum += digit * (8 - i as u32);
    }
    if sum % 11 != 0 {
        return None;
    }
    let upper = compact.to_ascii_uppercase();
    Some(format!("{}-{}", &upper[..4], &upper[4..]))
}

/// ISBN-10 or ISBN-13 check-digit validation. Returns the compact form.
fn normalize_isbn(value: &str) -> Option<String> {
    let token = value.trim().split_whitespace().next()?;
    let compact: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect();
    match compact.len() {
        10 => {
            let mut sum = 0u32;
            for (i, c) in compact.chars().enumerate() {
                let digit = match c {
                    'X' | 'x' if i == 9 => 10,
                    c => c.to_digit(10)?,
                };
                sum += digit * (10 - i as u32);
            }
            (sum % 11 == 0).then(|| compact.to_ascii_uppercase())
        }
        13 => {
            let mut sum = 0u32;
            for (i, c) in compact.chars().enumerate() {
                let digit = c.to_digit(10)?;
                sum += digit * if i % 2 == 0 { 1 } else { 3 };
            }
            (sum % 10 == 0).then_some(compact)
        }
        _ => None,
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
