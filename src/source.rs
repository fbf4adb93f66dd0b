//! One institution's holding record.
//!
//! A [`SourceRecord`] owns everything derived from its bibliographic blob:
//! extracted identifiers, classified series, raw EC strings, and the
//! computed enum_chrons set. Reassigning the blob recomputes all of it
//! from scratch, so reprocessing identical input is idempotent. Records
//! are never hard-deleted; deprecation records a reason and timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::classifier::SeriesClassifier;
use crate::ec::series::{Grammars, Series};
use crate::error::{BibError, GrammarBuildError};
use crate::identifiers::{Identifiers, OclcAuthority};
use crate::marc::BibRecord;
use crate::pipeline::{compute_enum_chrons, EnumChron};

/// Soft-delete marker shared by source and registry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl Deprecation {
    pub fn now(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Immutable reference tables shared by every record computation.
///
/// Built once at process start; safe to share read-only across workers.
pub struct ProcessingContext {
    grammars: Grammars,
    authority: OclcAuthority,
}

impl ProcessingContext {
    pub fn new(authority: OclcAuthority) -> Result<Self, GrammarBuildError> {
        Ok(Self {
            grammars: Grammars::build()?,
            authority,
        })
    }

    pub fn grammars(&self) -> &Grammars {
        &self.grammars
    }

    pub fn authority(&self) -> &OclcAuthority {
        &self.authority
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: Uuid,
    pub institution: String,
    pub identifiers: Identifiers,
    pub series: Option<Series>,
    pub raw_ecs: Vec<String>,
    pub enum_chrons: Vec<EnumChron>,
    pub deprecated: Option<Deprecation>,
}

impl SourceRecord {
    /// Ingest a bibliographic blob as a new record.
    pub fn from_blob(
        ctx: &ProcessingContext,
        institution: &str,
        blob: &Value,
    ) -> Result<Self, BibError> {
        let mut record = SourceRecord {
            id: Uuid::new_v4(),
            institution: institution.to_string(),
            identifiers: Identifiers::default(),
            series: None,
            raw_ecs: Vec::new(),
            enum_chrons: Vec::new(),
            deprecated: None,
        };
        record.assign_blob(ctx, blob)?;
        Ok(record)
    }

    /// Recompute identifiers, series, and the EC set from a blob.
    ///
    /// A full recompute every time: partial updates would leave stale
    /// derived values behind. Identical input produces identical output.
    pub fn assign_blob(&mut self, ctx: &ProcessingContext, blob: &Value) -> Result<(), BibError> {
        let bib = BibRecord::from_json(blob)?;
        self.identifiers = Identifiers::extract(&bib, &self.institution, ctx.authority());
        self.series = SeriesClassifier::new(ctx.grammars())
            .classify(&self.identifiers.oclcs, &self.identifiers.sudocs);
        self.raw_ecs = extract_raw_ecs(&bib);
        self.enum_chrons = compute_enum_chrons(ctx.grammars(), self.series, &self.raw_ecs);
        Ok(())
    }

    /// Hash keys of the computed EC set, the record's clustering identities.
    pub fn ec_keys(&self) -> Vec<String> {
        self.enum_chrons.iter().map(|e| e.key.clone()).collect()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    /// Soft-delete. Idempotent in effect: the first deprecation sticks.
    pub fn deprecate(&mut self, reason: &str) {
        if self.deprecated.is_none() {
            info!(id = %self.id, reason, "deprecating source record");
            self.deprecated = Some(Deprecation::now(reason));
        }
    }
}

/// Raw EC strings live in the holdings fields: 866/867/868 $a (textual
/// holdings) and 852 $3 (materials specified).
fn extract_raw_ecs(bib: &BibRecord) -> Vec<String> {
    let mut out = Vec::new();
    for tag in ["866", "867", "868"] {
        for field in bib.fields(tag) {
            for value in field.subfields('a') {
                out.push(value.to_string());
            }
        }
    }
    for field in bib.fields("852") {
        for value in field.subfields('3') {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fr_blob() -> Value {
        json!({
            "leader": "00000cas a2200000 a 4500",
            "fields": [
                {"001": "ocm01768512"},
                {"866": {"ind1": "4", "ind2": "1",
                         "subfields": [{"a": "V. 48:NO. 4 (1983:JAN. 6)"}]}},
                {"852": {"ind1": "0", "ind2": " ",
                         "subfields": [{"b": "gov"}, {"3": "V. 48:NO. 5"}]}}
            ]
        })
    }

    fn ctx() -> ProcessingContext {
        ProcessingContext::new(OclcAuthority::default()).unwrap()
    }

    #[test]
    fn ingestion_extracts_classifies_and_computes() {
        let ctx = ctx();
        let rec = SourceRecord::from_blob(&ctx, "COO", &fr_blob()).unwrap();
        assert_eq!(rec.identifiers.oclcs, vec![1768512]);
        assert_eq!(rec.series, Some(Series::FederalRegister));
        assert_eq!(rec.raw_ecs.len(), 2);
        assert_eq!(rec.enum_chrons.len(), 2);
        assert!(rec
            .enum_chrons
            .iter()
            .any(|e| e.canonical.as_deref() == Some("Volume:48, Number:4")));
    }

    #[test]
    fn reassignment_is_idempotent() {
        let ctx = ctx();
        let mut rec = SourceRecord::from_blob(&ctx, "COO", &fr_blob()).unwrap();
        let before = rec.enum_chrons.clone();
        rec.assign_blob(&ctx, &fr_blob()).unwrap();
        assert_eq!(rec.enum_chrons, before);
    }

    #[test]
    fn reassignment_replaces_stale_state() {
        let ctx = ctx();
        let mut rec = SourceRecord::from_blob(&ctx, "COO", &fr_blob()).unwrap();
        let plain = json!({
            "leader": "00000cas a2200000 a 4500",
            "fields": [{"001": "12345"}]
        });
        rec.assign_blob(&ctx, &plain).unwrap();
        assert!(rec.identifiers.oclcs.is_empty());
        assert_eq!(rec.series, None);
        // No EC strings at all: the single no-enumeration entry.
        assert_eq!(rec.enum_chrons.len(), 1);
        assert!(rec.enum_chrons[0].features.is_empty());
    }

    #[test]
    fn deprecation_keeps_the_first_reason() {
        let ctx = ctx();
        let mut rec = SourceRecord::from_blob(&ctx, "COO", &fr_blob()).unwrap();
        rec.deprecate("duplicate upload");
        rec.deprecate("second reason");
        assert_eq!(rec.deprecated.as_ref().unwrap().reason, "duplicate upload");
    }
}
