//! Backing store for source and registry records.
//!
//! The store is document-oriented: records are queried by id, by EC hash,
//! and by member containment. [`InMemoryStore`] is the standard
//! implementation for batch runs and tests; a persistent backend
//! implements the same trait.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::RegistryError;
use crate::registry::RegistryRecord;
use crate::source::SourceRecord;

pub trait RegistryStore {
    fn save_source(&mut self, source: SourceRecord) -> Result<(), RegistryError>;

    fn source(&self, id: Uuid) -> Result<SourceRecord, RegistryError>;

    /// Persist a registry record. Implementations must reject records that
    /// fail [`RegistryRecord::validate`], empty membership above all.
    fn save(&mut self, record: RegistryRecord) -> Result<(), RegistryError>;

    fn record(&self, id: Uuid) -> Result<RegistryRecord, RegistryError>;

    /// Non-deprecated, non-suppressed records with the given EC hash, in
    /// creation order. This is the clustering candidate set; suppressed
    /// clusters are excluded so they attract no new members.
    fn active_by_ec(&self, ec_hash: &str) -> Vec<RegistryRecord>;

    /// Non-deprecated records counting the given source as a member.
    fn clusters_of(&self, source_id: Uuid) -> Vec<RegistryRecord>;
}

#[derive(Default)]
pub struct InMemoryStore {
    sources: BTreeMap<Uuid, SourceRecord>,
    records: BTreeMap<Uuid, RegistryRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every registry record, deprecated included. Test and report use.
    pub fn all_records(&self) -> impl Iterator<Item = &RegistryRecord> {
        self.records.values()
    }
}

impl RegistryStore for InMemoryStore {
    fn save_source(&mut self, source: SourceRecord) -> Result<(), RegistryError> {
        self.sources.insert(source.id, source);
        Ok(())
    }

    fn source(&self, id: Uuid) -> Result<SourceRecord, RegistryError> {
        self.sources
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UnknownSource(id))
    }

    fn save(&mut self, record: RegistryRecord) -> Result<(), RegistryError> {
        record.validate()?;
        self.records.insert(record.id, record);
        Ok(())
    }

    fn record(&self, id: Uuid) -> Result<RegistryRecord, RegistryError> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UnknownRecord(id))
    }

    fn active_by_ec(&self, ec_hash: &str) -> Vec<RegistryRecord> {
        let mut out: Vec<RegistryRecord> = self
            .records
            .values()
            .filter(|r| !r.is_deprecated() && !r.suppressed && r.ec_hash == ec_hash)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        out
    }

    fn clusters_of(&self, source_id: Uuid) -> Vec<RegistryRecord> {
        let mut out: Vec<RegistryRecord> = self
            .records
            .values()
            .filter(|r| !r.is_deprecated() && r.members.contains(&source_id))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        out
    }
}
