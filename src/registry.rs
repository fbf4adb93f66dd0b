//! Registry clustering and cluster lifecycle.
//!
//! A [`RegistryRecord`] is the deduplicated cluster: every institution's
//! holding of one issue of one serial. Clusters are found by EC hash plus
//! shared identifiers, mutated by add-source and recollate, and end their
//! lives deprecated, optionally naming successors. Deprecation is
//! monotonic: no operation revives a deprecated cluster, and lookups never
//! return one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ec::series::Series;
use crate::error::RegistryError;
use crate::pipeline::EnumChron;
use crate::source::{Deprecation, SourceRecord};
use crate::store::RegistryStore;

/// Identifier types in clustering priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentifierKind {
    Oclc,
    Lccn,
    Isbn,
    Issn,
    SuDoc,
}

const CLUSTERING_PRIORITY: &[IdentifierKind] = &[
    IdentifierKind::Oclc,
    IdentifierKind::Lccn,
    IdentifierKind::Isbn,
    IdentifierKind::Issn,
    IdentifierKind::SuDoc,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub id: Uuid,
    /// Member source ids; non-empty and unique, kept sorted.
    pub members: Vec<Uuid>,
    pub oclcs: Vec<u64>,
    pub lccns: Vec<String>,
    pub isbns: Vec<String>,
    pub issns: Vec<String>,
    pub sudocs: Vec<String>,
    pub series: Option<Series>,
    /// Canonical EC display value; `None` for raw-passthrough clusters.
    pub canonical_ec: Option<String>,
    /// EC hash keying this cluster to one physical issue.
    pub ec_hash: String,
    /// Suppressed clusters are hidden from clustering candidate lookups and
    /// attract no new members; existing memberships are still maintained.
    pub suppressed: bool,
    pub deprecated: Option<Deprecation>,
    pub ancestors: Vec<Uuid>,
    pub successors: Vec<Uuid>,
    pub created: DateTime<Utc>,
}

impl RegistryRecord {
    fn empty(ec: &EnumChron) -> Self {
        Self {
            id: Uuid::new_v4(),
            members: Vec::new(),
            oclcs: Vec::new(),
            lccns: Vec::new(),
            isbns: Vec::new(),
            issns: Vec::new(),
            sudocs: Vec::new(),
            series: None,
            canonical_ec: ec.canonical.clone(),
            ec_hash: ec.key.clone(),
            suppressed: false,
            deprecated: None,
            ancestors: Vec::new(),
            successors: Vec::new(),
            created: Utc::now(),
        }
    }

    /// A fresh single-member cluster for one source's EC entry.
    pub fn for_source(source: &SourceRecord, ec: &EnumChron) -> Self {
        let mut rec = Self::empty(ec);
        rec.members.push(source.id);
        rec.absorb(source);
        rec
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    /// Structural invariants checked before every persist.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.members.is_empty() {
            return Err(RegistryError::EmptyCluster(self.id));
        }
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), RegistryError> {
        match &self.deprecated {
            Some(d) => Err(RegistryError::DeprecatedCluster {
                id: self.id,
                reason: d.reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Typed per-field merge of one source's extracted fields: list fields
    /// union and dedupe, scalar fields overwrite when the source has a
    /// value.
    fn absorb(&mut self, source: &SourceRecord) {
        let ids = &source.identifiers;
        union(&mut self.oclcs, &ids.oclcs);
        union(&mut self.lccns, &ids.lccns);
        union(&mut self.isbns, &ids.isbns);
        union(&mut self.issns, &ids.issns);
        union(&mut self.sudocs, &ids.sudocs);
        if source.series.is_some() {
            self.series = source.series;
        }
    }

    /// Recompute every aggregated field from current membership.
    fn recollate_from(&mut self, sources: &[SourceRecord]) {
        self.oclcs.clear();
        self.lccns.clear();
        self.isbns.clear();
        self.issns.clear();
        self.sudocs.clear();
        self.series = None;
        for source in sources {
            self.absorb(source);
        }
    }
}

fn union<T: Ord + Clone>(into: &mut Vec<T>, from: &[T]) {
    into.extend_from_slice(from);
    into.sort();
    into.dedup();
}

/// One group of a split: which members leave together, and the EC identity
/// of the cluster they form.
pub struct SplitGroup {
    pub members: Vec<Uuid>,
    pub ec: EnumChron,
}

/// The lifecycle engine over a backing store.
///
/// Mutations are read-then-write with no optimistic-concurrency check;
/// callers serialize writes per cluster.
pub struct Registry<S: RegistryStore> {
    store: S,
}

impl<S: RegistryStore> Registry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Find the cluster for one of a source's EC entries.
    ///
    /// Candidates share the EC hash and are not deprecated; identifier
    /// types are tried in fixed priority (OCLC, LCCN, ISBN, ISSN, SuDoc)
    /// and the first candidate sharing an identifier of the current type
    /// wins. `None` means the caller creates a new cluster.
    pub fn cluster(&self, source: &SourceRecord, ec_hash: &str) -> Option<Uuid> {
        let candidates = self.store.active_by_ec(ec_hash);
        for kind in CLUSTERING_PRIORITY {
            for candidate in &candidates {
                if shares_identifier(*kind, candidate, source) {
                    return Some(candidate.id);
                }
            }
        }
        None
    }

    /// Add a source to a cluster.
    ///
    /// Re-adding an existing member recollates instead: its earlier
    /// contributions may be stale and cannot be subtracted incrementally.
    pub fn add_source(&mut self, id: Uuid, source_id: Uuid) -> Result<(), RegistryError> {
        let record = self.store.record(id)?;
        record.ensure_active()?;
        if record.members.contains(&source_id) {
            return self.recollate(id);
        }
        let source = self.store.source(source_id)?;
        let mut record = record;
        record.members.push(source_id);
        record.members.sort();
        record.absorb(&source);
        self.store.save(record)
    }

    /// Recompute a cluster's aggregated fields from current membership.
    pub fn recollate(&mut self, id: Uuid) -> Result<(), RegistryError> {
        let mut record = self.store.record(id)?;
        record.ensure_active()?;
        let sources = record
            .members
            .iter()
            .map(|m| self.store.source(*m))
            .collect::<Result<Vec<_>, _>>()?;
        record.recollate_from(&sources);
        self.store.save(record)
    }

    /// Partition a cluster into new clusters, one per group.
    ///
    /// Each new cluster names the original as ancestor; the original is
    /// deprecated naming all of them as successors.
    pub fn split(
        &mut self,
        id: Uuid,
        groups: Vec<SplitGroup>,
        reason: &str,
    ) -> Result<Vec<Uuid>, RegistryError> {
        if groups.is_empty() {
            return Err(RegistryError::EmptySplit);
        }
        let record = self.store.record(id)?;
        record.ensure_active()?;

        // Build and validate every group before the first persist; a bad
        // group must abort with the store untouched, not leave half the
        // successors saved alongside a still-active original.
        let mut fresh_records = Vec::with_capacity(groups.len());
        for group in groups {
            if let Some(foreign) = group
                .members
                .iter()
                .copied()
                .find(|m| !record.members.contains(m))
            {
                return Err(RegistryError::ForeignSplitMember {
                    cluster: id,
                    source: foreign,
                });
            }
            let sources = group
                .members
                .iter()
                .map(|m| self.store.source(*m))
                .collect::<Result<Vec<_>, _>>()?;
            let mut fresh = RegistryRecord::empty(&group.ec);
            fresh.members = group.members;
            fresh.members.sort();
            fresh.members.dedup();
            fresh.recollate_from(&sources);
            fresh.ancestors.push(id);
            fresh.validate()?;
            fresh_records.push(fresh);
        }

        let mut new_ids = Vec::with_capacity(fresh_records.len());
        for fresh in fresh_records {
            new_ids.push(fresh.id);
            self.store.save(fresh)?;
        }
        info!(cluster = %id, into = new_ids.len(), reason, "split cluster");
        self.deprecate(id, reason, new_ids.clone())?;
        Ok(new_ids)
    }

    /// Union several clusters into one new cluster.
    ///
    /// Every input is deprecated naming the new cluster as sole successor;
    /// the new cluster names all inputs as ancestors.
    pub fn merge(
        &mut self,
        ids: &[Uuid],
        ec: &EnumChron,
        reason: &str,
    ) -> Result<Uuid, RegistryError> {
        // The same id listed twice is still one input cluster.
        let mut ids = ids.to_vec();
        ids.sort();
        ids.dedup();
        if ids.len() < 2 {
            return Err(RegistryError::DegenerateMerge(ids.len()));
        }
        let mut inputs = Vec::with_capacity(ids.len());
        for id in &ids {
            let record = self.store.record(*id)?;
            record.ensure_active()?;
            inputs.push(record);
        }

        let mut fresh = RegistryRecord::empty(ec);
        for input in &inputs {
            union(&mut fresh.members, &input.members);
            fresh.ancestors.push(input.id);
        }
        let sources = fresh
            .members
            .iter()
            .map(|m| self.store.source(*m))
            .collect::<Result<Vec<_>, _>>()?;
        fresh.recollate_from(&sources);
        let new_id = fresh.id;
        self.store.save(fresh)?;
        info!(into = %new_id, from = ids.len(), reason, "merged clusters");
        for id in &ids {
            self.deprecate(*id, reason, vec![new_id])?;
        }
        Ok(new_id)
    }

    /// Set or clear a cluster's suppression flag. Suppressed clusters stop
    /// attracting new members but keep their existing ones; unlike
    /// deprecation this is reversible.
    pub fn set_suppressed(&mut self, id: Uuid, suppressed: bool) -> Result<(), RegistryError> {
        let mut record = self.store.record(id)?;
        record.ensure_active()?;
        record.suppressed = suppressed;
        self.store.save(record)
    }

    /// Deprecate a cluster. Terminal and idempotent in effect: a second
    /// deprecation is a no-op and the first reason stands.
    pub fn deprecate(
        &mut self,
        id: Uuid,
        reason: &str,
        successors: Vec<Uuid>,
    ) -> Result<(), RegistryError> {
        let mut record = self.store.record(id)?;
        if record.is_deprecated() {
            return Ok(());
        }
        warn!(cluster = %id, reason, "deprecating cluster");
        record.deprecated = Some(Deprecation::now(reason));
        for s in successors {
            if !record.successors.contains(&s) {
                record.successors.push(s);
            }
        }
        self.store.save(record)
    }

    /// Reconcile a source's freshly computed EC set against its cluster
    /// memberships. Returns the source's active cluster ids afterwards.
    ///
    /// New ECs look up or create a cluster. Vanished ECs remove the source:
    /// a sole-member cluster is deprecated outright, a multi-member cluster
    /// is replaced by a new cluster over the remaining members with the old
    /// one deprecated naming the replacement as successor.
    pub fn reconcile(&mut self, source_id: Uuid) -> Result<Vec<Uuid>, RegistryError> {
        let source = self.store.source(source_id)?;
        let memberships = self.store.clusters_of(source_id);
        let fresh_keys: Vec<&str> = source.enum_chrons.iter().map(|e| e.key.as_str()).collect();

        let mut active = Vec::new();
        for ec in &source.enum_chrons {
            if memberships.iter().any(|m| m.ec_hash == ec.key) {
                continue;
            }
            match self.cluster(&source, &ec.key) {
                Some(id) => {
                    self.add_source(id, source_id)?;
                    active.push(id);
                }
                None => {
                    let fresh = RegistryRecord::for_source(&source, ec);
                    let id = fresh.id;
                    self.store.save(fresh)?;
                    active.push(id);
                }
            }
        }

        for membership in memberships {
            if fresh_keys.contains(&membership.ec_hash.as_str()) {
                active.push(membership.id);
                continue;
            }
            let remaining: Vec<Uuid> = membership
                .members
                .iter()
                .copied()
                .filter(|m| *m != source_id)
                .collect();
            if remaining.is_empty() {
                self.deprecate(membership.id, "holding withdrawn", Vec::new())?;
            } else {
                let sources = remaining
                    .iter()
                    .map(|m| self.store.source(*m))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut replacement = RegistryRecord {
                    id: Uuid::new_v4(),
                    members: remaining,
                    ancestors: vec![membership.id],
                    created: Utc::now(),
                    successors: Vec::new(),
                    deprecated: None,
                    ..membership.clone()
                };
                replacement.recollate_from(&sources);
                let new_id = replacement.id;
                self.store.save(replacement)?;
                self.deprecate(membership.id, "holding withdrawn", vec![new_id])?;
            }
        }
        active.sort();
        active.dedup();
        Ok(active)
    }
}

fn shares_identifier(kind: IdentifierKind, record: &RegistryRecord, source: &SourceRecord) -> bool {
    let ids = &source.identifiers;
    match kind {
        IdentifierKind::Oclc => ids.oclcs.iter().any(|n| record.oclcs.contains(n)),
        IdentifierKind::Lccn => ids.lccns.iter().any(|v| record.lccns.contains(v)),
        IdentifierKind::Isbn => ids.isbns.iter().any(|v| record.isbns.contains(v)),
        IdentifierKind::Issn => ids.issns.iter().any(|v| record.issns.contains(v)),
        IdentifierKind::SuDoc => ids.sudocs.iter().any(|v| record.sudocs.contains(v)),
    }
}
