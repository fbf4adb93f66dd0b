//! Clustering and lifecycle scenarios end to end.

use anyhow::Result;
use uuid::Uuid;

use govdoc_registry::ec::key_hash;
use govdoc_registry::identifiers::Identifiers;
use govdoc_registry::pipeline::EnumChron;
use govdoc_registry::registry::{Registry, RegistryRecord, SplitGroup};
use govdoc_registry::source::SourceRecord;
use govdoc_registry::store::{InMemoryStore, RegistryStore};
use govdoc_registry::{FeatureMap, RegistryError};

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ec(canonical: &str) -> EnumChron {
    EnumChron {
        key: key_hash(canonical),
        canonical: Some(canonical.to_string()),
        features: FeatureMap::new(),
        raw: canonical.to_string(),
    }
}

fn no_enumeration() -> EnumChron {
    EnumChron {
        key: key_hash(""),
        canonical: None,
        features: FeatureMap::new(),
        raw: String::new(),
    }
}

fn source(institution: &str, oclc: Option<u64>, lccn: Option<&str>, ecs: &[EnumChron]) -> SourceRecord {
    let mut identifiers = Identifiers::default();
    identifiers.oclcs = oclc.into_iter().collect();
    identifiers.oclcs_alleged = identifiers.oclcs.clone();
    identifiers.lccns = lccn.into_iter().map(String::from).collect();
    SourceRecord {
        id: Uuid::new_v4(),
        institution: institution.to_string(),
        identifiers,
        series: None,
        raw_ecs: ecs.iter().map(|e| e.raw.clone()).collect(),
        enum_chrons: ecs.to_vec(),
        deprecated: None,
    }
}

fn registry() -> Registry<InMemoryStore> {
    init_logs();
    Registry::new(InMemoryStore::new())
}

#[test]
fn shared_oclc_and_empty_ec_cluster_together() -> Result<()> {
    let mut registry = registry();
    let a = source("COO", Some(44_444), None, &[no_enumeration()]);
    let b = source("NYP", Some(44_444), None, &[no_enumeration()]);
    let (a_id, b_id) = (a.id, b.id);
    registry.store_mut().save_source(a)?;
    registry.store_mut().save_source(b)?;

    let a_clusters = registry.reconcile(a_id)?;
    let b_clusters = registry.reconcile(b_id)?;
    assert_eq!(a_clusters, b_clusters);

    let cluster = registry.store().record(a_clusters[0])?;
    assert_eq!(cluster.members.len(), 2);
    assert!(cluster.members.contains(&a_id) && cluster.members.contains(&b_id));
    assert_eq!(cluster.oclcs, vec![44_444]);
    Ok(())
}

#[test]
fn oclc_match_beats_lccn_match() -> Result<()> {
    let mut registry = registry();
    let issue = ec("Volume:48, Number:4");

    // One existing cluster shares only an LCCN with the probe, the other
    // only an OCLC. The OCLC cluster was created later, so creation order
    // cannot explain the result.
    let by_lccn = source("AAA", None, Some("sn78-123"), &[issue.clone()]);
    let by_oclc = source("BBB", Some(777), None, &[issue.clone()]);
    for s in [&by_lccn, &by_oclc] {
        registry.store_mut().save_source(s.clone())?;
    }
    registry.reconcile(by_lccn.id)?;
    registry.reconcile(by_oclc.id)?;

    let probe = source("CCC", Some(777), Some("sn78-123"), &[issue.clone()]);
    let chosen = registry.cluster(&probe, &issue.key).unwrap();
    let chosen = registry.store().record(chosen)?;
    assert_eq!(chosen.oclcs, vec![777]);
    assert!(chosen.lccns.is_empty());
    Ok(())
}

#[test]
fn empty_member_cluster_is_rejected() -> Result<()> {
    let mut registry = registry();
    let s = source("COO", Some(1), None, &[no_enumeration()]);
    let mut record = RegistryRecord::for_source(&s, &no_enumeration());
    record.members.clear();
    match registry.store_mut().save(record) {
        Err(RegistryError::EmptyCluster(_)) => Ok(()),
        other => panic!("expected EmptyCluster, got {other:?}"),
    }
}

#[test]
fn deprecated_clusters_never_cluster_again() -> Result<()> {
    let mut registry = registry();
    let issue = ec("Volume:1");
    let a = source("COO", Some(5), None, &[issue.clone()]);
    registry.store_mut().save_source(a.clone())?;
    let ids = registry.reconcile(a.id)?;
    let cluster_id = ids[0];

    registry.deprecate(cluster_id, "bad merge", Vec::new())?;
    // Idempotent in effect.
    registry.deprecate(cluster_id, "second reason", Vec::new())?;
    let rec = registry.store().record(cluster_id)?;
    assert_eq!(rec.deprecated.as_ref().unwrap().reason, "bad merge");

    let probe = source("NYP", Some(5), None, &[issue.clone()]);
    assert_eq!(registry.cluster(&probe, &issue.key), None);

    match registry.add_source(cluster_id, a.id) {
        Err(RegistryError::DeprecatedCluster { .. }) => Ok(()),
        other => panic!("expected DeprecatedCluster, got {other:?}"),
    }
}

#[test]
fn split_partitions_with_lineage() -> Result<()> {
    let mut registry = registry();
    let issue = ec("Year:1983");
    let members: Vec<SourceRecord> = (0..4)
        .map(|_| source("COO", Some(9), None, &[issue.clone()]))
        .collect();
    for m in &members {
        registry.store_mut().save_source(m.clone())?;
    }
    let mut original = RegistryRecord::for_source(&members[0], &issue);
    for m in &members[1..] {
        original.members.push(m.id);
    }
    original.members.sort();
    let original_id = original.id;
    registry.store_mut().save(original)?;

    let groups = vec![
        SplitGroup {
            members: vec![members[0].id, members[1].id],
            ec: ec("Year:1983, Part:1"),
        },
        SplitGroup {
            members: vec![members[2].id, members[3].id],
            ec: ec("Year:1983, Part:2"),
        },
    ];
    let new_ids = registry.split(original_id, groups, "conflated parts")?;
    assert_eq!(new_ids.len(), 2);

    for id in &new_ids {
        let rec = registry.store().record(*id)?;
        assert!(!rec.is_deprecated());
        assert_eq!(rec.members.len(), 2);
        assert_eq!(rec.ancestors, vec![original_id]);
    }
    let old = registry.store().record(original_id)?;
    assert!(old.is_deprecated());
    assert_eq!(old.successors, new_ids);
    Ok(())
}

#[test]
fn merge_unions_members_and_deprecates_inputs() -> Result<()> {
    let mut registry = registry();
    let left_ec = ec("Volume:10");
    let right_ec = ec("V. 10 BOUND");
    let a = source("COO", Some(31), None, &[left_ec.clone()]);
    let b = source("NYP", Some(32), None, &[right_ec.clone()]);
    registry.store_mut().save_source(a.clone())?;
    registry.store_mut().save_source(b.clone())?;
    let left = registry.reconcile(a.id)?[0];
    let right = registry.reconcile(b.id)?[0];

    let merged = registry.merge(&[left, right], &left_ec, "same physical volume")?;
    let rec = registry.store().record(merged)?;
    assert_eq!(rec.members.len(), 2);
    assert_eq!(rec.oclcs, vec![31, 32]);
    let mut ancestors = rec.ancestors.clone();
    ancestors.sort();
    let mut inputs = vec![left, right];
    inputs.sort();
    assert_eq!(ancestors, inputs);

    for id in [left, right] {
        let input = registry.store().record(id)?;
        assert!(input.is_deprecated());
        assert_eq!(input.successors, vec![merged]);
    }

    match registry.merge(&[merged], &left_ec, "again") {
        Err(RegistryError::DegenerateMerge(1)) => Ok(()),
        other => panic!("expected DegenerateMerge, got {other:?}"),
    }
}

#[test]
fn failed_split_leaves_the_store_untouched() -> Result<()> {
    let mut registry = registry();
    let issue = ec("Year:1983");
    let a = source("COO", Some(71), None, &[issue.clone()]);
    let b = source("NYP", Some(71), None, &[issue.clone()]);
    registry.store_mut().save_source(a.clone())?;
    registry.store_mut().save_source(b.clone())?;
    registry.reconcile(a.id)?;
    let id = registry.reconcile(b.id)?[0];

    // A valid group followed by an empty one: the whole split must abort
    // with no successor persisted and the original still active.
    let groups = vec![
        SplitGroup {
            members: vec![a.id],
            ec: ec("Year:1983, Part:1"),
        },
        SplitGroup {
            members: Vec::new(),
            ec: ec("Year:1983, Part:2"),
        },
    ];
    match registry.split(id, groups, "conflated parts") {
        Err(RegistryError::EmptyCluster(_)) => {}
        other => panic!("expected EmptyCluster, got {other:?}"),
    }
    assert!(registry
        .store()
        .active_by_ec(&ec("Year:1983, Part:1").key)
        .is_empty());
    let original = registry.store().record(id)?;
    assert!(!original.is_deprecated());
    assert_eq!(original.members.len(), 2);

    // Same for a group naming a source that is not a member.
    let stranger = Uuid::new_v4();
    let groups = vec![SplitGroup {
        members: vec![a.id, stranger],
        ec: ec("Year:1983, Part:1"),
    }];
    match registry.split(id, groups, "conflated parts") {
        Err(RegistryError::ForeignSplitMember { source, .. }) => assert_eq!(source, stranger),
        other => panic!("expected ForeignSplitMember, got {other:?}"),
    }
    assert!(registry
        .store()
        .active_by_ec(&ec("Year:1983, Part:1").key)
        .is_empty());
    assert!(!registry.store().record(id)?.is_deprecated());
    Ok(())
}

#[test]
fn merge_ignores_duplicate_input_ids() -> Result<()> {
    let mut registry = registry();
    let left_ec = ec("Volume:12");
    let right_ec = ec("V. 12 BOUND");
    let a = source("COO", Some(81), None, &[left_ec.clone()]);
    let b = source("NYP", Some(82), None, &[right_ec.clone()]);
    registry.store_mut().save_source(a.clone())?;
    registry.store_mut().save_source(b.clone())?;
    let left = registry.reconcile(a.id)?[0];
    let right = registry.reconcile(b.id)?[0];

    // The same cluster twice is one input, not a two-way merge.
    match registry.merge(&[left, left], &left_ec, "same volume") {
        Err(RegistryError::DegenerateMerge(1)) => {}
        other => panic!("expected DegenerateMerge, got {other:?}"),
    }

    let merged = registry.merge(&[left, right, left], &left_ec, "same volume")?;
    let rec = registry.store().record(merged)?;
    let mut expected = vec![left, right];
    expected.sort();
    assert_eq!(rec.ancestors, expected);
    assert_eq!(rec.members.len(), 2);
    Ok(())
}

#[test]
fn suppressed_clusters_attract_no_new_members() -> Result<()> {
    let mut registry = registry();
    let issue = ec("Volume:7");
    let a = source("COO", Some(91), None, &[issue.clone()]);
    registry.store_mut().save_source(a.clone())?;
    let id = registry.reconcile(a.id)?[0];
    registry.set_suppressed(id, true)?;

    let newcomer = source("NYP", Some(91), None, &[issue.clone()]);
    registry.store_mut().save_source(newcomer.clone())?;
    assert_eq!(registry.cluster(&newcomer, &issue.key), None);
    let elsewhere = registry.reconcile(newcomer.id)?;
    assert_ne!(elsewhere, vec![id]);

    // Existing membership is kept, and unlike deprecation the flag clears.
    assert_eq!(registry.store().record(id)?.members, vec![a.id]);
    registry.set_suppressed(id, false)?;
    let latecomer = source("BPL", Some(91), None, &[issue.clone()]);
    assert_eq!(registry.cluster(&latecomer, &issue.key), Some(id));
    Ok(())
}

#[test]
fn reconcile_removes_vanished_holdings() -> Result<()> {
    let mut registry = registry();
    let kept = ec("Number:1");
    let dropped = ec("Number:2");

    // Sole-member case: the cluster is deprecated outright.
    let mut lone = source("COO", Some(51), None, &[kept.clone(), dropped.clone()]);
    registry.store_mut().save_source(lone.clone())?;
    registry.reconcile(lone.id)?;
    lone.enum_chrons = vec![kept.clone()];
    registry.store_mut().save_source(lone.clone())?;
    let active = registry.reconcile(lone.id)?;
    assert_eq!(active.len(), 1);
    let survivors = registry.store().active_by_ec(&dropped.key);
    assert!(survivors.is_empty());

    // Multi-member case: a replacement cluster carries the remaining
    // member; the old cluster is deprecated naming it successor.
    let mut first = source("COO", Some(52), None, &[dropped.clone()]);
    let second = source("NYP", Some(52), None, &[dropped.clone()]);
    registry.store_mut().save_source(first.clone())?;
    registry.store_mut().save_source(second.clone())?;
    registry.reconcile(first.id)?;
    let shared = registry.reconcile(second.id)?[0];
    assert_eq!(registry.store().record(shared)?.members.len(), 2);

    first.enum_chrons = vec![kept.clone()];
    registry.store_mut().save_source(first.clone())?;
    registry.reconcile(first.id)?;

    let old = registry.store().record(shared)?;
    assert!(old.is_deprecated());
    assert_eq!(old.successors.len(), 1);
    let replacement = registry.store().record(old.successors[0])?;
    assert_eq!(replacement.members, vec![second.id]);
    assert_eq!(replacement.ancestors, vec![shared]);
    assert!(!replacement.is_deprecated());
    Ok(())
}

#[test]
fn readding_a_member_recollates_instead_of_duplicating() -> Result<()> {
    let mut registry = registry();
    let issue = ec("Volume:3");
    let mut s = source("COO", Some(61), None, &[issue.clone()]);
    registry.store_mut().save_source(s.clone())?;
    let id = registry.reconcile(s.id)?[0];

    // The source loses its OCLC; re-adding must drop the stale aggregate.
    s.identifiers.oclcs.clear();
    s.identifiers.lccns = vec!["sn99-001".to_string()];
    registry.store_mut().save_source(s.clone())?;
    registry.add_source(id, s.id)?;

    let rec = registry.store().record(id)?;
    assert_eq!(rec.members, vec![s.id]);
    assert!(rec.oclcs.is_empty());
    assert_eq!(rec.lccns, vec!["sn99-001"]);
    Ok(())
}
