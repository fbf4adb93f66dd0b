//! EC canonicalization pipeline.
//!
//! Takes a record's raw EC strings plus its classified series and produces
//! the computed `enum_chrons` set: classify → parse → explode →
//! canonicalize, with unparsed strings retained as raw passthrough
//! entries. Entries are keyed by the content hash of the canonical key (or
//! of the raw string when no key is derivable), so distinct raw strings
//! naming the same issue collapse to one entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ec::features::{key_hash, Feature, FeatureMap};
use crate::ec::series::{Grammars, Series};

/// One computed enumeration/chronology entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumChron {
    /// Content hash of the canonical key, or of the raw string for
    /// passthrough entries. This is the clustering identity.
    pub key: String,
    /// Canonical display value; `None` for passthrough entries.
    pub canonical: Option<String>,
    pub features: FeatureMap,
    /// The raw string this entry was last derived from.
    pub raw: String,
}

/// Compute the enum_chrons set for one record.
///
/// Raw strings are de-duplicated order-insensitively. When several raw
/// strings (or several per-issue explosions) land on the same key, their
/// feature maps merge and the most recently processed raw string wins the
/// `raw` field. A record with no usable EC strings at all gets a single
/// "no enumeration" entry keyed by the hash of the empty string.
pub fn compute_enum_chrons(
    grammars: &Grammars,
    series: Option<Series>,
    raws: &[String],
) -> Vec<EnumChron> {
    let mut distinct: Vec<&str> = raws.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let mut entries: BTreeMap<String, EnumChron> = BTreeMap::new();
    for raw in distinct {
        let parsed = series.map(|s| grammars.get(s)).and_then(|g| {
            let features = g.parse_ec(raw)?;
            Some((g, features))
        });
        match parsed {
            Some((grammar, features)) => {
                let exploded = grammar.explode(&features);
                if exploded.is_empty() {
                    // Parsed but no key derivable; retain keyed by the raw
                    // string and surface as a data-quality signal.
                    debug!(raw, "parsed but uncanonicalizable");
                    insert(&mut entries, key_hash(raw), None, features, raw);
                } else {
                    for (canonical, map) in exploded {
                        insert(&mut entries, key_hash(&canonical), Some(canonical), map, raw);
                    }
                }
            }
            None => {
                let passthrough = FeatureMap::new().with(Feature::Raw, raw);
                insert(&mut entries, key_hash(raw), None, passthrough, raw);
            }
        }
    }

    if entries.is_empty() {
        entries.insert(
            key_hash(""),
            EnumChron {
                key: key_hash(""),
                canonical: None,
                features: FeatureMap::new(),
                raw: String::new(),
            },
        );
    }
    entries.into_values().collect()
}

fn insert(
    entries: &mut BTreeMap<String, EnumChron>,
    key: String,
    canonical: Option<String>,
    features: FeatureMap,
    raw: &str,
) {
    entries
        .entry(key.clone())
        .and_modify(|e| {
            e.features = e.features.clone().merged_with(&features);
            e.raw = raw.to_string();
        })
        .or_insert(EnumChron {
            key,
            canonical,
            features,
            raw: raw.to_string(),
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammars() -> Grammars {
        Grammars::build().unwrap()
    }

    fn raws(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classified_strings_canonicalize() {
        let g = grammars();
        let out = compute_enum_chrons(
            &g,
            Some(Series::FederalRegister),
            &raws(&["V. 48:NO. 4 (1983:JAN. 6)"]),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].canonical.as_deref(), Some("Volume:48, Number:4"));
        assert_eq!(out[0].key, key_hash("Volume:48, Number:4"));
    }

    #[test]
    fn colliding_raw_strings_merge_into_one_entry() {
        let g = grammars();
        // Both strings name Federal Register v.48 no.4.
        let out = compute_enum_chrons(
            &g,
            Some(Series::FederalRegister),
            &raws(&["V. 48:NO. 4 (1983:JAN. 6)", "V. 48:NO. 4"]),
        );
        assert_eq!(out.len(), 1);
        // The chronology from the richer string survives the merge.
        assert_eq!(out[0].features.get(Feature::Year), Some("1983"));
    }

    #[test]
    fn unclassified_records_pass_through_raw() {
        let g = grammars();
        let out = compute_enum_chrons(&g, None, &raws(&["V. 48:NO. 4"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].canonical, None);
        assert_eq!(out[0].features.get(Feature::Raw), Some("V. 48:NO. 4"));
        assert_eq!(out[0].key, key_hash("V. 48:NO. 4"));
    }

    #[test]
    fn unparseable_strings_pass_through_raw() {
        let g = grammars();
        let out = compute_enum_chrons(
            &g,
            Some(Series::FederalRegister),
            &raws(&["BOUND VOLS, MISC"]),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].features.get(Feature::Raw), Some("BOUND VOLS, MISC"));
    }

    #[test]
    fn ranges_explode_into_many_entries() {
        let g = grammars();
        let out = compute_enum_chrons(
            &g,
            Some(Series::CongressionalSerialSet),
            &raws(&["NO. 201-250"]),
        );
        assert_eq!(out.len(), 50);
        assert!(out.iter().all(|e| e.raw == "NO. 201-250"));
    }

    #[test]
    fn no_ec_strings_yield_the_no_enumeration_entry() {
        let g = grammars();
        let out = compute_enum_chrons(&g, Some(Series::FederalRegister), &raws(&["", "  "]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].key, key_hash(""));
        assert!(out[0].features.is_empty());
    }

    #[test]
    fn input_order_does_not_matter() {
        let g = grammars();
        let a = compute_enum_chrons(
            &g,
            Some(Series::FederalRegister),
            &raws(&["V. 48:NO. 4", "V. 49:NO. 1", "V. 48:NO. 4"]),
        );
        let b = compute_enum_chrons(
            &g,
            Some(Series::FederalRegister),
            &raws(&["V. 49:NO. 1", "V. 48:NO. 4"]),
        );
        assert_eq!(a, b);
    }
}
