//! Parsed enumeration/chronology features.
//!
//! A [`FeatureMap`] is the structured result of parsing one EC string.
//! Absent features are absent keys, never empty or null values. Pipeline
//! stages (preprocess, match, postprocess, explode, canonicalize) each
//! return a new value rather than mutating shared state.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The closed set of feature names a grammar may extract.
///
/// Serialized with snake_case wire names, which are also the named capture
/// group names used by the token library.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Volume,
    StartVolume,
    EndVolume,
    Number,
    StartNumber,
    EndNumber,
    Year,
    StartYear,
    EndYear,
    Month,
    StartMonth,
    EndMonth,
    Day,
    StartDay,
    EndDay,
    Part,
    StartPart,
    EndPart,
    StartPage,
    EndPage,
    Supplement,
    Edition,
    Book,
    Sheet,
    Congress,
    Session,
    /// Series designation within a multi-series set ("SER. 1").
    Series,
    /// The unparsed original string, used for passthrough entries.
    Raw,
}

impl Feature {
    /// All features, in default canonical-rendering order.
    pub const ALL: &'static [Feature] = &[
        Feature::Volume,
        Feature::StartVolume,
        Feature::EndVolume,
        Feature::Number,
        Feature::StartNumber,
        Feature::EndNumber,
        Feature::Part,
        Feature::StartPart,
        Feature::EndPart,
        Feature::Book,
        Feature::Sheet,
        Feature::Congress,
        Feature::Session,
        Feature::Series,
        Feature::Edition,
        Feature::Year,
        Feature::StartYear,
        Feature::EndYear,
        Feature::Month,
        Feature::StartMonth,
        Feature::EndMonth,
        Feature::Day,
        Feature::StartDay,
        Feature::EndDay,
        Feature::StartPage,
        Feature::EndPage,
        Feature::Supplement,
        Feature::Raw,
    ];

    /// Human-readable label used in canonical keys ("Start Number").
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Volume => "Volume",
            Feature::StartVolume => "Start Volume",
            Feature::EndVolume => "End Volume",
            Feature::Number => "Number",
            Feature::StartNumber => "Start Number",
            Feature::EndNumber => "End Number",
            Feature::Year => "Year",
            Feature::StartYear => "Start Year",
            Feature::EndYear => "End Year",
            Feature::Month => "Month",
            Feature::StartMonth => "Start Month",
            Feature::EndMonth => "End Month",
            Feature::Day => "Day",
            Feature::StartDay => "Start Day",
            Feature::EndDay => "End Day",
            Feature::Part => "Part",
            Feature::StartPart => "Start Part",
            Feature::EndPart => "End Part",
            Feature::StartPage => "Start Page",
            Feature::EndPage => "End Page",
            Feature::Supplement => "Supplement",
            Feature::Edition => "Edition",
            Feature::Book => "Book",
            Feature::Sheet => "Sheet",
            Feature::Congress => "Congress",
            Feature::Session => "Session",
            Feature::Series => "Series",
            Feature::Raw => "String",
        }
    }

    /// Wire name, doubling as the regex capture-group name ("start_number").
    pub fn wire_name(&self) -> &'static str {
        match self {
            Feature::Volume => "volume",
            Feature::StartVolume => "start_volume",
            Feature::EndVolume => "end_volume",
            Feature::Number => "number",
            Feature::StartNumber => "start_number",
            Feature::EndNumber => "end_number",
            Feature::Year => "year",
            Feature::StartYear => "start_year",
            Feature::EndYear => "end_year",
            Feature::Month => "month",
            Feature::StartMonth => "start_month",
            Feature::EndMonth => "end_month",
            Feature::Day => "day",
            Feature::StartDay => "start_day",
            Feature::EndDay => "end_day",
            Feature::Part => "part",
            Feature::StartPart => "start_part",
            Feature::EndPart => "end_part",
            Feature::StartPage => "start_page",
            Feature::EndPage => "end_page",
            Feature::Supplement => "supplement",
            Feature::Edition => "edition",
            Feature::Book => "book",
            Feature::Sheet => "sheet",
            Feature::Congress => "congress",
            Feature::Session => "session",
            Feature::Series => "series",
            Feature::Raw => "string",
        }
    }

    /// Reverse lookup from a capture-group name.
    pub fn from_wire(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.wire_name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable-value map from [`Feature`] to its extracted string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMap(BTreeMap<Feature, String>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, feature: Feature) -> Option<&str> {
        self.0.get(&feature).map(String::as_str)
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains_key(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &str)> {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Builder-style insert. Empty values are dropped rather than stored.
    pub fn with(mut self, feature: Feature, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(feature, value);
        }
        self
    }

    /// Returns a new map without the given feature.
    pub fn without(mut self, feature: Feature) -> Self {
        self.0.remove(&feature);
        self
    }

    /// Returns a new map combining both; entries from `other` win on conflict.
    pub fn merged_with(mut self, other: &FeatureMap) -> Self {
        for (f, v) in other.iter() {
            self.0.insert(f, v.to_string());
        }
        self
    }

    /// Render the features present, in the given order, as
    /// `"Label:value, Label:value"`. Features not in `order` are omitted.
    /// Returns `None` when no ordered feature is present.
    pub fn canonical_key(&self, order: &[Feature]) -> Option<String> {
        let parts: Vec<String> = order
            .iter()
            .filter_map(|f| self.get(*f).map(|v| format!("{}:{}", f.label(), v)))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

impl FromIterator<(Feature, String)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (Feature, String)>>(iter: I) -> Self {
        let mut map = FeatureMap::new();
        for (f, v) in iter {
            map = map.with(f, v);
        }
        map
    }
}

/// Content hash of a canonical key (or raw string), used as the clustering
/// identity for one physical issue.
pub fn key_hash(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_features_are_absent_keys() {
        let f = FeatureMap::new().with(Feature::Volume, "48").with(Feature::Number, "");
        assert_eq!(f.get(Feature::Volume), Some("48"));
        assert!(!f.contains(Feature::Number));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn canonical_key_follows_order_and_skips_absent() {
        let f = FeatureMap::new()
            .with(Feature::Number, "4")
            .with(Feature::Volume, "48")
            .with(Feature::Year, "1983");
        assert_eq!(
            f.canonical_key(&[Feature::Volume, Feature::Number]),
            Some("Volume:48, Number:4".to_string())
        );
        assert_eq!(f.canonical_key(&[Feature::Day]), None);
    }

    #[test]
    fn identical_maps_hash_identically() {
        let a = FeatureMap::new().with(Feature::Volume, "7");
        let b = FeatureMap::new().with(Feature::Volume, "7");
        let order = &[Feature::Volume];
        assert_eq!(
            key_hash(&a.canonical_key(order).unwrap()),
            key_hash(&b.canonical_key(order).unwrap())
        );
    }

    #[test]
    fn merged_with_prefers_other() {
        let a = FeatureMap::new().with(Feature::Year, "1990");
        let b = FeatureMap::new().with(Feature::Year, "1991").with(Feature::Month, "JAN");
        let m = a.merged_with(&b);
        assert_eq!(m.get(Feature::Year), Some("1991"));
        assert_eq!(m.get(Feature::Month), Some("JAN"));
    }

    #[test]
    fn wire_names_round_trip() {
        for f in Feature::ALL {
            assert_eq!(Feature::from_wire(f.wire_name()), Some(*f));
        }
    }
}
