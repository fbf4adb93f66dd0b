//! Error types for the registry.
//!
//! Parse and classification failures are not errors: an enumeration string
//! that matches no pattern is retained unparsed, and a record matching no
//! series falls through to raw passthrough. The error types here cover the
//! cases that must abort an operation: structural invariant violations on
//! clusters and failures of the backing store.

use thiserror::Error;
use uuid::Uuid;

/// Top-level error for registry operations.
// Display/Error/From are written by hand because `ForeignSplitMember` has a
// `source` field that is a Uuid, not an underlying error, and thiserror's
// derive unconditionally treats a field named `source` as the error source.
#[derive(Debug)]
pub enum RegistryError {
    EmptyCluster(Uuid),

    DeprecatedCluster { id: Uuid, reason: String },

    UnknownRecord(Uuid),

    UnknownSource(Uuid),

    EmptySplit,

    ForeignSplitMember { cluster: Uuid, source: Uuid },

    DegenerateMerge(usize),

    Store(String),

    Serialization(serde_json::Error),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCluster(id) => {
                write!(f, "cluster {id} has no member sources; refusing to persist")
            }
            Self::DeprecatedCluster { id, reason } => {
                write!(f, "cluster {id} is deprecated ({reason}); it cannot be mutated")
            }
            Self::UnknownRecord(id) => write!(f, "no registry record with id {id}"),
            Self::UnknownSource(id) => write!(f, "no source record with id {id}"),
            Self::EmptySplit => {
                write!(f, "split assignment must produce at least one group")
            }
            Self::ForeignSplitMember { cluster, source } => write!(
                f,
                "split of cluster {cluster} assigns source {source}, which is not a member"
            ),
            Self::DegenerateMerge(n) => {
                write!(f, "merge requires at least two input clusters, got {n}")
            }
            Self::Store(msg) => write!(f, "store error: {msg}"),
            Self::Serialization(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// Error raised while constructing grammar pattern sets and reference tables.
///
/// Construction happens once at startup; a failure here means a defective
/// embedded pattern or table, not bad input data.
#[derive(Error, Debug)]
pub enum GrammarBuildError {
    #[error("invalid pattern in {series} grammar: {source}")]
    Pattern {
        series: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("malformed reference table for {series}: {source}")]
    Table {
        series: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Error raised while decoding a bibliographic blob.
#[derive(Error, Debug)]
pub enum BibError {
    #[error("blob is not a bibliographic record: {0}")]
    Malformed(String),

    #[error("blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
