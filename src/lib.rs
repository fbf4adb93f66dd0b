//! Deduplicating registry for serial US federal document holdings.
//!
//! Institutions hold the same government serials under wildly inconsistent
//! catalog records; the free-text enumeration/chronology (EC) string naming
//! which issue a holding covers ("V. 48:NO. 4 (1983:JAN. 6)") varies by
//! institution, era, and serial. This crate recognizes which known serial
//! a record belongs to, parses its EC strings with that serial's grammar,
//! normalizes them to canonical issue identities, and clusters holdings
//! across institutions into one registry record per issue, with merge,
//! split, and deprecation lifecycle.
//!
//! The moving parts:
//! - [`ec`]: token library, per-series grammars, canonicalization, range
//!   explosion.
//! - [`classifier`]: identifier-based series recognition.
//! - [`pipeline`]: raw EC strings to the computed enum_chrons set.
//! - [`marc`] + [`identifiers`]: bibliographic field model and identifier
//!   extraction/validation.
//! - [`source`] + [`registry`] + [`store`]: holding records, clustering,
//!   and cluster lifecycle.
//! - [`report`]: batch grammar-quality measurement.

pub mod classifier;
pub mod ec;
pub mod error;
pub mod identifiers;
pub mod marc;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod source;
pub mod store;

pub use classifier::SeriesClassifier;
pub use ec::{key_hash, Feature, FeatureMap, Grammars, Series, SeriesGrammar};
pub use error::{BibError, GrammarBuildError, RegistryError};
pub use identifiers::{CarrierFormat, Identifiers, OclcAuthority};
pub use marc::BibRecord;
pub use pipeline::{compute_enum_chrons, EnumChron};
pub use registry::{Registry, RegistryRecord, SplitGroup};
pub use report::{measure, ParseReport};
pub use source::{Deprecation, ProcessingContext, SourceRecord};
pub use store::{InMemoryStore, RegistryStore};
