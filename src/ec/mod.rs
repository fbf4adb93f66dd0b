//! Enumeration/chronology parsing.
//!
//! The layers, leaves first: [`tokens`] holds the shared regex fragments,
//! [`pattern`] compiles them into anchored ordered sets, [`postprocess`]
//! repairs matched values (fuzzy months, short end years), [`grammar`]
//! defines the [`SeriesGrammar`](grammar::SeriesGrammar) capability and the
//! generic fallback, and [`series`] carries one bespoke grammar per known
//! serial.

pub mod features;
pub mod grammar;
pub mod pattern;
pub mod postprocess;
pub mod series;
pub mod tokens;

pub use features::{key_hash, Feature, FeatureMap};
pub use grammar::{DefaultGrammar, SeriesGrammar};
pub use series::{Grammars, Series};
