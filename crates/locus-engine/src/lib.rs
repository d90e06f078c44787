//! Locator resolution.
//!
//! Given a node in a document snapshot, generate scored locator candidates
//! in two dialects (fluent `page.getBy*` style and classic `By.*` style),
//! validate each candidate's live match count against the tree, and pick the
//! best one per dialect, preferring uniqueness over raw priority. A simpler
//! legacy strategy produces one base locator plus an index fallback instead.

pub mod candidate;
pub mod classic;
pub mod config;
pub mod fluent;
pub mod format;
pub mod paths;
pub mod resolve;
pub mod selector;
pub mod weights;

mod expr;

pub use candidate::{Candidate, Dialect, LocatorPair};
pub use config::{ConfigError, LocusConfig, load_config, load_config_from};
pub use resolve::{
    Classification, LegacyResolution, Resolution, ResolveError, Strategy, resolve,
    resolve_legacy, resolve_scored,
};
pub use weights::{ClassicWeights, FluentWeights, Weights};
