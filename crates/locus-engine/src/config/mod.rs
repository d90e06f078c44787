//! Engine configuration: file loading and the schema it deserializes into.

pub mod loader;
pub mod schema;

pub use loader::{ConfigError, load_config, load_config_from};
pub use schema::{LocusConfig, ResolverConfig};
