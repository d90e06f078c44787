pub mod css;
pub mod escape;
pub mod snapshot;
pub mod tree;
pub mod xpath;

pub use snapshot::{Document, NodeData, NodeId, PageInfo, RawNode, RawSnapshot, SnapshotError};
pub use tree::{DomTree, Query, normalize_text};
