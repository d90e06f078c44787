//! Candidate and result types.

use locus_dom::{DomTree, NodeId, Query};
use serde::{Deserialize, Serialize};

/// The two locator-expression families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    Fluent,
    Classic,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Fluent => write!(f, "fluent"),
            Dialect::Classic => write!(f, "classic"),
        }
    }
}

/// A scored locator expression under consideration.
///
/// A pure value: `matches` is the live count at generation time, and the
/// candidate stays valid after the node reference is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub code: String,
    pub matches: usize,
    pub score: i32,
}

impl Candidate {
    pub fn new(code: impl Into<String>, matches: usize, score: i32) -> Self {
        Self {
            code: code.into(),
            matches,
            score,
        }
    }

    /// Exactly one live match.
    pub fn is_unique(&self) -> bool {
        self.matches == 1
    }
}

/// Best candidate per dialect for one resolved node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorPair {
    pub fluent: Candidate,
    pub classic: Candidate,
}

/// True match count for a query, provided the target itself is in the match
/// set. Both generators use this for candidates that select by content
/// rather than by an attribute of the target.
pub(crate) fn counted(tree: &dyn DomTree, id: NodeId, query: &Query) -> Option<usize> {
    let all = tree.query_all(query);
    if all.contains(&id) { Some(all.len()) } else { None }
}
