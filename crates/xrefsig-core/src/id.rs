//! Stable identity handles for semantic model entities.
//!
//! All IDs are distinct newtype wrappers over `u32`, providing type safety
//! so that a `DeclId` cannot be accidentally used where a `TypeId` is expected.
//!
//! Handles are the identity of an entity: two structurally identical types
//! registered twice get two different `TypeId`s, and anything keyed by a
//! handle (signature caches in particular) keeps them apart.

use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Declaration identity. Maps to a petgraph `NodeIndex<u32>` in the
/// enclosure graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub u32);

/// Type expression identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// Lexical block identity (method bodies, initializers, nested blocks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

/// Reference site identity (a syntactic use of a declaration or type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RefId(pub u32);

// Display implementations -- just print the inner value.

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge between DeclId and petgraph's NodeIndex<u32>. Declarations are added
// to the arena and the enclosure graph in lockstep, so the indices coincide.

impl From<NodeIndex<u32>> for DeclId {
    fn from(idx: NodeIndex<u32>) -> Self {
        DeclId(idx.index() as u32)
    }
}

impl From<DeclId> for NodeIndex<u32> {
    fn from(id: DeclId) -> Self {
        NodeIndex::new(id.0 as usize)
    }
}
