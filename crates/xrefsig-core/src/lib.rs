//! Semantic model consumed by the xrefsig signature engine.
//!
//! A front end resolves one compilation unit into a [`SemanticModel`]:
//! declarations, resolved types, lexical blocks and reference sites, each
//! addressed by an identity handle. The model is a plain data structure; it
//! never infers or checks types.

pub mod decl;
pub mod error;
pub mod id;
pub mod model;
pub mod reference;
pub mod types;

// Re-export commonly used types
pub use decl::{DeclKind, Declaration, ExecutableKind, Nesting, Span, TypeDeclKind, VariableKind};
pub use error::CoreError;
pub use id::{BlockId, DeclId, RefId, TypeId};
pub use model::{Enclosure, SemanticModel};
pub use reference::{Block, BlockKind, ReferenceNode, ReferenceSite};
pub use types::{BoundKind, Type, TypeList};
