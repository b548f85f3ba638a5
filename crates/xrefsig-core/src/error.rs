//! Core error types for xrefsig-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! the failure modes of building and querying a semantic model.

use crate::id::{BlockId, DeclId, RefId, TypeId};
use thiserror::Error;

/// Errors produced while building or querying a [`SemanticModel`](crate::model::SemanticModel).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A DeclId was not found in the model.
    #[error("declaration not found: DeclId({id})")]
    DeclNotFound { id: DeclId },

    /// A TypeId was not found in the model.
    #[error("type not found: TypeId({id})")]
    TypeNotFound { id: TypeId },

    /// A BlockId was not found in the model.
    #[error("block not found: BlockId({id})")]
    BlockNotFound { id: BlockId },

    /// A RefId was not found in the model.
    #[error("reference not found: RefId({id})")]
    ReferenceNotFound { id: RefId },

    /// A declaration was attached to an enclosing entity of the wrong kind.
    #[error("invalid enclosing declaration: {reason}")]
    InvalidEnclosing { reason: String },
}
