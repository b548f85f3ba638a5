//! Signature engine error types.
//!
//! [`SignatureError`] never leaves the engine: every public entry point turns
//! it into an absent signature for the one request that failed. It exists so
//! the traversal can propagate malformed-model failures with `?` and the
//! entry point can log what went wrong.

use std::fmt;

use thiserror::Error;
use xrefsig_core::{BlockId, DeclId, RefId, TypeId};

/// A node of the traversal: what a signature was being computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Decl(DeclId),
    Type(TypeId),
    Block(BlockId),
    Reference(RefId),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Decl(id) => write!(f, "decl {}", id),
            Subject::Type(id) => write!(f, "type {}", id),
            Subject::Block(id) => write!(f, "block {}", id),
            Subject::Reference(id) => write!(f, "reference {}", id),
        }
    }
}

/// Failures while computing one signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("declaration not found: DeclId({id})")]
    DeclNotFound { id: DeclId },

    #[error("type not found: TypeId({id})")]
    TypeNotFound { id: TypeId },

    #[error("block not found: BlockId({id})")]
    BlockNotFound { id: BlockId },

    #[error("reference not found: RefId({id})")]
    ReferenceNotFound { id: RefId },

    /// A block-scoped id was requested for a declaration outside any block.
    #[error("declaration {id} is not inside a block")]
    NotInBlock { id: DeclId },

    /// The model does not have the shape the traversal expects.
    #[error("malformed semantic model: {reason}")]
    Malformed { reason: String },

    /// A node was reached again while its own signature was being computed.
    #[error("cycle while computing the signature of {node}")]
    Cycle { node: Subject },
}

impl SignatureError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SignatureError::Malformed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_display() {
        assert_eq!(Subject::Decl(DeclId(3)).to_string(), "decl 3");
        assert_eq!(Subject::Type(TypeId(4)).to_string(), "type 4");
        assert_eq!(Subject::Block(BlockId(0)).to_string(), "block 0");
        assert_eq!(Subject::Reference(RefId(9)).to_string(), "reference 9");
    }

    #[test]
    fn error_messages_name_the_node() {
        let err = SignatureError::Cycle {
            node: Subject::Type(TypeId(12)),
        };
        assert_eq!(err.to_string(), "cycle while computing the signature of type 12");

        let err = SignatureError::malformed("executable has no type");
        assert_eq!(
            err.to_string(),
            "malformed semantic model: executable has no type"
        );
    }
}
