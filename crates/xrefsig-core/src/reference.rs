//! Syntactic reference sites and lexical blocks.
//!
//! Reference sites are the use positions the driver asks specialization
//! signatures for. Blocks are the executable/initializer regions that scope
//! declarations lacking a qualified name.

use serde::{Deserialize, Serialize};

use crate::decl::Span;
use crate::id::{BlockId, DeclId, RefId, TypeId};

/// A syntactic use site carrying what the front end resolved it to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceNode {
    /// `expr.member` or `expr.member(...)`.
    MemberAccess {
        /// Resolved type of the qualifying expression.
        owner_type: TypeId,
        /// Resolved member symbol.
        member: DeclId,
        /// Member name as written.
        name: String,
        /// Resolved type of the whole access (a method or generic method type
        /// for calls).
        ty: TypeId,
    },
    /// A bare identifier resolving to `symbol`.
    Identifier {
        symbol: DeclId,
        name: String,
        ty: TypeId,
    },
    /// A wildcard type argument `? extends T` as written.
    Wildcard { ty: TypeId },
    /// A parameterized type use `Box<String>`.
    ParameterizedType { ty: TypeId },
    /// An array type use `String[]`.
    ArrayType { ty: TypeId },
}

impl ReferenceNode {
    /// Short kind name used in diagnostics and driver output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ReferenceNode::MemberAccess { .. } => "member-access",
            ReferenceNode::Identifier { .. } => "identifier",
            ReferenceNode::Wildcard { .. } => "wildcard",
            ReferenceNode::ParameterizedType { .. } => "parameterized-type",
            ReferenceNode::ArrayType { .. } => "array-type",
        }
    }
}

/// A reference node together with its position in the syntax tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSite {
    pub node: ReferenceNode,
    pub span: Option<Span>,
    /// Enclosing syntax node, when the front end recorded one.
    pub parent: Option<RefId>,
}

/// Kind of lexical block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Body of a method or constructor.
    Body,
    /// Instance initializer (or field initializer expression).
    Initializer,
    /// `static { ... }` initializer.
    StaticInitializer,
    /// Nested `{ ... }` statement block inside another block.
    Nested,
}

/// An executable or initializer block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// The executable owning a body, or the type owning an initializer.
    pub owner: DeclId,
    pub kind: BlockKind,
    /// Enclosing block for nested blocks.
    pub parent: Option<BlockId>,
}
