//! Resolved type expressions.
//!
//! A [`Type`] is what the front end resolved a type expression to. Types
//! reference declarations by [`DeclId`] and other types by [`TypeId`]; the
//! same structural type may appear under several `TypeId`s (one per source
//! occurrence) and those stay distinct.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::{DeclId, TypeId};

/// Type argument / parameter lists are short in practice.
pub type TypeList = SmallVec<[TypeId; 4]>;

/// A resolved type. Each variant represents a distinct kind of type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// Primitive type (`int`, `boolean`, ...).
    Primitive { name: String },

    /// The `void` pseudo-type.
    Void,

    /// Array of `component`. `varargs` marks a trailing `T...` parameter.
    Array { component: TypeId, varargs: bool },

    /// Class or interface type, possibly parameterized.
    Class {
        /// The declaring type.
        decl: DeclId,
        /// Enclosing instance type for inner classes; `None` for top-level
        /// and static nested classes.
        enclosing: Option<TypeId>,
        /// Type arguments in source order (empty for raw or non-generic use).
        type_args: TypeList,
    },

    /// Method type. Only parameters take part in signatures.
    Method {
        params: TypeList,
        return_type: Option<TypeId>,
    },

    /// Reference to a type variable.
    TypeVar {
        /// The `TypeParameter` declaration that introduces the variable.
        decl: DeclId,
        /// Declared upper bound; `None` when unbounded.
        upper_bound: Option<TypeId>,
    },

    /// Intersection bound `A & B & C`.
    Intersection {
        supertype: Option<TypeId>,
        interfaces: TypeList,
    },

    /// Wildcard type argument.
    Wildcard { kind: BoundKind, bound: Option<TypeId> },

    /// A type the front end failed to resolve.
    Error { qualified_name: Option<String> },

    /// Generic method type before instantiation: `<T, U> (T, U)`.
    Forall { type_vars: TypeList, method: TypeId },

    /// Type of a package symbol.
    Package { decl: DeclId },

    /// Capture-converted wildcard. Has no stable source-level identity.
    Captured,

    /// Inference variable. Has no stable source-level identity.
    Undetermined,
}

/// Bound kind of a wildcard type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundKind {
    /// `?`
    Unbound,
    /// `? extends T`
    Extends,
    /// `? super T`
    Super,
}

impl BoundKind {
    /// Source keyword text, including the trailing space before a bound.
    pub fn keyword(self) -> &'static str {
        match self {
            BoundKind::Unbound => "?",
            BoundKind::Extends => "? extends ",
            BoundKind::Super => "? super ",
        }
    }
}

impl Type {
    /// Returns the underlying method type of a generic method type, or `None`
    /// if this type does not wrap another.
    pub fn delegate(&self) -> Option<TypeId> {
        match self {
            Type::Forall { method, .. } => Some(*method),
            _ => None,
        }
    }

    /// Returns `true` for the compiler-internal inference artifacts.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Type::Captured | Type::Undetermined)
    }

    /// Short variant name used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Type::Primitive { .. } => "primitive",
            Type::Void => "void",
            Type::Array { .. } => "array",
            Type::Class { .. } => "class",
            Type::Method { .. } => "method",
            Type::TypeVar { .. } => "type-var",
            Type::Intersection { .. } => "intersection",
            Type::Wildcard { .. } => "wildcard",
            Type::Error { .. } => "error",
            Type::Forall { .. } => "forall",
            Type::Package { .. } => "package",
            Type::Captured => "captured",
            Type::Undetermined => "undetermined",
        }
    }
}
