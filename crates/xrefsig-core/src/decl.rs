//! Resolved declarations.
//!
//! A [`Declaration`] is a named program entity: a package, a type, a
//! variable, an executable (method or constructor), or a type parameter.
//! Every declaration except a top-level package has an enclosing
//! declaration; declarations that live inside a method body or initializer
//! additionally carry the [`BlockId`] of their innermost lexical block.

use serde::{Deserialize, Serialize};

use crate::id::{BlockId, DeclId, TypeId};

/// Byte range of a syntax node in its source file.
///
/// `end` is `None` when the front end could not determine an end position
/// (generated code, recovered parse errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: Option<u32>,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Span {
            start,
            end: Some(end),
        }
    }

    /// A span whose end position is unknown.
    pub fn open(start: u32) -> Self {
        Span { start, end: None }
    }
}

/// A resolved program entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    /// Simple name. Empty for anonymous types.
    pub name: String,
    /// Lexically enclosing declaration. `None` only for packages.
    pub enclosing: Option<DeclId>,
    /// Innermost executable/initializer block containing this declaration,
    /// for locals, parameters, local classes and anonymous classes.
    pub block: Option<BlockId>,
    pub kind: DeclKind,
}

/// Kind-specific declaration data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeclKind {
    Package {
        qualified_name: String,
    },
    Type {
        kind: TypeDeclKind,
        nesting: Nesting,
        /// The type this declaration defines (`None` until resolved).
        ty: Option<TypeId>,
    },
    Variable {
        kind: VariableKind,
        ty: Option<TypeId>,
    },
    Executable {
        kind: ExecutableKind,
        /// `TypeParameter` declarations in source order.
        type_params: Vec<DeclId>,
        /// Method type, or `Forall` type for generic methods.
        ty: Option<TypeId>,
        /// Compiler-synthesized default constructor with no source declaration.
        implicit: bool,
    },
    TypeParameter {
        /// The declared type variable. `None` when erased.
        ty: Option<TypeId>,
    },
    /// A declaration kind the front end does not classify.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDeclKind {
    Class,
    Interface,
    Enum,
    Annotation,
    /// Primitive pseudo-type declaration (`int`, `boolean`, ...).
    Primitive,
    /// The `void` pseudo-type declaration.
    Void,
}

/// Where a type declaration sits relative to its enclosing declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nesting {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    Local,
    Parameter,
    ExceptionParameter,
    ResourceVariable,
    Field,
    EnumConstant,
}

impl VariableKind {
    /// Returns `true` for variables scoped to a lexical block rather than a
    /// type.
    pub fn is_block_scoped(self) -> bool {
        matches!(
            self,
            VariableKind::Local
                | VariableKind::Parameter
                | VariableKind::ExceptionParameter
                | VariableKind::ResourceVariable
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutableKind {
    Method,
    Constructor,
}

impl Declaration {
    /// Returns `true` if this declaration is a package.
    pub fn is_package(&self) -> bool {
        matches!(self.kind, DeclKind::Package { .. })
    }

    /// Returns `true` if this declaration is a class, interface, enum,
    /// annotation or primitive pseudo-type.
    pub fn is_type(&self) -> bool {
        matches!(self.kind, DeclKind::Type { .. })
    }

    /// Returns `true` for a method (not a constructor).
    pub fn is_method(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Executable {
                kind: ExecutableKind::Method,
                ..
            }
        )
    }

    /// Returns `true` for a field (not an enum constant).
    pub fn is_field(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Variable {
                kind: VariableKind::Field,
                ..
            }
        )
    }

    /// Returns `true` for a compiler-synthesized default constructor.
    pub fn is_implicit_constructor(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Executable {
                kind: ExecutableKind::Constructor,
                implicit: true,
                ..
            }
        )
    }

    /// The type this declaration defines or has, if any.
    pub fn ty(&self) -> Option<TypeId> {
        match &self.kind {
            DeclKind::Type { ty, .. }
            | DeclKind::Variable { ty, .. }
            | DeclKind::Executable { ty, .. }
            | DeclKind::TypeParameter { ty } => *ty,
            DeclKind::Package { .. } | DeclKind::Unknown => None,
        }
    }

    /// Short kind name used in diagnostics and driver output.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            DeclKind::Package { .. } => "package",
            DeclKind::Type { nesting: Nesting::Anonymous, .. } => "anonymous-type",
            DeclKind::Type { .. } => "type",
            DeclKind::Variable { kind, .. } => match kind {
                VariableKind::Local => "local",
                VariableKind::Parameter => "parameter",
                VariableKind::ExceptionParameter => "exception-parameter",
                VariableKind::ResourceVariable => "resource-variable",
                VariableKind::Field => "field",
                VariableKind::EnumConstant => "enum-constant",
            },
            DeclKind::Executable {
                kind: ExecutableKind::Method,
                ..
            } => "method",
            DeclKind::Executable {
                kind: ExecutableKind::Constructor,
                ..
            } => "constructor",
            DeclKind::TypeParameter { .. } => "type-parameter",
            DeclKind::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(kind: VariableKind) -> Declaration {
        Declaration {
            name: "x".into(),
            enclosing: Some(DeclId(0)),
            block: None,
            kind: DeclKind::Variable { kind, ty: None },
        }
    }

    #[test]
    fn block_scoped_variable_kinds() {
        assert!(VariableKind::Local.is_block_scoped());
        assert!(VariableKind::Parameter.is_block_scoped());
        assert!(VariableKind::ExceptionParameter.is_block_scoped());
        assert!(VariableKind::ResourceVariable.is_block_scoped());
        assert!(!VariableKind::Field.is_block_scoped());
        assert!(!VariableKind::EnumConstant.is_block_scoped());
    }

    #[test]
    fn field_predicate_excludes_enum_constants() {
        assert!(variable(VariableKind::Field).is_field());
        assert!(!variable(VariableKind::EnumConstant).is_field());
        assert_eq!(variable(VariableKind::EnumConstant).kind_name(), "enum-constant");
    }

    #[test]
    fn implicit_constructor_predicate() {
        let ctor = Declaration {
            name: "<init>".into(),
            enclosing: Some(DeclId(1)),
            block: None,
            kind: DeclKind::Executable {
                kind: ExecutableKind::Constructor,
                type_params: Vec::new(),
                ty: None,
                implicit: true,
            },
        };
        assert!(ctor.is_implicit_constructor());
        assert!(!ctor.is_method());
        assert_eq!(ctor.kind_name(), "constructor");
    }

    #[test]
    fn span_constructors() {
        assert_eq!(Span::new(1, 5).end, Some(5));
        assert_eq!(Span::open(3).end, None);
    }

    #[test]
    fn declaration_json_shape() {
        let decl = Declaration {
            name: "count".into(),
            enclosing: Some(DeclId(1)),
            block: Some(BlockId(3)),
            kind: DeclKind::Variable {
                kind: VariableKind::Local,
                ty: Some(TypeId(2)),
            },
        };
        insta::assert_json_snapshot!(decl, @r#"
        {
          "name": "count",
          "enclosing": 1,
          "block": 3,
          "kind": {
            "Variable": {
              "kind": "Local",
              "ty": 2
            }
          }
        }
        "#);
    }
}
