//! SemanticModel: the resolved declarations and types of one compilation unit.
//!
//! [`SemanticModel`] is what a front end hands to the signature engine. It
//! owns four arenas (declarations, types, blocks, reference sites) addressed
//! by identity handles, plus an enclosure skeleton: a `StableGraph` with one
//! node per declaration and an [`Enclosure::Encloses`] edge from every
//! declaration to each declaration it lexically contains.
//!
//! Declarations are appended to the arena and to the graph in lockstep, so a
//! `DeclId` is also the graph's `NodeIndex`. Insertion order is source order:
//! front ends are expected to register entities as they appear in the file,
//! which is what makes block and anonymous-type numbering deterministic.
//!
//! The graph is never serialized. Decoding rebuilds it from each
//! declaration's `enclosing` handle, so the two cannot disagree.

use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};

use crate::decl::{
    DeclKind, Declaration, ExecutableKind, Nesting, Span, TypeDeclKind, VariableKind,
};
use crate::error::CoreError;
use crate::id::{BlockId, DeclId, RefId, TypeId};
use crate::reference::{Block, BlockKind, ReferenceNode, ReferenceSite};
use crate::types::Type;

/// Edge kinds of the enclosure skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Enclosure {
    /// Source declaration lexically contains the target declaration.
    Encloses,
}

/// The semantic model of one compilation unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ModelArenas")]
pub struct SemanticModel {
    /// Compilation unit name (usually the source path).
    unit: String,
    decls: Vec<Declaration>,
    types: Vec<Type>,
    blocks: Vec<Block>,
    references: Vec<ReferenceSite>,
    /// Enclosure skeleton, node weight = the declaration's own id.
    #[serde(skip)]
    enclosure: StableGraph<DeclId, Enclosure, Directed, u32>,
}

/// Serialized form of a [`SemanticModel`]: the arenas without the graph.
#[derive(Deserialize)]
struct ModelArenas {
    unit: String,
    decls: Vec<Declaration>,
    types: Vec<Type>,
    blocks: Vec<Block>,
    references: Vec<ReferenceSite>,
}

impl TryFrom<ModelArenas> for SemanticModel {
    type Error = CoreError;

    /// Rebuilds the enclosure skeleton, rejecting dangling handles.
    fn try_from(arenas: ModelArenas) -> Result<Self, CoreError> {
        let mut model = SemanticModel {
            unit: arenas.unit,
            decls: arenas.decls,
            types: arenas.types,
            blocks: arenas.blocks,
            references: arenas.references,
            enclosure: StableGraph::new(),
        };
        for i in 0..model.decls.len() {
            model.enclosure.add_node(DeclId(i as u32));
        }
        for (i, decl) in model.decls.iter().enumerate() {
            if let Some(block) = decl.block {
                model.require_block(block)?;
            }
            if let Some(parent) = decl.enclosing {
                model.require_decl(parent)?;
                model.enclosure.add_edge(
                    NodeIndex::from(parent),
                    NodeIndex::new(i),
                    Enclosure::Encloses,
                );
            }
        }
        for block in &model.blocks {
            model.require_decl(block.owner)?;
        }
        Ok(model)
    }
}

impl SemanticModel {
    /// Creates an empty model for the named compilation unit.
    pub fn new(unit: &str) -> Self {
        SemanticModel {
            unit: unit.to_string(),
            decls: Vec::new(),
            types: Vec::new(),
            blocks: Vec::new(),
            references: Vec::new(),
            enclosure: StableGraph::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Returns the compilation unit name.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Looks up a declaration by its [`DeclId`].
    pub fn decl(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.0 as usize)
    }

    /// Looks up a type by its [`TypeId`].
    pub fn ty(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.0 as usize)
    }

    /// Looks up a block by its [`BlockId`].
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.0 as usize)
    }

    /// Looks up a reference site by its [`RefId`].
    pub fn reference(&self, id: RefId) -> Option<&ReferenceSite> {
        self.references.get(id.0 as usize)
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Iterates declaration ids in registration (source) order.
    pub fn decl_ids(&self) -> impl Iterator<Item = DeclId> + '_ {
        (0..self.decls.len() as u32).map(DeclId)
    }

    /// Iterates block ids in registration (source) order.
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.blocks.len() as u32).map(BlockId)
    }

    /// Iterates reference ids in registration order.
    pub fn reference_ids(&self) -> impl Iterator<Item = RefId> + '_ {
        (0..self.references.len() as u32).map(RefId)
    }

    /// Declarations directly enclosed by `id`, in source order.
    ///
    /// Returns an empty vec if `id` encloses nothing or does not exist.
    pub fn members(&self, id: DeclId) -> Vec<DeclId> {
        if self.decl(id).is_none() {
            return Vec::new();
        }
        let mut members: Vec<DeclId> = self
            .enclosure
            .edges_directed(id.into(), Direction::Outgoing)
            .map(|edge| DeclId::from(edge.target()))
            .collect();
        // petgraph yields the most recently added edge first.
        members.sort();
        members
    }

    /// Declarations with no enclosing declaration (packages), in source order.
    pub fn roots(&self) -> Vec<DeclId> {
        self.decl_ids()
            .filter(|&id| {
                self.enclosure
                    .edges_directed(id.into(), Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// All declarations in a pre-order walk of the enclosure skeleton.
    ///
    /// Each root is visited before its members, and members in source order,
    /// so an enclosing declaration always precedes what it contains.
    pub fn declarations_in_source_order(&self) -> Vec<DeclId> {
        let mut order = Vec::with_capacity(self.decls.len());
        let mut stack: Vec<DeclId> = self.roots().into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.members(id).into_iter().rev());
        }
        order
    }

    /// Dotted qualified name of a package or of a non-local type.
    ///
    /// Local and anonymous types, and any other declaration, contribute their
    /// simple name only; they have no qualified name of their own.
    ///
    /// Returns `None` for unknown handles and for enclosing chains that never
    /// reach a package or a local declaration.
    pub fn qualified_name(&self, id: DeclId) -> Option<String> {
        let mut segments: Vec<&str> = Vec::new();
        let mut current = id;
        loop {
            let decl = self.decl(current)?;
            match &decl.kind {
                DeclKind::Package { qualified_name } => {
                    if !qualified_name.is_empty() {
                        segments.push(qualified_name);
                    }
                    break;
                }
                DeclKind::Type {
                    nesting: Nesting::TopLevel | Nesting::Member,
                    ..
                } => {
                    segments.push(&decl.name);
                    match decl.enclosing {
                        // A chain longer than the arena revisits a declaration.
                        Some(_) if segments.len() > self.decls.len() => return None,
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
                _ => {
                    segments.push(&decl.name);
                    break;
                }
            }
        }
        segments.reverse();
        Some(segments.join("."))
    }

    // -----------------------------------------------------------------------
    // Declaration builders
    // -----------------------------------------------------------------------

    /// Adds a package. Its simple name is the last dotted segment.
    pub fn add_package(&mut self, qualified_name: &str) -> DeclId {
        let name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(qualified_name)
            .to_string();
        self.push_decl(Declaration {
            name,
            enclosing: None,
            block: None,
            kind: DeclKind::Package {
                qualified_name: qualified_name.to_string(),
            },
        })
    }

    /// Adds a top-level or member type declaration.
    ///
    /// `enclosing` must be a package (top-level) or a type (member). A fresh
    /// non-parameterized class type is registered and linked to the
    /// declaration; primitive and void pseudo-types get their own types.
    pub fn add_type(
        &mut self,
        name: &str,
        enclosing: DeclId,
        kind: TypeDeclKind,
    ) -> Result<DeclId, CoreError> {
        let parent = self.require_decl(enclosing)?;
        let nesting = match parent.kind {
            DeclKind::Package { .. } => Nesting::TopLevel,
            DeclKind::Type { .. } => Nesting::Member,
            _ => {
                return Err(CoreError::InvalidEnclosing {
                    reason: format!(
                        "type '{}' must be enclosed by a package or a type, not a {}",
                        name,
                        parent.kind_name()
                    ),
                })
            }
        };
        Ok(self.push_type_decl(name, Some(enclosing), None, kind, nesting))
    }

    /// Adds a named class declared inside `block`.
    pub fn add_local_type(
        &mut self,
        name: &str,
        block: BlockId,
        kind: TypeDeclKind,
    ) -> Result<DeclId, CoreError> {
        let owner = self.require_block(block)?.owner;
        Ok(self.push_type_decl(name, Some(owner), Some(block), kind, Nesting::Local))
    }

    /// Adds an anonymous class created inside `block`.
    pub fn add_anonymous_type(&mut self, block: BlockId) -> Result<DeclId, CoreError> {
        let owner = self.require_block(block)?.owner;
        Ok(self.push_type_decl(
            "",
            Some(owner),
            Some(block),
            TypeDeclKind::Class,
            Nesting::Anonymous,
        ))
    }

    /// Adds the anonymous class body of an enum constant (`A { ... }`).
    pub fn add_enum_constant_body(&mut self, constant: DeclId) -> Result<DeclId, CoreError> {
        let decl = self.require_decl(constant)?;
        if !matches!(
            decl.kind,
            DeclKind::Variable {
                kind: VariableKind::EnumConstant,
                ..
            }
        ) {
            return Err(CoreError::InvalidEnclosing {
                reason: format!("'{}' is not an enum constant", decl.name),
            });
        }
        Ok(self.push_type_decl(
            "",
            Some(constant),
            None,
            TypeDeclKind::Enum,
            Nesting::Anonymous,
        ))
    }

    /// Adds a field of a type.
    pub fn add_field(
        &mut self,
        name: &str,
        owner: DeclId,
        ty: Option<TypeId>,
    ) -> Result<DeclId, CoreError> {
        self.require_type_owner(name, owner)?;
        self.require_opt_type(ty)?;
        Ok(self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: Some(owner),
            block: None,
            kind: DeclKind::Variable {
                kind: VariableKind::Field,
                ty,
            },
        }))
    }

    /// Adds an enum constant. Its type is the enum's own type.
    pub fn add_enum_constant(&mut self, name: &str, owner: DeclId) -> Result<DeclId, CoreError> {
        self.require_type_owner(name, owner)?;
        let ty = self.require_decl(owner)?.ty();
        Ok(self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: Some(owner),
            block: None,
            kind: DeclKind::Variable {
                kind: VariableKind::EnumConstant,
                ty,
            },
        }))
    }

    /// Adds a block-scoped variable (local, parameter, exception parameter or
    /// resource variable) declared in `block`.
    pub fn add_local(
        &mut self,
        name: &str,
        kind: VariableKind,
        block: BlockId,
        ty: Option<TypeId>,
    ) -> Result<DeclId, CoreError> {
        if !kind.is_block_scoped() {
            return Err(CoreError::InvalidEnclosing {
                reason: format!("variable '{}' of kind {:?} is not block scoped", name, kind),
            });
        }
        let owner = self.require_block(block)?.owner;
        self.require_opt_type(ty)?;
        Ok(self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: Some(owner),
            block: Some(block),
            kind: DeclKind::Variable { kind, ty },
        }))
    }

    /// Adds a method of a type. Its method type is attached with
    /// [`set_type`](Self::set_type) once parameters are known.
    pub fn add_method(&mut self, name: &str, owner: DeclId) -> Result<DeclId, CoreError> {
        self.push_executable(name, owner, ExecutableKind::Method, false)
    }

    /// Adds a constructor. `implicit` marks a compiler-synthesized default
    /// constructor with no source declaration.
    pub fn add_constructor(&mut self, owner: DeclId, implicit: bool) -> Result<DeclId, CoreError> {
        self.push_executable("<init>", owner, ExecutableKind::Constructor, implicit)
    }

    /// Adds a type parameter to a generic type or executable and registers its
    /// type variable. Returns the declaration and the variable's type.
    ///
    /// The bound is attached separately with
    /// [`set_upper_bound`](Self::set_upper_bound) because it may mention the
    /// variable itself (`T extends Comparable<T>`).
    pub fn add_type_parameter(
        &mut self,
        name: &str,
        owner: DeclId,
    ) -> Result<(DeclId, TypeId), CoreError> {
        let parent = self.require_decl(owner)?;
        if !matches!(parent.kind, DeclKind::Type { .. } | DeclKind::Executable { .. }) {
            return Err(CoreError::InvalidEnclosing {
                reason: format!(
                    "type parameter '{}' must be declared by a type or an executable",
                    name
                ),
            });
        }
        let decl = self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: Some(owner),
            block: None,
            kind: DeclKind::TypeParameter { ty: None },
        });
        let var = self.push_type(Type::TypeVar {
            decl,
            upper_bound: None,
        });
        self.decls[decl.0 as usize].kind = DeclKind::TypeParameter { ty: Some(var) };
        if let DeclKind::Executable { type_params, .. } = &mut self.decls[owner.0 as usize].kind {
            type_params.push(decl);
        }
        Ok((decl, var))
    }

    /// Adds a type parameter whose declared type was erased by the front end.
    pub fn add_erased_type_parameter(
        &mut self,
        name: &str,
        owner: DeclId,
    ) -> Result<DeclId, CoreError> {
        let (decl, _) = self.add_type_parameter(name, owner)?;
        self.decls[decl.0 as usize].kind = DeclKind::TypeParameter { ty: None };
        Ok(decl)
    }

    /// Adds a declaration of a kind the front end does not classify.
    pub fn add_unknown(&mut self, name: &str, enclosing: DeclId) -> Result<DeclId, CoreError> {
        self.require_decl(enclosing)?;
        Ok(self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: Some(enclosing),
            block: None,
            kind: DeclKind::Unknown,
        }))
    }

    /// Adds a primitive or `void` pseudo-type declaration. These have no
    /// enclosing declaration.
    pub fn add_primitive_decl(&mut self, name: &str) -> DeclId {
        let kind = if name == "void" {
            TypeDeclKind::Void
        } else {
            TypeDeclKind::Primitive
        };
        let ty = if kind == TypeDeclKind::Void {
            Type::Void
        } else {
            Type::Primitive {
                name: name.to_string(),
            }
        };
        let ty = self.push_type(ty);
        self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: None,
            block: None,
            kind: DeclKind::Type {
                kind,
                nesting: Nesting::TopLevel,
                ty: Some(ty),
            },
        })
    }

    /// Sets the type of a declaration (variable type, method type, ...).
    pub fn set_type(&mut self, id: DeclId, ty: TypeId) -> Result<(), CoreError> {
        self.require_type(ty)?;
        self.require_decl(id)?;
        match &mut self.decls[id.0 as usize].kind {
            DeclKind::Type { ty: slot, .. }
            | DeclKind::Variable { ty: slot, .. }
            | DeclKind::Executable { ty: slot, .. }
            | DeclKind::TypeParameter { ty: slot } => {
                *slot = Some(ty);
                Ok(())
            }
            DeclKind::Package { .. } | DeclKind::Unknown => Err(CoreError::InvalidEnclosing {
                reason: format!("declaration {} cannot carry a type", id),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Type builders
    // -----------------------------------------------------------------------

    /// Registers a type expression and returns its new identity.
    ///
    /// Every call creates a new identity, even for a structurally equal type.
    /// Handles referenced by `ty` must already exist.
    pub fn add_ty(&mut self, ty: Type) -> Result<TypeId, CoreError> {
        self.validate_type(&ty)?;
        Ok(self.push_type(ty))
    }

    /// Attaches an upper bound to a type variable created by
    /// [`add_type_parameter`](Self::add_type_parameter).
    pub fn set_upper_bound(&mut self, var: TypeId, bound: TypeId) -> Result<(), CoreError> {
        self.require_type(bound)?;
        match self.types.get_mut(var.0 as usize) {
            Some(Type::TypeVar { upper_bound, .. }) => {
                *upper_bound = Some(bound);
                Ok(())
            }
            Some(_) => Err(CoreError::InvalidEnclosing {
                reason: format!("type {} is not a type variable", var),
            }),
            None => Err(CoreError::TypeNotFound { id: var }),
        }
    }

    /// Registers a class type for `decl` applied to `type_args`.
    pub fn class_type(
        &mut self,
        decl: DeclId,
        type_args: &[TypeId],
    ) -> Result<TypeId, CoreError> {
        self.add_ty(Type::Class {
            decl,
            enclosing: None,
            type_args: type_args.iter().copied().collect(),
        })
    }

    /// Registers a method type with the given parameter types.
    pub fn method_type(
        &mut self,
        params: &[TypeId],
        return_type: Option<TypeId>,
    ) -> Result<TypeId, CoreError> {
        self.add_ty(Type::Method {
            params: params.iter().copied().collect(),
            return_type,
        })
    }

    /// Registers a primitive type.
    pub fn primitive(&mut self, name: &str) -> TypeId {
        self.push_type(Type::Primitive {
            name: name.to_string(),
        })
    }

    // -----------------------------------------------------------------------
    // Blocks and reference sites
    // -----------------------------------------------------------------------

    /// Registers a lexical block owned by an executable (bodies) or a type
    /// (initializers). Blocks must be registered in source order.
    ///
    /// A [`BlockKind::Nested`] block names its parent block, which must have
    /// the same owner; every other kind opens a fresh block tree.
    pub fn add_block(
        &mut self,
        owner: DeclId,
        kind: BlockKind,
        parent: Option<BlockId>,
    ) -> Result<BlockId, CoreError> {
        let decl = self.require_decl(owner)?;
        let owner_ok = match kind {
            BlockKind::Body => matches!(decl.kind, DeclKind::Executable { .. }),
            BlockKind::Initializer | BlockKind::StaticInitializer => decl.is_type(),
            BlockKind::Nested => true,
        };
        if !owner_ok {
            return Err(CoreError::InvalidEnclosing {
                reason: format!("a {:?} block cannot belong to a {}", kind, decl.kind_name()),
            });
        }
        match (kind, parent) {
            (BlockKind::Nested, Some(parent)) => {
                if self.require_block(parent)?.owner != owner {
                    return Err(CoreError::InvalidEnclosing {
                        reason: format!("nested block and block {} have different owners", parent),
                    });
                }
            }
            (BlockKind::Nested, None) => {
                return Err(CoreError::InvalidEnclosing {
                    reason: "nested block without a parent block".to_string(),
                })
            }
            (_, Some(parent)) => {
                return Err(CoreError::InvalidEnclosing {
                    reason: format!("a {:?} block cannot be nested in block {}", kind, parent),
                })
            }
            (_, None) => {}
        }
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block {
            owner,
            kind,
            parent,
        });
        Ok(id)
    }

    /// Registers a reference site.
    pub fn add_reference(
        &mut self,
        node: ReferenceNode,
        span: Option<Span>,
        parent: Option<RefId>,
    ) -> Result<RefId, CoreError> {
        match &node {
            ReferenceNode::MemberAccess {
                owner_type,
                member,
                ty,
                ..
            } => {
                self.require_type(*owner_type)?;
                self.require_decl(*member)?;
                self.require_type(*ty)?;
            }
            ReferenceNode::Identifier { symbol, ty, .. } => {
                self.require_decl(*symbol)?;
                self.require_type(*ty)?;
            }
            ReferenceNode::Wildcard { ty }
            | ReferenceNode::ParameterizedType { ty }
            | ReferenceNode::ArrayType { ty } => {
                self.require_type(*ty)?;
            }
        }
        if let Some(parent) = parent {
            if self.reference(parent).is_none() {
                return Err(CoreError::ReferenceNotFound { id: parent });
            }
        }
        let id = RefId(self.references.len() as u32);
        self.references.push(ReferenceSite { node, span, parent });
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn push_decl(&mut self, decl: Declaration) -> DeclId {
        let enclosing = decl.enclosing;
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        let idx = self.enclosure.add_node(id);
        debug_assert_eq!(DeclId::from(idx), id);
        if let Some(parent) = enclosing {
            self.enclosure
                .add_edge(NodeIndex::from(parent), idx, Enclosure::Encloses);
        }
        id
    }

    fn push_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    fn push_type_decl(
        &mut self,
        name: &str,
        enclosing: Option<DeclId>,
        block: Option<BlockId>,
        kind: TypeDeclKind,
        nesting: Nesting,
    ) -> DeclId {
        let decl = self.push_decl(Declaration {
            name: name.to_string(),
            enclosing,
            block,
            kind: DeclKind::Type {
                kind,
                nesting,
                ty: None,
            },
        });
        let ty = match kind {
            TypeDeclKind::Primitive => Type::Primitive {
                name: name.to_string(),
            },
            TypeDeclKind::Void => Type::Void,
            _ => Type::Class {
                decl,
                enclosing: None,
                type_args: Default::default(),
            },
        };
        let ty = self.push_type(ty);
        if let DeclKind::Type { ty: slot, .. } = &mut self.decls[decl.0 as usize].kind {
            *slot = Some(ty);
        }
        decl
    }

    fn push_executable(
        &mut self,
        name: &str,
        owner: DeclId,
        kind: ExecutableKind,
        implicit: bool,
    ) -> Result<DeclId, CoreError> {
        self.require_type_owner(name, owner)?;
        Ok(self.push_decl(Declaration {
            name: name.to_string(),
            enclosing: Some(owner),
            block: None,
            kind: DeclKind::Executable {
                kind,
                type_params: Vec::new(),
                ty: None,
                implicit,
            },
        }))
    }

    fn require_decl(&self, id: DeclId) -> Result<&Declaration, CoreError> {
        self.decl(id).ok_or(CoreError::DeclNotFound { id })
    }

    fn require_type(&self, id: TypeId) -> Result<&Type, CoreError> {
        self.ty(id).ok_or(CoreError::TypeNotFound { id })
    }

    fn require_opt_type(&self, id: Option<TypeId>) -> Result<(), CoreError> {
        match id {
            Some(id) => self.require_type(id).map(|_| ()),
            None => Ok(()),
        }
    }

    fn require_block(&self, id: BlockId) -> Result<&Block, CoreError> {
        self.block(id).ok_or(CoreError::BlockNotFound { id })
    }

    fn require_type_owner(&self, member: &str, owner: DeclId) -> Result<(), CoreError> {
        let parent = self.require_decl(owner)?;
        if parent.is_type() {
            Ok(())
        } else {
            Err(CoreError::InvalidEnclosing {
                reason: format!(
                    "member '{}' must be enclosed by a type, not a {}",
                    member,
                    parent.kind_name()
                ),
            })
        }
    }

    fn validate_type(&self, ty: &Type) -> Result<(), CoreError> {
        match ty {
            Type::Primitive { .. }
            | Type::Void
            | Type::Error { .. }
            | Type::Captured
            | Type::Undetermined => Ok(()),
            Type::Array { component, .. } => self.require_type(*component).map(|_| ()),
            Type::Class {
                decl,
                enclosing,
                type_args,
            } => {
                self.require_decl(*decl)?;
                self.require_opt_type(*enclosing)?;
                type_args
                    .iter()
                    .try_for_each(|arg| self.require_type(*arg).map(|_| ()))
            }
            Type::Method {
                params,
                return_type,
            } => {
                self.require_opt_type(*return_type)?;
                params
                    .iter()
                    .try_for_each(|p| self.require_type(*p).map(|_| ()))
            }
            Type::TypeVar { decl, upper_bound } => {
                self.require_decl(*decl)?;
                self.require_opt_type(*upper_bound)
            }
            Type::Intersection {
                supertype,
                interfaces,
            } => {
                self.require_opt_type(*supertype)?;
                interfaces
                    .iter()
                    .try_for_each(|i| self.require_type(*i).map(|_| ()))
            }
            Type::Wildcard { bound, .. } => self.require_opt_type(*bound),
            Type::Forall { type_vars, method } => {
                self.require_type(*method)?;
                type_vars
                    .iter()
                    .try_for_each(|v| self.require_type(*v).map(|_| ()))
            }
            Type::Package { decl } => self.require_decl(*decl).map(|_| ()),
        }
    }
}
