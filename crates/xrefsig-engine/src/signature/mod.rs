//! Canonical signature generation for declarations, types and reference sites.
//!
//! A [`SignatureEngine`] is bound to the [`SemanticModel`] of exactly one
//! compilation unit. It computes hierarchical, deterministic string keys:
//!
//! - [`signature_of_decl`](SignatureEngine::signature_of_decl): `pkg.Outer.foo(int,java.lang.String)`
//! - [`signature_of_type`](SignatureEngine::signature_of_type): `pkg.Box<java.lang.String>`
//! - [`signature_of_reference`](SignatureEngine::signature_of_reference): a use
//!   site, e.g. `pkg.Box<java.lang.String>:type-specialization`
//!
//! # Memoization
//!
//! Declaration and type signatures are cached by identity handle, never by
//! structure. A fragment rendered while a type variable was bound by an
//! *enclosing* construct (so it contains that variable's bare name) is
//! context-dependent and is not cached; everything else is computed once per
//! engine.
//!
//! # Failure boundary
//!
//! Every public entry point runs the traversal with a fresh [`Walk`] and turns
//! any [`SignatureError`] into `None`, logging it at `debug` level. An empty
//! result (captured/inference types, erased type parameters, unknown
//! declaration kinds) is also reported as `None`.
//!
//! # Lifecycle
//!
//! The engine borrows its model for its whole lifetime and every request takes
//! `&mut self`, so reentrant or concurrent use of one instance does not
//! compile. Create one engine per compilation unit and drop it with the unit.

mod blocks;
mod decls;
mod references;
mod types;

use std::collections::{HashMap, HashSet};

use xrefsig_core::{BlockId, DeclId, RefId, ReferenceNode, SemanticModel, TypeId};

use crate::config::EngineConfig;
use crate::error::{SignatureError, Subject};
use crate::scope::ScopeAllocator;

/// Suffix appended to signatures of type specialization use sites.
///
/// Downstream consumers of graph facts recognize specialization nodes by it.
pub const TYPE_SPECIALIZATION_SUFFIX: &str = ":type-specialization";

/// Prefix of the placeholder signature of an unresolved type.
pub const ERROR_TYPE: &str = "ERROR-TYPE";

// Do not decrease this number.
const SIGNATURE_CAPACITY: usize = 512;

/// Returns the type signature suffixed for type specializations.
pub fn make_type_specialization_signature(signature: &str) -> String {
    format!("{}{}", signature, TYPE_SPECIALIZATION_SUFFIX)
}

/// Signature generator for one compilation unit.
#[derive(Debug)]
pub struct SignatureEngine<'m> {
    model: &'m SemanticModel,
    config: EngineConfig,
    scopes: ScopeAllocator,
    decl_cache: HashMap<DeclId, String>,
    type_cache: HashMap<TypeId, String>,
    block_cache: HashMap<BlockId, String>,
}

impl<'m> SignatureEngine<'m> {
    /// Creates an engine with empty caches for `model`'s compilation unit.
    pub fn new(model: &'m SemanticModel, config: EngineConfig) -> Self {
        SignatureEngine {
            model,
            config,
            scopes: ScopeAllocator::new(model),
            decl_cache: HashMap::new(),
            type_cache: HashMap::new(),
            block_cache: HashMap::new(),
        }
    }

    /// Name of the compilation unit this engine is bound to.
    pub fn unit(&self) -> &'m str {
        self.model.unit()
    }

    /// The model this engine computes signatures for.
    pub fn model(&self) -> &'m SemanticModel {
        self.model
    }

    /// Returns the signature of a declaration.
    pub fn signature_of_decl(&mut self, id: DeclId) -> Option<String> {
        self.run(Subject::Decl(id), |engine, walk, out| {
            engine.decl_signature(id, walk, out)
        })
    }

    /// Returns the signature of a type.
    pub fn signature_of_type(&mut self, id: TypeId) -> Option<String> {
        self.run(Subject::Type(id), |engine, walk, out| {
            engine.type_signature(id, walk, out)
        })
    }

    /// Returns the specialization signature of a registered reference site.
    ///
    /// Reference signatures depend on the use position and are not cached.
    pub fn signature_of_reference(&mut self, id: RefId) -> Option<String> {
        let model = self.model;
        self.run(Subject::Reference(id), |engine, walk, out| {
            let site = model
                .reference(id)
                .ok_or(SignatureError::ReferenceNotFound { id })?;
            engine.render_reference(&site.node, walk, out)
        })
    }

    /// Returns the specialization signature of a reference node that is not
    /// registered in the model.
    pub fn signature_of_reference_node(&mut self, node: &ReferenceNode) -> Option<String> {
        let subject = match node {
            ReferenceNode::MemberAccess { member, .. } => Subject::Decl(*member),
            ReferenceNode::Identifier { symbol, .. } => Subject::Decl(*symbol),
            ReferenceNode::Wildcard { ty }
            | ReferenceNode::ParameterizedType { ty }
            | ReferenceNode::ArrayType { ty } => Subject::Type(*ty),
        };
        self.run(subject, |engine, walk, out| {
            engine.render_reference(node, walk, out)
        })
    }

    /// Synthesizes the signature of a constructor that exists in the model
    /// but has no source declaration: `<type signature>.<SimpleName>()`.
    pub fn default_constructor_signature(&mut self, ctor: DeclId) -> Option<String> {
        self.run(Subject::Decl(ctor), |engine, walk, out| {
            engine.render_default_constructor(ctor, walk, out)
        })
    }

    /// Failure boundary shared by all entry points.
    fn run<F>(&mut self, subject: Subject, render: F) -> Option<String>
    where
        F: FnOnce(&mut Self, &mut Walk, &mut String) -> Result<(), SignatureError>,
    {
        let mut walk = Walk::default();
        let mut out = String::with_capacity(SIGNATURE_CAPACITY);
        match render(self, &mut walk, &mut out) {
            Ok(()) if out.is_empty() => {
                tracing::debug!(unit = self.model.unit(), %subject, "empty signature");
                None
            }
            Ok(()) => Some(out),
            Err(error) => {
                tracing::debug!(
                    unit = self.model.unit(),
                    %subject,
                    %error,
                    "no signature"
                );
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Memoized traversal nodes
    // -----------------------------------------------------------------------

    pub(crate) fn decl_signature(
        &mut self,
        id: DeclId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        if let Some(cached) = self.decl_cache.get(&id) {
            out.push_str(cached);
            return Ok(());
        }
        let frame = walk.enter(Subject::Decl(id))?;
        let mut sb = String::new();
        let result = self.render_decl(id, walk, &mut sb);
        let open = walk.leave(frame);
        result?;
        out.push_str(&sb);
        if !open {
            self.decl_cache.insert(id, sb);
        }
        Ok(())
    }

    pub(crate) fn type_signature(
        &mut self,
        id: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        if self.render_uncached_type(id, walk, out)? {
            return Ok(());
        }
        if let Some(cached) = self.type_cache.get(&id) {
            out.push_str(cached);
            return Ok(());
        }
        let frame = walk.enter(Subject::Type(id))?;
        let mut sb = String::new();
        let result = self.render_type(id, walk, &mut sb);
        let open = walk.leave(frame);
        result?;
        out.push_str(&sb);
        if !open {
            self.type_cache.insert(id, sb);
        }
        Ok(())
    }

    pub(crate) fn block_signature(
        &mut self,
        id: BlockId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        if let Some(cached) = self.block_cache.get(&id) {
            out.push_str(cached);
            return Ok(());
        }
        let frame = walk.enter(Subject::Block(id))?;
        let mut sb = String::new();
        let result = self.render_block(id, walk, &mut sb);
        let open = walk.leave(frame);
        result?;
        out.push_str(&sb);
        if !open {
            self.block_cache.insert(id, sb);
        }
        Ok(())
    }

    /// Renders `ids` separated by `separator`.
    fn render_type_list(
        &mut self,
        ids: &[TypeId],
        separator: char,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            self.type_signature(*id, walk, out)?;
        }
        Ok(())
    }
}

/// Per-request traversal state.
///
/// `bounded` is a stack of scopes of type variables (identified by their
/// type-parameter declaration) currently bound by the construct being
/// rendered; such variables render as bare names. `in_progress` holds the
/// nodes on the current path together with the variables bound when each was
/// entered. Reaching a node again under the same bindings is reported as a
/// cycle instead of recursing forever.
///
/// A node may legitimately be re-entered once more variables are bound: a
/// generic method's parameter types mention its own type variables, and
/// naming a free one requires the method's signature.
#[derive(Debug, Default)]
pub(crate) struct Walk {
    bounded: Vec<Vec<DeclId>>,
    /// Lowest scope level a bare variable rendering resolved to since the
    /// innermost open frame was entered.
    min_bare: Option<usize>,
    in_progress: HashSet<(Subject, Vec<DeclId>)>,
}

/// Bookkeeping for one memoized node on the traversal path.
#[derive(Debug)]
pub(crate) struct Frame {
    key: (Subject, Vec<DeclId>),
    depth: usize,
    saved_min: Option<usize>,
}

impl Walk {
    pub(crate) fn enter(&mut self, subject: Subject) -> Result<Frame, SignatureError> {
        let key = (subject, self.bound_vars());
        if self.in_progress.contains(&key) {
            return Err(SignatureError::Cycle { node: subject });
        }
        self.in_progress.insert(key.clone());
        Ok(Frame {
            key,
            depth: self.bounded.len(),
            saved_min: self.min_bare.take(),
        })
    }

    /// Closes `frame`. Returns `true` when the fragment rendered inside it
    /// mentions a variable bound outside it, i.e. it must not be cached.
    pub(crate) fn leave(&mut self, frame: Frame) -> bool {
        self.in_progress.remove(&frame.key);
        let inner = self.min_bare;
        self.min_bare = match (frame.saved_min, inner) {
            (Some(outer), Some(inner)) => Some(outer.min(inner)),
            (outer, inner) => outer.or(inner),
        };
        inner.is_some_and(|level| level < frame.depth)
    }

    /// Opens a scope binding `vars`.
    pub(crate) fn bind(&mut self, vars: Vec<DeclId>) {
        self.bounded.push(vars);
    }

    /// Closes the innermost scope; outer bindings are visible again.
    pub(crate) fn unbind(&mut self) {
        self.bounded.pop();
    }

    /// Level of the innermost scope binding `var`, if any.
    pub(crate) fn binding_level(&self, var: DeclId) -> Option<usize> {
        self.bounded.iter().rposition(|scope| scope.contains(&var))
    }

    pub(crate) fn note_bare(&mut self, level: usize) {
        self.min_bare = Some(self.min_bare.map_or(level, |min| min.min(level)));
    }

    /// Distinct variables bound in any open scope, sorted.
    fn bound_vars(&self) -> Vec<DeclId> {
        let mut vars: Vec<DeclId> = self.bounded.iter().flatten().copied().collect();
        vars.sort();
        vars.dedup();
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialization_signature_appends_suffix() {
        assert_eq!(
            make_type_specialization_signature("pkg.Box<java.lang.String>"),
            "pkg.Box<java.lang.String>:type-specialization"
        );
    }

    #[test]
    fn walk_rejects_reentering_a_node() {
        let mut walk = Walk::default();
        let frame = walk.enter(Subject::Decl(DeclId(1))).unwrap();
        assert_eq!(
            walk.enter(Subject::Decl(DeclId(1))).unwrap_err(),
            SignatureError::Cycle {
                node: Subject::Decl(DeclId(1))
            }
        );
        walk.leave(frame);
        assert!(walk.enter(Subject::Decl(DeclId(1))).is_ok());
    }

    #[test]
    fn walk_allows_reentry_under_new_bindings() {
        let mut walk = Walk::default();
        let _outer = walk.enter(Subject::Type(TypeId(7))).unwrap();
        walk.bind(vec![DeclId(2)]);
        let inner = walk.enter(Subject::Type(TypeId(7))).unwrap();
        // Rebinding the same variable in a nested scope changes nothing.
        walk.bind(vec![DeclId(2)]);
        assert!(walk.enter(Subject::Type(TypeId(7))).is_err());
        walk.unbind();
        walk.leave(inner);
    }

    #[test]
    fn innermost_scope_wins_and_outer_survives_pop() {
        let mut walk = Walk::default();
        walk.bind(vec![DeclId(5)]);
        walk.bind(vec![DeclId(5), DeclId(6)]);
        assert_eq!(walk.binding_level(DeclId(5)), Some(1));
        walk.unbind();
        assert_eq!(walk.binding_level(DeclId(5)), Some(0));
        assert_eq!(walk.binding_level(DeclId(6)), None);
    }

    #[test]
    fn fragment_using_outer_binding_is_open() {
        let mut walk = Walk::default();
        walk.bind(vec![DeclId(5)]);

        let frame = walk.enter(Subject::Type(TypeId(1))).unwrap();
        walk.note_bare(0);
        assert!(walk.leave(frame));
    }

    #[test]
    fn fragment_using_own_binding_is_closed() {
        let mut walk = Walk::default();
        let outer = walk.enter(Subject::Decl(DeclId(1))).unwrap();

        let frame = walk.enter(Subject::Decl(DeclId(2))).unwrap();
        walk.bind(vec![DeclId(2)]);
        walk.note_bare(0);
        walk.unbind();
        assert!(!walk.leave(frame));

        // The enclosing frame bound nothing itself, and the bare use sits at a
        // level it opened; it stays closed too.
        assert!(!walk.leave(outer));
    }
}
