//! Declaration signatures.

use xrefsig_core::{
    DeclId, DeclKind, Declaration, ExecutableKind, Nesting, SemanticModel, Type, TypeDeclKind,
    TypeId,
};

use super::{SignatureEngine, Walk};
use crate::error::SignatureError;

impl<'m> SignatureEngine<'m> {
    pub(super) fn render_decl(
        &mut self,
        id: DeclId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let model = self.model;
        let decl = model.decl(id).ok_or(SignatureError::DeclNotFound { id })?;
        match &decl.kind {
            DeclKind::Package { qualified_name } => {
                out.push_str(qualified_name);
                Ok(())
            }
            DeclKind::Type { kind, nesting, .. } => {
                self.render_type_decl(id, decl, *kind, *nesting, walk, out)
            }
            DeclKind::Variable { kind, .. } => {
                if kind.is_block_scoped() {
                    let block = self.scopes.enclosing_block(id, decl)?;
                    self.block_signature(block, walk, out)?;
                    out.push('#');
                } else {
                    self.enclosing_signature(id, decl, walk, out)?;
                    out.push('.');
                }
                out.push_str(&decl.name);
                Ok(())
            }
            DeclKind::Executable {
                kind,
                type_params,
                ty,
                ..
            } => {
                let ty = ty.ok_or_else(|| {
                    SignatureError::malformed(format!("executable '{}' has no type", decl.name))
                })?;
                self.enclosing_signature(id, decl, walk, out)?;
                out.push('.');
                if type_params.is_empty() {
                    return self.render_executable_tail(decl, *kind, ty, walk, out);
                }
                walk.bind(type_params.clone());
                let result = self
                    .render_type_parameters(type_params, walk, out)
                    .and_then(|()| self.render_executable_tail(decl, *kind, ty, walk, out));
                walk.unbind();
                result
            }
            DeclKind::TypeParameter { ty } => match ty {
                Some(var) => self.render_type_parameter(id, decl, *var, walk, out),
                // Erased: no signature.
                None => Ok(()),
            },
            DeclKind::Unknown => Ok(()),
        }
    }

    fn render_type_decl(
        &mut self,
        id: DeclId,
        decl: &Declaration,
        kind: TypeDeclKind,
        nesting: Nesting,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        match (nesting, kind) {
            // The anonymous body of an enum constant is the constant itself.
            (Nesting::Anonymous, TypeDeclKind::Enum) => {
                let constant = decl.enclosing.ok_or_else(|| {
                    SignatureError::malformed("enum constant body without a constant")
                })?;
                self.decl_signature(constant, walk, out)
            }
            (Nesting::Anonymous, _) => self.anonymous_signature(id, decl, walk, out),
            (_, TypeDeclKind::Primitive | TypeDeclKind::Void) => {
                out.push_str(&decl.name);
                Ok(())
            }
            _ => {
                self.enclosing_signature(id, decl, walk, out)?;
                out.push('.');
                out.push_str(&decl.name);
                Ok(())
            }
        }
    }

    /// `<T,U extends Bound>`, rendered with the parameters already bound.
    fn render_type_parameters(
        &mut self,
        type_params: &[DeclId],
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        out.push('<');
        for (i, param) in type_params.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.decl_signature(*param, walk, out)?;
        }
        out.push('>');
        Ok(())
    }

    /// Name and parameter list of a method or constructor.
    fn render_executable_tail(
        &mut self,
        decl: &Declaration,
        kind: ExecutableKind,
        ty: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        match kind {
            ExecutableKind::Constructor => {
                let (_, owner) = self.enclosing_decl(decl)?;
                out.push_str(&owner.name);
            }
            ExecutableKind::Method => out.push_str(&decl.name),
        }
        self.type_signature(ty, walk, out)
    }

    /// `T`, `T extends Bound` or `T extends A&B`.
    ///
    /// The parameter binds itself while its bound renders, so a self-referential
    /// bound (`T extends Comparable<T>`) mentions `T` by bare name.
    fn render_type_parameter(
        &mut self,
        id: DeclId,
        decl: &Declaration,
        var: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let bound = match self.model.ty(var) {
            Some(Type::TypeVar { upper_bound, .. }) => *upper_bound,
            Some(other) => {
                return Err(SignatureError::malformed(format!(
                    "type parameter '{}' declares a {} type",
                    decl.name,
                    other.variant_name()
                )))
            }
            None => return Err(SignatureError::TypeNotFound { id: var }),
        };
        out.push_str(&decl.name);
        let Some(bound) = bound else {
            return Ok(());
        };
        walk.bind(vec![id]);
        let result = self.render_bound(bound, walk, out);
        walk.unbind();
        result
    }

    fn render_bound(
        &mut self,
        bound: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let model = self.model;
        match model.ty(bound).ok_or(SignatureError::TypeNotFound { id: bound })? {
            Type::Intersection {
                supertype,
                interfaces,
            } => {
                let parts: Vec<TypeId> =
                    supertype.iter().chain(interfaces.iter()).copied().collect();
                if parts.is_empty() {
                    return Ok(());
                }
                out.push_str(" extends ");
                self.render_type_list(&parts, '&', walk, out)
            }
            Type::Class {
                decl, type_args, ..
            } if type_args.is_empty() && self.is_universal_base(*decl) => Ok(()),
            _ => {
                out.push_str(" extends ");
                self.type_signature(bound, walk, out)
            }
        }
    }

    fn is_universal_base(&self, decl: DeclId) -> bool {
        self.model
            .qualified_name(decl)
            .is_some_and(|name| name == self.config.universal_base)
    }

    /// Signature of the context a declaration lives in: its block when it is
    /// local to one, its enclosing declaration otherwise.
    pub(crate) fn enclosing_signature(
        &mut self,
        id: DeclId,
        decl: &Declaration,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        if self.scopes.is_in_block(decl) {
            let block = self.scopes.enclosing_block(id, decl)?;
            return self.block_signature(block, walk, out);
        }
        let parent = decl.enclosing.ok_or_else(|| {
            SignatureError::malformed(format!("'{}' has no enclosing declaration", decl.name))
        })?;
        self.decl_signature(parent, walk, out)
    }

    /// The enclosing declaration of `decl`, with its id.
    pub(crate) fn enclosing_decl(
        &self,
        decl: &Declaration,
    ) -> Result<(DeclId, &'m Declaration), SignatureError> {
        let parent = decl.enclosing.ok_or_else(|| {
            SignatureError::malformed(format!("'{}' has no enclosing declaration", decl.name))
        })?;
        let model: &'m SemanticModel = self.model;
        let owner = model
            .decl(parent)
            .ok_or(SignatureError::DeclNotFound { id: parent })?;
        Ok((parent, owner))
    }

    pub(super) fn render_default_constructor(
        &mut self,
        ctor: DeclId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let model = self.model;
        let decl = model
            .decl(ctor)
            .ok_or(SignatureError::DeclNotFound { id: ctor })?;
        let (owner_id, owner) = self.enclosing_decl(decl)?;
        self.decl_signature(owner_id, walk, out)?;
        out.push('.');
        out.push_str(&owner.name);
        out.push_str("()");
        Ok(())
    }
}
