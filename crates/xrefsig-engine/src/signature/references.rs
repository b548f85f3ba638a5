//! Specialization signatures of reference sites.
//!
//! These depend on the use position, so nothing here is cached; the
//! declarations and types a reference resolves to still go through the
//! memoized traversal.

use xrefsig_core::{DeclId, ReferenceNode, TypeId};

use super::{SignatureEngine, Walk, TYPE_SPECIALIZATION_SUFFIX};
use crate::error::SignatureError;

impl<'m> SignatureEngine<'m> {
    pub(super) fn render_reference(
        &mut self,
        node: &ReferenceNode,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        match node {
            ReferenceNode::MemberAccess {
                owner_type,
                member,
                name,
                ty,
            } => {
                self.type_signature(*owner_type, walk, out)?;
                out.push('.');
                // A generic member's type is rendered through its method type.
                let ty = self.model.ty(*ty).and_then(|t| t.delegate()).unwrap_or(*ty);
                self.render_member(*member, name, ty, walk, out)
            }
            ReferenceNode::Identifier { symbol, name, ty } => {
                let decl = self
                    .model
                    .decl(*symbol)
                    .ok_or(SignatureError::DeclNotFound { id: *symbol })?;
                let owner = decl.enclosing.ok_or_else(|| {
                    SignatureError::malformed(format!("symbol '{}' has no owner", decl.name))
                })?;
                self.decl_signature(owner, walk, out)?;
                out.push('.');
                self.render_member(*symbol, name, *ty, walk, out)
            }
            ReferenceNode::Wildcard { ty } => {
                out.push('<');
                self.type_signature(*ty, walk, out)?;
                out.push('>');
                Ok(())
            }
            ReferenceNode::ParameterizedType { ty } => {
                self.type_signature(*ty, walk, out)?;
                out.push_str(TYPE_SPECIALIZATION_SUFFIX);
                Ok(())
            }
            ReferenceNode::ArrayType { ty } => self.type_signature(*ty, walk, out),
        }
    }

    /// Methods contribute name and parameter types, fields their name, and
    /// anything else nothing.
    fn render_member(
        &mut self,
        member: DeclId,
        name: &str,
        ty: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let decl = self
            .model
            .decl(member)
            .ok_or(SignatureError::DeclNotFound { id: member })?;
        if decl.is_method() {
            out.push_str(name);
            self.type_signature(ty, walk, out)?;
        } else if decl.is_field() {
            out.push_str(name);
        }
        Ok(())
    }
}
