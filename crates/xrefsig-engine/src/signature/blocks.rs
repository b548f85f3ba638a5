//! Block-scoped signatures, backed by the [`ScopeAllocator`](crate::scope::ScopeAllocator).

use xrefsig_core::{BlockId, DeclId, Declaration};

use super::{SignatureEngine, Walk};
use crate::error::{SignatureError, Subject};
use crate::scope::{ANONYMOUS, BLOCK};

impl<'m> SignatureEngine<'m> {
    /// Signature of the innermost block containing `decl`:
    /// `<owner signature>/block<n>`.
    pub fn block_signature_of(&mut self, decl: DeclId) -> Option<String> {
        let model = self.model;
        self.run(Subject::Decl(decl), |engine, walk, out| {
            let d = model
                .decl(decl)
                .ok_or(SignatureError::DeclNotFound { id: decl })?;
            let block = engine.scopes.enclosing_block(decl, d)?;
            engine.block_signature(block, walk, out)
        })
    }

    /// Signature of an anonymous class: `<block signature>/anonymous<n>`.
    pub fn anonymous_signature_of(&mut self, decl: DeclId) -> Option<String> {
        let model = self.model;
        self.run(Subject::Decl(decl), |engine, walk, out| {
            let d = model
                .decl(decl)
                .ok_or(SignatureError::DeclNotFound { id: decl })?;
            engine.anonymous_signature(decl, d, walk, out)
        })
    }

    /// Returns `true` if `decl` exists and is declared inside a block.
    pub fn is_in_block(&self, decl: DeclId) -> bool {
        self.model
            .decl(decl)
            .is_some_and(|d| self.scopes.is_in_block(d))
    }

    pub(super) fn render_block(
        &mut self,
        id: BlockId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let model = self.model;
        let block = model.block(id).ok_or(SignatureError::BlockNotFound { id })?;
        let ordinal = self
            .scopes
            .block_ordinal(id)
            .ok_or(SignatureError::BlockNotFound { id })?;
        self.decl_signature(block.owner, walk, out)?;
        out.push_str(BLOCK);
        out.push_str(&ordinal.to_string());
        Ok(())
    }

    pub(super) fn anonymous_signature(
        &mut self,
        id: DeclId,
        decl: &Declaration,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let block = self.scopes.enclosing_block(id, decl)?;
        let ordinal = self.scopes.anonymous_ordinal(id).ok_or_else(|| {
            SignatureError::malformed(format!("declaration {} is not an anonymous class", id))
        })?;
        self.block_signature(block, walk, out)?;
        out.push_str(ANONYMOUS);
        out.push_str(&ordinal.to_string());
        Ok(())
    }
}
