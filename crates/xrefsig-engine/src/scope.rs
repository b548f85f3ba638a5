//! Lexical scope allocation.
//!
//! Entities without a qualified name (locals, parameters, local and anonymous
//! classes) are identified relative to the block that contains them. Blocks
//! are numbered per owning declaration and anonymous classes per block, both
//! in source order, so re-indexing an unchanged unit reproduces the same ids.
//!
//! Every id lives under a `/block` or `/anonymous` marker. Neither can occur
//! in a Java qualified name, so block-scoped ids never collide with ordinary
//! signatures.

use indexmap::IndexMap;
use xrefsig_core::{BlockId, DeclId, DeclKind, Declaration, Nesting, SemanticModel};

use crate::error::SignatureError;

/// Marker preceding the ordinal of a block within its owner.
pub const BLOCK: &str = "/block";

/// Marker preceding the ordinal of an anonymous class within its block.
pub const ANONYMOUS: &str = "/anonymous";

/// Source-order ordinals of the blocks and anonymous classes of one unit.
#[derive(Debug, Default)]
pub struct ScopeAllocator {
    block_ordinals: IndexMap<BlockId, usize>,
    anonymous_ordinals: IndexMap<DeclId, usize>,
}

impl ScopeAllocator {
    /// Numbers the blocks and anonymous classes of `model`.
    ///
    /// Relies on the model's registration order being source order.
    pub fn new(model: &SemanticModel) -> Self {
        let mut per_owner: IndexMap<DeclId, usize> = IndexMap::new();
        let mut block_ordinals = IndexMap::new();
        for id in model.block_ids() {
            let Some(block) = model.block(id) else {
                continue;
            };
            let next = per_owner.entry(block.owner).or_insert(0);
            block_ordinals.insert(id, *next);
            *next += 1;
        }

        let mut per_block: IndexMap<BlockId, usize> = IndexMap::new();
        let mut anonymous_ordinals = IndexMap::new();
        for id in model.decl_ids() {
            let Some(decl) = model.decl(id) else {
                continue;
            };
            if !matches!(
                decl.kind,
                DeclKind::Type {
                    nesting: Nesting::Anonymous,
                    ..
                }
            ) {
                continue;
            }
            // Enum constant bodies are named after their constant.
            let Some(block) = decl.block else {
                continue;
            };
            let next = per_block.entry(block).or_insert(0);
            anonymous_ordinals.insert(id, *next);
            *next += 1;
        }

        ScopeAllocator {
            block_ordinals,
            anonymous_ordinals,
        }
    }

    /// Returns `true` if `decl` is declared inside an executable or
    /// initializer block.
    pub fn is_in_block(&self, decl: &Declaration) -> bool {
        decl.block.is_some()
    }

    /// The innermost block containing `decl`.
    pub fn enclosing_block(
        &self,
        id: DeclId,
        decl: &Declaration,
    ) -> Result<BlockId, SignatureError> {
        decl.block.ok_or(SignatureError::NotInBlock { id })
    }

    /// Position of `block` among the blocks of its owner.
    pub fn block_ordinal(&self, block: BlockId) -> Option<usize> {
        self.block_ordinals.get(&block).copied()
    }

    /// Position of the anonymous class `decl` among those of its block.
    pub fn anonymous_ordinal(&self, decl: DeclId) -> Option<usize> {
        self.anonymous_ordinals.get(&decl).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xrefsig_core::{BlockKind, TypeDeclKind, VariableKind};

    fn unit() -> (SemanticModel, DeclId, DeclId) {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let c = model.add_type("C", pkg, TypeDeclKind::Class).unwrap();
        let m = model.add_method("m", c).unwrap();
        (model, c, m)
    }

    #[test]
    fn blocks_are_numbered_per_owner() {
        let (mut model, c, m) = unit();
        let n = model.add_method("n", c).unwrap();
        let m_body = model.add_block(m, BlockKind::Body, None).unwrap();
        let m_nested = model.add_block(m, BlockKind::Nested, Some(m_body)).unwrap();
        let n_body = model.add_block(n, BlockKind::Body, None).unwrap();
        let init = model.add_block(c, BlockKind::StaticInitializer, None).unwrap();

        let scopes = ScopeAllocator::new(&model);
        assert_eq!(scopes.block_ordinal(m_body), Some(0));
        assert_eq!(scopes.block_ordinal(m_nested), Some(1));
        assert_eq!(scopes.block_ordinal(n_body), Some(0));
        assert_eq!(scopes.block_ordinal(init), Some(0));
        assert_eq!(scopes.block_ordinal(BlockId(9)), None);
    }

    #[test]
    fn anonymous_classes_are_numbered_per_block() {
        let (mut model, _, m) = unit();
        let body = model.add_block(m, BlockKind::Body, None).unwrap();
        let nested = model.add_block(m, BlockKind::Nested, Some(body)).unwrap();
        let a = model.add_anonymous_type(body).unwrap();
        let b = model.add_anonymous_type(nested).unwrap();
        let c = model.add_anonymous_type(body).unwrap();

        let scopes = ScopeAllocator::new(&model);
        assert_eq!(scopes.anonymous_ordinal(a), Some(0));
        assert_eq!(scopes.anonymous_ordinal(b), Some(0));
        assert_eq!(scopes.anonymous_ordinal(c), Some(1));
    }

    #[test]
    fn numbering_is_reproducible() {
        let (mut model, _, m) = unit();
        let body = model.add_block(m, BlockKind::Body, None).unwrap();
        let anon = model.add_anonymous_type(body).unwrap();

        let first = ScopeAllocator::new(&model);
        let second = ScopeAllocator::new(&model);
        assert_eq!(first.block_ordinal(body), second.block_ordinal(body));
        assert_eq!(first.anonymous_ordinal(anon), second.anonymous_ordinal(anon));
    }

    #[test]
    fn fields_are_not_in_a_block() {
        let (mut model, c, m) = unit();
        let body = model.add_block(m, BlockKind::Body, None).unwrap();
        let field = model.add_field("x", c, None).unwrap();
        let local = model
            .add_local("x", VariableKind::Local, body, None)
            .unwrap();

        let scopes = ScopeAllocator::new(&model);
        let field_decl = model.decl(field).unwrap();
        assert!(!scopes.is_in_block(field_decl));
        assert_eq!(
            scopes.enclosing_block(field, field_decl),
            Err(SignatureError::NotInBlock { id: field })
        );
        assert_eq!(
            scopes.enclosing_block(local, model.decl(local).unwrap()),
            Ok(body)
        );
    }
}
