//! Source position lookups for reference sites.

use xrefsig_core::{RefId, SemanticModel};

use crate::signature::SignatureEngine;

/// Answers where syntax nodes of the unit end.
pub trait SourcePositions {
    /// End offset of the reference site `id`, or `None` when it is unknown.
    fn end_position(&self, id: RefId) -> Option<u32>;
}

impl SourcePositions for SemanticModel {
    fn end_position(&self, id: RefId) -> Option<u32> {
        self.reference(id)?.span?.end
    }
}

impl<'m> SignatureEngine<'m> {
    /// Returns `true` when the syntax node enclosing reference `id` exists
    /// and `positions` knows where it ends.
    pub fn has_valid_end_position(&self, id: RefId, positions: &impl SourcePositions) -> bool {
        self.model()
            .reference(id)
            .and_then(|site| site.parent)
            .and_then(|parent| positions.end_position(parent))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::EngineConfig;
    use xrefsig_core::{ReferenceNode, Span};

    fn unit() -> (SemanticModel, RefId, RefId, RefId) {
        let mut model = SemanticModel::new("A.java");
        let int = model.primitive("int");
        let array = model
            .add_ty(xrefsig_core::Type::Array {
                component: int,
                varargs: false,
            })
            .unwrap();
        let parent = model
            .add_reference(
                ReferenceNode::ArrayType { ty: array },
                Some(Span::new(10, 15)),
                None,
            )
            .unwrap();
        let child = model
            .add_reference(
                ReferenceNode::ArrayType { ty: array },
                Some(Span::open(10)),
                Some(parent),
            )
            .unwrap();
        let orphan = model
            .add_reference(ReferenceNode::ArrayType { ty: array }, None, None)
            .unwrap();
        (model, parent, child, orphan)
    }

    #[test]
    fn model_reports_span_ends() {
        let (model, parent, child, orphan) = unit();
        assert_eq!(model.end_position(parent), Some(15));
        assert_eq!(model.end_position(child), None);
        assert_eq!(model.end_position(orphan), None);
    }

    #[test]
    fn validity_is_decided_by_the_parent_node() {
        let (model, parent, child, orphan) = unit();
        let engine = SignatureEngine::new(&model, EngineConfig::default());
        assert!(engine.has_valid_end_position(child, &model));
        assert!(!engine.has_valid_end_position(parent, &model));
        assert!(!engine.has_valid_end_position(orphan, &model));
    }

    struct Fixed(HashMap<RefId, u32>);

    impl SourcePositions for Fixed {
        fn end_position(&self, id: RefId) -> Option<u32> {
            self.0.get(&id).copied()
        }
    }

    #[test]
    fn external_position_source() {
        let (model, parent, child, _) = unit();
        let engine = SignatureEngine::new(&model, EngineConfig::default());
        assert!(!engine.has_valid_end_position(child, &Fixed(HashMap::new())));
        let known = Fixed(HashMap::from([(parent, 99)]));
        assert!(engine.has_valid_end_position(child, &known));
    }
}
