//! Reference driver: the signatures of every node of one compilation unit.
//!
//! [`index_unit`] is how the engine is meant to be driven. It builds exactly
//! one [`SignatureEngine`] for the unit, walks declarations in source order,
//! then reference sites, and drops the engine (and its caches) on return.
//! Nodes without a signature are skipped and counted, never fatal.

use serde::Serialize;
use xrefsig_core::{ReferenceNode, SemanticModel};

use crate::config::EngineConfig;
use crate::error::Subject;
use crate::signature::SignatureEngine;

/// One emitted graph-node key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureRecord {
    /// Node the signature was computed for, e.g. `decl 4`.
    pub subject: String,
    /// Declaration kind, `type` or the reference kind.
    pub kind: &'static str,
    pub signature: String,
    /// For reference sites: whether the enclosing syntax node has a known end
    /// position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchored: Option<bool>,
}

/// Signatures of one compilation unit, in emission order.
#[derive(Debug, Clone, Serialize)]
pub struct UnitIndex {
    pub unit: String,
    pub records: Vec<SignatureRecord>,
    /// Nodes that produced no signature.
    pub skipped: usize,
}

impl UnitIndex {
    /// Returns the first signature recorded for `subject`.
    pub fn signature(&self, subject: Subject) -> Option<&str> {
        let key = subject.to_string();
        self.records
            .iter()
            .find(|record| record.subject == key)
            .map(|record| record.signature.as_str())
    }
}

/// Computes the signature of every declaration and reference site of `model`.
///
/// Implicit default constructors get their synthesized signature. A
/// parameterized-type use is recorded twice: the plain type signature and its
/// specialization signature.
pub fn index_unit(model: &SemanticModel, config: &EngineConfig) -> UnitIndex {
    let mut engine = SignatureEngine::new(model, config.clone());
    let mut index = UnitIndex {
        unit: model.unit().to_string(),
        records: Vec::new(),
        skipped: 0,
    };

    for id in model.declarations_in_source_order() {
        let Some(decl) = model.decl(id) else {
            continue;
        };
        let signature = if decl.is_implicit_constructor() {
            engine.default_constructor_signature(id)
        } else {
            engine.signature_of_decl(id)
        };
        index.push(Subject::Decl(id), decl.kind_name(), signature, None);
    }

    for id in model.reference_ids() {
        let Some(site) = model.reference(id) else {
            continue;
        };
        let anchored = Some(engine.has_valid_end_position(id, model));
        if let ReferenceNode::ParameterizedType { ty } = site.node {
            let plain = engine.signature_of_type(ty);
            index.push(Subject::Type(ty), "type", plain, None);
        }
        let signature = engine.signature_of_reference(id);
        index.push(Subject::Reference(id), site.node.kind_name(), signature, anchored);
    }

    tracing::debug!(
        unit = %index.unit,
        records = index.records.len(),
        skipped = index.skipped,
        "indexed unit"
    );
    index
}

impl UnitIndex {
    fn push(
        &mut self,
        subject: Subject,
        kind: &'static str,
        signature: Option<String>,
        anchored: Option<bool>,
    ) {
        match signature {
            Some(signature) => {
                tracing::trace!(%subject, %signature, "signature");
                self.records.push(SignatureRecord {
                    subject: subject.to_string(),
                    kind,
                    signature,
                    anchored,
                });
            }
            None => {
                tracing::trace!(%subject, "skipped");
                self.skipped += 1;
            }
        }
    }
}
