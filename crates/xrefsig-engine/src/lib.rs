//! Canonical signatures for cross-reference graphs.
//!
//! Given the [`SemanticModel`](xrefsig_core::SemanticModel) of one compilation
//! unit, a [`SignatureEngine`] computes a stable string key for every
//! declaration, type and reference site. [`index_unit`] drives one engine over
//! a whole unit.

pub mod config;
pub mod driver;
pub mod error;
pub mod positions;
pub mod scope;
pub mod signature;

// Re-export commonly used types
pub use config::{EngineConfig, DEFAULT_UNIVERSAL_BASE};
pub use driver::{index_unit, SignatureRecord, UnitIndex};
pub use error::{SignatureError, Subject};
pub use positions::SourcePositions;
pub use scope::{ScopeAllocator, ANONYMOUS, BLOCK};
pub use signature::{
    make_type_specialization_signature, SignatureEngine, ERROR_TYPE, TYPE_SPECIALIZATION_SUFFIX,
};
