//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Qualified name of the universal base class in Java.
pub const DEFAULT_UNIVERSAL_BASE: &str = "java.lang.Object";

/// Knobs that depend on the source language the front end analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Qualified name of the type every class implicitly extends. A type
    /// parameter bounded only by it renders without an `extends` clause.
    pub universal_base: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            universal_base: DEFAULT_UNIVERSAL_BASE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_java_object() {
        assert_eq!(EngineConfig::default().universal_base, "java.lang.Object");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());

        let config: EngineConfig =
            serde_json::from_str(r#"{"universal_base":"kotlin.Any"}"#).unwrap();
        assert_eq!(config.universal_base, "kotlin.Any");
    }
}
