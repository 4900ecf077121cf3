//! Strategy registry for dynamic strategy loading.

use crate::{NullStrategy, ScriptedConfig, ScriptedStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use backtest_core::{error::StrategyError, traits::Strategy};

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Registry key
    pub name: String,
    /// Strategy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry for available strategies.
pub struct StrategyRegistry {
    strategies: BTreeMap<String, StrategyInfo>,
}

impl StrategyRegistry {
    /// Create a new strategy registry with all built-in strategies.
    pub fn new() -> Self {
        let mut strategies = BTreeMap::new();

        strategies.insert(
            "null".to_string(),
            StrategyInfo {
                name: "null".to_string(),
                description: "Never signals or trades".to_string(),
                default_config: serde_json::Value::Null,
            },
        );

        strategies.insert(
            "scripted".to_string(),
            StrategyInfo {
                name: "scripted".to_string(),
                description: "Replays a fixed step-by-step schedule of actions".to_string(),
                default_config: serde_json::to_value(ScriptedConfig::default())
                    .unwrap_or(serde_json::Value::Null),
            },
        );

        Self { strategies }
    }

    /// List all available strategies, sorted by name.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get strategy info by name.
    pub fn get(&self, name: &str) -> Option<&StrategyInfo> {
        self.strategies.get(name)
    }

    /// Check if a strategy exists.
    pub fn exists(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Get all strategy names.
    pub fn names(&self) -> Vec<&String> {
        self.strategies.keys().collect()
    }

    /// Create a strategy instance from configuration.
    pub fn create(
        &self,
        name: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        match name {
            "null" => Ok(Box::new(NullStrategy::new())),
            "scripted" => {
                let config: ScriptedConfig = serde_json::from_value(config)
                    .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?;
                Ok(Box::new(ScriptedStrategy::new(config)?))
            }
            _ => Err(StrategyError::NotFound(name.to_string())),
        }
    }

    /// Create a strategy with default configuration.
    pub fn create_default(&self, name: &str) -> Result<Box<dyn Strategy>, StrategyError> {
        let info = self
            .get(name)
            .ok_or_else(|| StrategyError::NotFound(name.to_string()))?;
        self.create(name, info.default_config.clone())
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_list() {
        let registry = StrategyRegistry::new();
        let names: Vec<_> = registry.list().iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["null", "scripted"]);
    }

    #[test]
    fn test_registry_get() {
        let registry = StrategyRegistry::new();

        assert!(registry.get("scripted").is_some());
        assert!(registry.exists("null"));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_create_default() {
        let registry = StrategyRegistry::new();

        let strategy = registry.create_default("scripted").unwrap();
        assert_eq!(strategy.name(), "scripted");

        let strategy = registry.create_default("null").unwrap();
        assert_eq!(strategy.name(), "null");
    }

    #[test]
    fn test_create_with_config() {
        let registry = StrategyRegistry::new();

        let config = serde_json::json!({
            "signals": { "3": "short" },
            "enter_on_signal": true
        });
        assert!(registry.create("scripted", config).is_ok());

        let invalid = serde_json::json!({ "exits": { "0": "long" } });
        assert!(matches!(
            registry.create("scripted", invalid),
            Err(StrategyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_create_unknown_strategy() {
        let registry = StrategyRegistry::new();

        let result = registry.create_default("unknown");
        assert!(matches!(result, Err(StrategyError::NotFound(_))));
    }
}
