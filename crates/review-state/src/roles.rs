//! # Role Configuration
//!
//! A [`RoleConfig`] describes one evaluation form: the proficiency levels a
//! person can be evaluated at and the dimensions they are rated on. Each
//! dimension carries a short behaviour description per level.
//!
//! Configurations are plain JSON documents with camelCase keys:
//!
//! ```json
//! {
//!   "key": "designer",
//!   "title": "🎨 Design Dimensions",
//!   "description": "Evaluate UX/UI designers",
//!   "roleName": "Designer",
//!   "levels": [{ "key": "junior", "name": "Junior Designer" }],
//!   "dimensions": [{
//!     "key": "visualDesign",
//!     "name": "Visual Design",
//!     "emoji": "🎨",
//!     "description": "Creating accessible visual interfaces",
//!     "levelBehaviors": { "junior": "Creates basic UI following design systems." }
//!   }]
//! }
//! ```
//!
//! ## Invariants
//!
//! | Rule | Error |
//! |------|-------|
//! | level keys unique | [`ConfigError::DuplicateLevel`] |
//! | dimension keys unique | [`ConfigError::DuplicateDimension`] |
//! | every dimension has text for every level | [`ConfigError::MissingBehavior`] |
//!
//! Dimension order is significant: it is the axis order of the radar chart.

use crate::error::{ConfigError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const SOFTWARE_ENGINEER: &str = include_str!("../roles/software_engineer.json");
const DESIGNER: &str = include_str!("../roles/designer.json");
const PRODUCT_MANAGER: &str = include_str!("../roles/product_manager.json");

/// A named proficiency tier, e.g. junior or senior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Stable identifier, referenced by `levelBehaviors` and person info.
    pub key: String,
    /// Display name.
    pub name: String,
}

/// One scored axis of the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// Stable identifier, used as the ratings key.
    pub key: String,
    /// Display name, also the chart axis label.
    pub name: String,
    /// Decorative emoji shown next to the name.
    #[serde(default)]
    pub emoji: String,
    /// Short explanation of what the dimension covers.
    #[serde(default)]
    pub description: String,
    /// Expected behaviour per level key, in document order.
    pub level_behaviors: IndexMap<String, String>,
}

impl Dimension {
    /// Behaviour text for `level`, empty when the level is unknown.
    pub fn behavior(&self, level: &str) -> &str {
        self.level_behaviors
            .get(level)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Static description of a role's evaluation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleConfig {
    /// Namespace key, also used for storage keys.
    pub key: String,
    /// Page heading.
    pub title: String,
    /// Page sub-heading.
    #[serde(default)]
    pub description: String,
    /// Human readable role, e.g. "Software Engineer".
    pub role_name: String,
    /// Proficiency levels, in display order.
    pub levels: Vec<Level>,
    /// Evaluation dimensions, in display and chart order.
    pub dimensions: Vec<Dimension>,
}

impl RoleConfig {
    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] for invalid JSON and any validation
    /// error from [`RoleConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RoleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks the structural invariants of the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKey { kind: "role" });
        }
        if self.levels.is_empty() {
            return Err(ConfigError::Empty {
                role: self.key.clone(),
                kind: "levels",
            });
        }
        if self.dimensions.is_empty() {
            return Err(ConfigError::Empty {
                role: self.key.clone(),
                kind: "dimensions",
            });
        }

        let mut seen = HashSet::new();
        for level in &self.levels {
            if level.key.is_empty() {
                return Err(ConfigError::EmptyKey { kind: "level" });
            }
            if !seen.insert(level.key.as_str()) {
                return Err(ConfigError::DuplicateLevel(level.key.clone()));
            }
        }

        let mut seen = HashSet::new();
        for dimension in &self.dimensions {
            if dimension.key.is_empty() {
                return Err(ConfigError::EmptyKey { kind: "dimension" });
            }
            if !seen.insert(dimension.key.as_str()) {
                return Err(ConfigError::DuplicateDimension(dimension.key.clone()));
            }
            for level in &self.levels {
                if !dimension.level_behaviors.contains_key(&level.key) {
                    return Err(ConfigError::MissingBehavior {
                        dimension: dimension.key.clone(),
                        level: level.key.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Looks up a dimension by key.
    pub fn dimension(&self, key: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.key == key)
    }

    /// Looks up a level by key.
    pub fn level(&self, key: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.key == key)
    }

    /// Returns true if `key` names a dimension of this configuration.
    pub fn has_dimension(&self, key: &str) -> bool {
        self.dimension(key).is_some()
    }

    /// Dimension keys in configuration order.
    pub fn dimension_keys(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(|d| d.key.as_str())
    }

    /// Chart axis labels in configuration order.
    pub fn labels(&self) -> Vec<String> {
        self.dimensions.iter().map(|d| d.name.clone()).collect()
    }

    /// Series label used by the chart when no person name is entered.
    pub fn default_series_label(&self) -> String {
        format!("{} Rating", self.role_name)
    }

    /// Loads one of the bundled role configurations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRole`] if no bundled role has this key.
    pub fn builtin(key: &str) -> Result<Self> {
        let json = match key {
            "software_engineer" => SOFTWARE_ENGINEER,
            "designer" => DESIGNER,
            "product_manager" => PRODUCT_MANAGER,
            other => return Err(ConfigError::UnknownRole(other.to_string())),
        };
        Self::from_json(json)
    }
}

/// Keys of the bundled role configurations.
pub const BUILTIN_ROLES: [&str; 3] = ["software_engineer", "designer", "product_manager"];

/// Loads every bundled role configuration.
pub fn builtin_roles() -> Result<Vec<RoleConfig>> {
    BUILTIN_ROLES.iter().map(|key| RoleConfig::builtin(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level_config() -> RoleConfig {
        RoleConfig::from_json(
            r#"{
                "key": "tester",
                "title": "Test Dimensions",
                "roleName": "Tester",
                "levels": [{"key": "junior", "name": "Junior"}, {"key": "senior", "name": "Senior"}],
                "dimensions": [{
                    "key": "coverage",
                    "name": "Coverage",
                    "emoji": "🧪",
                    "description": "Finds the gaps",
                    "levelBehaviors": {"junior": "Writes tests", "senior": "Designs suites"}
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_roles_validate() {
        let roles = builtin_roles().unwrap();
        assert_eq!(roles.len(), 3);
        for role in &roles {
            assert!(role.validate().is_ok(), "{} should validate", role.key);
            assert_eq!(role.dimensions.len(), 7);
        }
    }

    #[test]
    fn test_builtin_engineer_dimension_order() {
        let config = RoleConfig::builtin("software_engineer").unwrap();
        let keys: Vec<&str> = config.dimension_keys().collect();
        assert_eq!(keys[0], "technicalExecution");
        assert_eq!(keys[6], "impact");
        assert_eq!(config.default_series_label(), "Software Engineer Rating");
    }

    #[test]
    fn test_unknown_builtin() {
        let err = RoleConfig::builtin("astronaut").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRole(ref k) if k == "astronaut"));
    }

    #[test]
    fn test_missing_behavior_rejected() {
        let mut config = two_level_config();
        config.dimensions[0].level_behaviors.shift_remove("senior");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingBehavior { ref level, .. } if level == "senior"));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut config = two_level_config();
        config.dimensions.push(config.dimensions[0].clone());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateDimension(_))
        ));

        let mut config = two_level_config();
        config.levels.push(config.levels[0].clone());
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateLevel(_))));
    }

    #[test]
    fn test_level_behaviors_keep_document_order() {
        let config = RoleConfig::from_json(
            r#"{
                "key": "tester",
                "title": "Test Dimensions",
                "roleName": "Tester",
                "levels": [{"key": "senior", "name": "Senior"}, {"key": "junior", "name": "Junior"}],
                "dimensions": [{
                    "key": "coverage",
                    "name": "Coverage",
                    "levelBehaviors": {"senior": "Designs suites", "junior": "Writes tests"}
                }]
            }"#,
        )
        .unwrap();

        let levels: Vec<&str> = config.dimensions[0]
            .level_behaviors
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(levels, ["senior", "junior"]);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.find("\"senior\":\"Designs").unwrap() < json.find("\"junior\":\"Writes").unwrap());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RoleConfig::from_json("{not json"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_lookup_helpers() {
        let config = two_level_config();
        assert!(config.has_dimension("coverage"));
        assert!(!config.has_dimension("speed"));
        assert_eq!(config.level("senior").unwrap().name, "Senior");
        assert_eq!(config.dimension("coverage").unwrap().behavior("junior"), "Writes tests");
        assert_eq!(config.dimension("coverage").unwrap().behavior("staff"), "");
        assert_eq!(config.labels(), vec!["Coverage".to_string()]);
    }
}
