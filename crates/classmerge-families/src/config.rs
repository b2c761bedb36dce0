//! Utility-family table configuration.
//!
//! The table is plain data: it can be built in code, read from TOML or JSON,
//! and layered on top of the built-in table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors found while validating a family table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("variant separator cannot be empty")]
    EmptySeparator,

    #[error("class prefix cannot be empty (omit it instead)")]
    EmptyPrefix,

    #[error("invalid family id '{0}'")]
    InvalidFamilyId(String),

    #[error("family '{0}' has no class patterns")]
    NoPatterns(String),

    #[error("family '{family}' has an invalid pattern: {detail}")]
    InvalidPattern { family: String, detail: String },

    #[error("family '{family}' conflicts with unknown family '{conflict}'")]
    UnknownConflict { family: String, conflict: String },

    #[error("family '{0}' lists itself as a conflict")]
    SelfConflict(String),
}

/// Kind of value accepted after a pattern prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Any non-empty value.
    Any,
    /// Plain numbers (`50`, `1.5`, `.5`) or numeric arbitrary values.
    Number,
    /// Whole numbers or numeric arbitrary values.
    Integer,
    /// Numbers, fractions, `px`, `full`, `screen`, typed arbitrary lengths.
    Length,
    /// Spacing scale: numbers, fractions, `px`, `full`, any arbitrary value.
    Spacing,
    /// T-shirt sizes (`xs`..`9xl`, `base`) and arbitrary lengths.
    Tshirt,
    /// Palette colors, color keywords and arbitrary colors.
    Color,
    /// Arbitrary images: `url(...)`, gradients, `image:`/`url:` hints.
    Image,
    /// Arbitrary box-shadow shorthands or `shadow:` hints.
    Shadow,
    /// Any arbitrary `[...]` value.
    Arbitrary,
    /// An explicit keyword list.
    Keywords(Vec<String>),
}

impl ValueKind {
    /// Matching precedence when several families share a prefix.
    /// Lower ranks are tried first.
    pub fn rank(&self) -> u8 {
        match self {
            ValueKind::Keywords(_) => 0,
            ValueKind::Integer => 1,
            ValueKind::Number => 2,
            ValueKind::Tshirt => 3,
            ValueKind::Length => 4,
            ValueKind::Image | ValueKind::Shadow => 5,
            ValueKind::Color => 6,
            ValueKind::Spacing => 7,
            ValueKind::Arbitrary => 8,
            ValueKind::Any => 9,
        }
    }
}

/// One way a class can belong to a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassPattern {
    /// The whole base utility, e.g. `flex`.
    Exact { class: String },

    /// `<prefix>-<value>` where the value is of the given kind.
    Prefixed { prefix: String, value: ValueKind },
}

/// A utility family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDef {
    /// Patterns whose classes belong to this family.
    #[serde(default)]
    pub classes: Vec<ClassPattern>,

    /// Families overridden when a class of this family appears later.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,

    /// Disabled families are kept in the table but never match.
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_separator() -> String {
    ":".to_string()
}

/// Complete family table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Class prefix every utility carries (e.g. `tw-`). None means no prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Variant separator.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Families keyed by id.
    #[serde(default)]
    pub families: BTreeMap<String, FamilyDef>,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            separator: default_separator(),
            families: BTreeMap::new(),
        }
    }
}

impl FamilyConfig {
    /// Validate the table.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.separator.is_empty() {
            return Err(TableError::EmptySeparator);
        }
        if matches!(self.prefix.as_deref(), Some("")) {
            return Err(TableError::EmptyPrefix);
        }

        for (id, family) in &self.families {
            if id.is_empty() || id.chars().any(char::is_whitespace) {
                return Err(TableError::InvalidFamilyId(id.clone()));
            }
            if family.classes.is_empty() && !family.disabled {
                return Err(TableError::NoPatterns(id.clone()));
            }
            for pattern in &family.classes {
                Self::validate_pattern(id, pattern)?;
            }
            for conflict in &family.conflicts {
                if conflict == id {
                    return Err(TableError::SelfConflict(id.clone()));
                }
                if !self.families.contains_key(conflict) {
                    return Err(TableError::UnknownConflict {
                        family: id.clone(),
                        conflict: conflict.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_pattern(family: &str, pattern: &ClassPattern) -> Result<(), TableError> {
        let invalid = |detail: String| TableError::InvalidPattern {
            family: family.to_string(),
            detail,
        };

        match pattern {
            ClassPattern::Exact { class } => {
                if class.is_empty() || class.chars().any(char::is_whitespace) {
                    return Err(invalid(format!("invalid class '{}'", class)));
                }
            }
            ClassPattern::Prefixed { prefix, value } => {
                if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
                    return Err(invalid(format!("invalid prefix '{}'", prefix)));
                }
                if let ValueKind::Keywords(words) = value {
                    if words.is_empty() {
                        return Err(invalid(format!(
                            "prefix '{}' has an empty keyword list",
                            prefix
                        )));
                    }
                    if let Some(word) = words.iter().find(|w| w.is_empty()) {
                        return Err(invalid(format!(
                            "prefix '{}' has an invalid keyword '{}'",
                            prefix, word
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Ids of families that can match.
    pub fn enabled_families(&self) -> impl Iterator<Item = (&String, &FamilyDef)> {
        self.families.iter().filter(|(_, f)| !f.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(classes: Vec<ClassPattern>, conflicts: &[&str]) -> FamilyDef {
        FamilyDef {
            classes,
            conflicts: conflicts.iter().map(|c| c.to_string()).collect(),
            disabled: false,
        }
    }

    fn padding_config() -> FamilyConfig {
        let mut families = BTreeMap::new();
        families.insert(
            "padding".to_string(),
            family(
                vec![ClassPattern::Prefixed {
                    prefix: "p".to_string(),
                    value: ValueKind::Spacing,
                }],
                &["padding-x"],
            ),
        );
        families.insert(
            "padding-x".to_string(),
            family(
                vec![ClassPattern::Prefixed {
                    prefix: "px".to_string(),
                    value: ValueKind::Spacing,
                }],
                &[],
            ),
        );
        FamilyConfig {
            families,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = FamilyConfig::default();
        assert!(config.prefix.is_none());
        assert_eq!(config.separator, ":");
        assert!(config.families.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_config() {
        assert!(padding_config().validate().is_ok());
    }

    #[test]
    fn test_unknown_conflict() {
        let mut config = padding_config();
        config
            .families
            .get_mut("padding")
            .unwrap()
            .conflicts
            .push("padding-y".to_string());
        assert_eq!(
            config.validate(),
            Err(TableError::UnknownConflict {
                family: "padding".to_string(),
                conflict: "padding-y".to_string(),
            })
        );
    }

    #[test]
    fn test_self_conflict() {
        let mut config = padding_config();
        config
            .families
            .get_mut("padding-x")
            .unwrap()
            .conflicts
            .push("padding-x".to_string());
        assert_eq!(
            config.validate(),
            Err(TableError::SelfConflict("padding-x".to_string()))
        );
    }

    #[test]
    fn test_empty_prefix_and_separator() {
        let mut config = padding_config();
        config.prefix = Some(String::new());
        assert_eq!(config.validate(), Err(TableError::EmptyPrefix));

        let mut config = padding_config();
        config.separator = String::new();
        assert_eq!(config.validate(), Err(TableError::EmptySeparator));
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let mut config = padding_config();
        config.families.insert(
            "float".to_string(),
            family(
                vec![ClassPattern::Prefixed {
                    prefix: "float".to_string(),
                    value: ValueKind::Keywords(vec![]),
                }],
                &[],
            ),
        );
        assert!(matches!(
            config.validate(),
            Err(TableError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_no_patterns_unless_disabled() {
        let mut config = padding_config();
        config
            .families
            .insert("empty".to_string(), FamilyDef::default());
        assert_eq!(
            config.validate(),
            Err(TableError::NoPatterns("empty".to_string()))
        );

        config.families.get_mut("empty").unwrap().disabled = true;
        assert!(config.validate().is_ok());
        assert_eq!(config.enabled_families().count(), 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = padding_config();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"prefix\":\"p\""));
        assert!(json.contains("\"value\":\"spacing\""));
        let parsed: FamilyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_keywords_and_exact_deserialize() {
        let json = r#"{
            "families": {
                "float": {
                    "classes": [
                        { "prefix": "float", "value": { "keywords": ["left", "right"] } },
                        { "class": "float-none" }
                    ]
                }
            }
        }"#;
        let config: FamilyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.separator, ":");
        let float = &config.families["float"];
        assert_eq!(
            float.classes[0],
            ClassPattern::Prefixed {
                prefix: "float".to_string(),
                value: ValueKind::Keywords(vec!["left".to_string(), "right".to_string()]),
            }
        );
        assert_eq!(
            float.classes[1],
            ClassPattern::Exact {
                class: "float-none".to_string()
            }
        );
    }
}
