//! Utility-family table and token classifier for CSS class merging.
//!
//! The classifier parses a class token and finds the utility family it
//! belongs to, so that a merger can tell which tokens override each other.

mod config;
mod defaults;
mod parser;
mod result;
mod values;

pub use config::{ClassPattern, FamilyConfig, FamilyDef, TableError, ValueKind};
pub use parser::{parse_token, sort_modifiers, ParsedToken};
pub use result::{ClassifiedToken, UnmatchedReason};
pub use values::{accepts, arbitrary_type, ArbitraryType};

use parser::{arbitrary_property, split_postfix};
use std::collections::HashMap;

/// Indexed family table, ready for classification.
#[derive(Debug, Clone)]
pub struct FamilyTable {
    config: FamilyConfig,
    exact: HashMap<String, String>,
    prefixed: HashMap<String, Vec<(ValueKind, String)>>,
    conflicts: HashMap<String, Vec<String>>,
}

impl FamilyTable {
    /// Validate and index a table configuration.
    pub fn new(config: FamilyConfig) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::index(config))
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self::index(FamilyConfig::builtin())
    }

    fn index(config: FamilyConfig) -> Self {
        let mut exact = HashMap::new();
        let mut prefixed: HashMap<String, Vec<(ValueKind, String)>> = HashMap::new();
        let mut conflicts = HashMap::new();

        for (id, family) in config.enabled_families() {
            for pattern in &family.classes {
                match pattern {
                    ClassPattern::Exact { class } => {
                        exact.entry(class.clone()).or_insert_with(|| id.clone());
                    }
                    ClassPattern::Prefixed { prefix, value } => {
                        prefixed
                            .entry(prefix.clone())
                            .or_default()
                            .push((value.clone(), id.clone()));
                    }
                }
            }
            conflicts.insert(id.clone(), family.conflicts.clone());
        }

        // Stable sort keeps family-id order among patterns of equal rank.
        for candidates in prefixed.values_mut() {
            candidates.sort_by_key(|(kind, _)| kind.rank());
        }

        Self {
            config,
            exact,
            prefixed,
            conflicts,
        }
    }

    /// The configuration this table was built from.
    pub fn config(&self) -> &FamilyConfig {
        &self.config
    }

    /// Families overridden by a later class of `family`.
    pub fn conflicts_of(&self, family: &str) -> &[String] {
        self.conflicts
            .get(family)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find the family of a base utility (no modifiers, markers or prefix).
    pub fn family_of(&self, base: &str) -> Option<String> {
        if let Some(property) = arbitrary_property(base) {
            return Some(format!("[{}]", property));
        }
        if let Some(family) = self.lookup(base) {
            return Some(family.to_string());
        }
        let (head, _postfix) = split_postfix(base)?;
        self.lookup(head).map(str::to_string)
    }

    fn lookup(&self, base: &str) -> Option<&str> {
        if let Some(family) = self.exact.get(base) {
            return Some(family);
        }

        if base.ends_with(']') {
            if let Some(pos) = base.find("-[") {
                return self.match_prefixed(&base[..pos], &base[pos + 1..]);
            }
        }

        // Longest prefix first: `border-t-2` tries `border-t` before `border`.
        let mut end = base.len();
        while let Some(pos) = base[..end].rfind('-') {
            if let Some(family) = self.match_prefixed(&base[..pos], &base[pos + 1..]) {
                return Some(family);
            }
            end = pos;
        }

        None
    }

    fn match_prefixed(&self, prefix: &str, value: &str) -> Option<&str> {
        self.prefixed
            .get(prefix)?
            .iter()
            .find(|(kind, _)| accepts(kind, value))
            .map(|(_, family)| family.as_str())
    }

    /// Classify a class token.
    pub fn classify(&self, token: &str) -> ClassifiedToken {
        let parsed = match parse_token(token, &self.config.separator) {
            Ok(p) => p,
            Err(e) => return ClassifiedToken::unmatched(token, UnmatchedReason::ParseError(e)),
        };

        let base = match &self.config.prefix {
            Some(prefix) => match parsed.base.strip_prefix(prefix.as_str()) {
                Some(rest) if !rest.is_empty() => rest,
                _ => {
                    return ClassifiedToken::unmatched(
                        token,
                        UnmatchedReason::MissingPrefix(prefix.clone()),
                    )
                }
            },
            None => parsed.base.as_str(),
        };

        match self.family_of(base) {
            Some(family) => ClassifiedToken::matched(
                token,
                family,
                sort_modifiers(&parsed.modifiers),
                parsed.important,
            )
            .negated(parsed.negative),
            None => ClassifiedToken::unmatched(token, UnmatchedReason::NoFamily(base.to_string())),
        }
    }
}

impl Default for FamilyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(token: &str) -> Option<String> {
        FamilyTable::builtin().classify(token).family
    }

    #[test]
    fn test_spacing_families() {
        assert_eq!(family("p-4"), Some("padding".to_string()));
        assert_eq!(family("px-2"), Some("padding-x".to_string()));
        assert_eq!(family("pt-0.5"), Some("padding-top".to_string()));
        assert_eq!(family("mx-auto"), Some("margin-x".to_string()));
        assert_eq!(family("-mt-4"), Some("margin-top".to_string()));
        assert_eq!(family("p-[3px]"), Some("padding".to_string()));
    }

    #[test]
    fn test_text_families_are_distinct() {
        assert_eq!(family("text-red-500"), Some("text-color".to_string()));
        assert_eq!(family("text-lg"), Some("font-size".to_string()));
        assert_eq!(family("text-center"), Some("text-align".to_string()));
        assert_eq!(family("text-[14px]"), Some("font-size".to_string()));
        assert_eq!(family("text-[#fff]"), Some("text-color".to_string()));
    }

    #[test]
    fn test_border_families() {
        assert_eq!(family("border"), Some("border-width".to_string()));
        assert_eq!(family("border-2"), Some("border-width".to_string()));
        assert_eq!(family("border-t-4"), Some("border-width-top".to_string()));
        assert_eq!(family("border-x"), Some("border-width-x".to_string()));
        assert_eq!(family("border-gray-200"), Some("border-color".to_string()));
        assert_eq!(family("border-dashed"), Some("border-style".to_string()));
        assert_eq!(family("rounded-t-lg"), Some("border-radius-t".to_string()));
        assert_eq!(family("rounded"), Some("border-radius".to_string()));
    }

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(
            family("ring-offset-2"),
            Some("ring-offset-width".to_string())
        );
        assert_eq!(family("ring-2"), Some("ring-width".to_string()));
        assert_eq!(family("max-w-screen-lg"), Some("max-width".to_string()));
    }

    #[test]
    fn test_font_weight_vs_family() {
        assert_eq!(family("font-bold"), Some("font-weight".to_string()));
        assert_eq!(family("font-[550]"), Some("font-weight".to_string()));
        assert_eq!(family("font-[Inter]"), Some("font-family".to_string()));
        assert_eq!(family("font-mono"), Some("font-family".to_string()));
    }

    #[test]
    fn test_arbitrary_images_and_shadows_stay_out_of_color() {
        assert_eq!(family("bg-[url('/hero.jpg')]"), Some("bg-image".to_string()));
        assert_eq!(
            family("bg-[linear-gradient(to_right,#fff,#000)]"),
            Some("bg-image".to_string())
        );
        assert_eq!(family("bg-[image:var(--hero)]"), Some("bg-image".to_string()));
        assert_eq!(family("bg-[var(--surface)]"), Some("bg-color".to_string()));
        assert_eq!(family("shadow-[0_0_2px_#000]"), Some("shadow".to_string()));
        assert_eq!(family("shadow-[#000]"), Some("shadow-color".to_string()));
    }

    #[test]
    fn test_negative_recorded() {
        let table = FamilyTable::builtin();
        assert!(table.classify("-mt-4").negative);
        assert!(table.classify("hover:-translate-x-2").negative);
        assert!(!table.classify("mt-4").negative);
    }

    #[test]
    fn test_postfix_and_fraction() {
        assert_eq!(family("bg-red-500/50"), Some("bg-color".to_string()));
        assert_eq!(family("w-1/2"), Some("width".to_string()));
    }

    #[test]
    fn test_arbitrary_property_family() {
        assert_eq!(
            family("[mask-type:luminance]"),
            Some("[mask-type]".to_string())
        );
    }

    #[test]
    fn test_unknown_token() {
        let token = FamilyTable::builtin().classify("card-header");
        assert!(token.family.is_none());
        assert_eq!(
            token.unmatched,
            Some(UnmatchedReason::NoFamily("card-header".to_string()))
        );
    }

    #[test]
    fn test_parse_error_token() {
        let token = FamilyTable::builtin().classify("p-[3px");
        assert!(matches!(
            token.unmatched,
            Some(UnmatchedReason::ParseError(_))
        ));
    }

    #[test]
    fn test_modifiers_sorted_in_classification() {
        let table = FamilyTable::builtin();
        let a = table.classify("hover:md:p-4");
        let b = table.classify("md:hover:p-2");
        assert_eq!(a.variant_key(), b.variant_key());
        assert_eq!(a.conflict_key("padding"), "hover:md:padding");
    }

    #[test]
    fn test_prefix_required() {
        let config = FamilyConfig {
            prefix: Some("tw-".to_string()),
            ..FamilyConfig::builtin()
        };
        let table = FamilyTable::new(config).unwrap();
        assert_eq!(
            table.classify("hover:tw-p-4").family,
            Some("padding".to_string())
        );
        assert_eq!(
            table.classify("-tw-mt-2").family,
            Some("margin-top".to_string())
        );
        assert_eq!(
            table.classify("p-4").unmatched,
            Some(UnmatchedReason::MissingPrefix("tw-".to_string()))
        );
    }

    #[test]
    fn test_disabled_family_never_matches() {
        let mut config = FamilyConfig::builtin();
        config.families.get_mut("shadow").unwrap().disabled = true;
        let table = FamilyTable::new(config).unwrap();
        assert!(table.classify("shadow-lg").family.is_none());
        assert!(table.conflicts_of("shadow").is_empty());
    }

    #[test]
    fn test_conflicts_of() {
        let table = FamilyTable::builtin();
        assert!(table
            .conflicts_of("padding")
            .contains(&"padding-x".to_string()));
        assert!(table.conflicts_of("unknown").is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = FamilyConfig::builtin();
        config
            .families
            .get_mut("padding")
            .unwrap()
            .conflicts
            .push("nope".to_string());
        assert!(FamilyTable::new(config).is_err());
    }
}
