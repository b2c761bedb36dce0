//! Override-aware class merging
//!
//! Tokens are resolved right to left: the last token of a family under a
//! given variant stack wins, and it also shadows every earlier token of the
//! families it declares as conflicts. Survivors keep their original order.

mod explain;

pub use explain::{ExplainOutput, TableSummary, TokenExplanation};

use classmerge_families::{ClassifiedToken, FamilyConfig, FamilyTable, TableError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::input::ClassInput;

/// What happened to one flattened token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// The token is part of the output.
    Kept,

    /// The same token appears again later.
    Duplicate { superseded_by: usize },

    /// A later token of the same or a conflicting family wins.
    Overridden { family: String, superseded_by: usize },
}

impl Decision {
    pub fn is_kept(&self) -> bool {
        matches!(self, Decision::Kept)
    }
}

/// Per-token outcome of a merge.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub tokens: Vec<ClassifiedToken>,
    pub decisions: Vec<Decision>,
}

impl Resolution {
    /// Kept tokens in input order, joined by single spaces.
    pub fn merged(&self) -> String {
        self.tokens
            .iter()
            .zip(&self.decisions)
            .filter(|(_, decision)| decision.is_kept())
            .map(|(token, _)| token.token.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Merges class inputs against a family table.
#[derive(Debug, Clone)]
pub struct ClassMerger {
    table: FamilyTable,
}

impl ClassMerger {
    pub fn new(table: FamilyTable) -> Self {
        Self { table }
    }

    /// Merger backed by the built-in Tailwind table.
    pub fn builtin() -> Self {
        Self::new(FamilyTable::builtin())
    }

    /// Validate `config` and build a merger for it.
    pub fn from_config(config: FamilyConfig) -> Result<Self, TableError> {
        Ok(Self::new(FamilyTable::new(config)?))
    }

    pub fn table(&self) -> &FamilyTable {
        &self.table
    }

    /// Merge inputs into one class string.
    pub fn merge(&self, inputs: &[ClassInput]) -> String {
        self.resolve(&ClassInput::tokens(inputs)).merged()
    }

    /// Merge a single whitespace-separated class string.
    pub fn merge_str(&self, classes: &str) -> String {
        let tokens: Vec<&str> = classes.split_whitespace().collect();
        self.resolve(&tokens).merged()
    }

    /// Decide the fate of every token.
    pub fn resolve(&self, tokens: &[&str]) -> Resolution {
        let classified: Vec<ClassifiedToken> =
            tokens.iter().map(|token| self.table.classify(token)).collect();
        let mut decisions = vec![Decision::Kept; tokens.len()];

        // Token text and conflict keys claimed by kept tokens, with the
        // index of the token that claimed them.
        let mut kept: HashMap<&str, usize> = HashMap::new();
        let mut claimed: HashMap<String, usize> = HashMap::new();

        for index in (0..tokens.len()).rev() {
            let token = tokens[index];

            if let Some(&winner) = kept.get(token) {
                tracing::trace!(token, winner = tokens[winner], "dropping duplicate");
                decisions[index] = Decision::Duplicate {
                    superseded_by: winner,
                };
                continue;
            }

            let class = &classified[index];
            if let Some(family) = &class.family {
                let key = class.conflict_key(family);
                if let Some(&winner) = claimed.get(&key) {
                    tracing::trace!(
                        token,
                        winner = tokens[winner],
                        family = family.as_str(),
                        "dropping overridden token"
                    );
                    decisions[index] = Decision::Overridden {
                        family: family.clone(),
                        superseded_by: winner,
                    };
                    continue;
                }

                claimed.insert(key, index);
                for conflict in self.table.conflicts_of(family) {
                    claimed.entry(class.conflict_key(conflict)).or_insert(index);
                }
            }

            kept.insert(token, index);
        }

        Resolution {
            tokens: classified,
            decisions,
        }
    }

    /// Resolve `inputs` and describe every decision.
    pub fn explain(&self, inputs: &[ClassInput]) -> ExplainOutput {
        let resolution = self.resolve(&ClassInput::tokens(inputs));
        let summary = TableSummary {
            fingerprint: self.table_fingerprint().ok(),
            prefix: self.table.config().prefix.clone(),
            separator: self.table.config().separator.clone(),
            families: self.table.config().enabled_families().count(),
        };
        ExplainOutput::from_resolution(&resolution, summary)
    }

    /// SHA-256 over the canonical JSON of the table configuration.
    pub fn table_fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json_canonicalizer::to_vec(self.table.config())?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}

impl Default for ClassMerger {
    fn default() -> Self {
        Self::builtin()
    }
}

static DEFAULT_MERGER: LazyLock<ClassMerger> = LazyLock::new(ClassMerger::builtin);

/// Merge inputs with the built-in table.
///
/// ```
/// use classmerge::{merge, ClassInput};
///
/// let merged = merge(&[ClassInput::from("px-2 py-1"), ClassInput::from("p-4")]);
/// assert_eq!(merged, "p-4");
/// ```
pub fn merge(inputs: &[ClassInput]) -> String {
    DEFAULT_MERGER.merge(inputs)
}

/// Merge any mix of inputs convertible to [`ClassInput`].
///
/// ```
/// use classmerge::cn;
///
/// let active = true;
/// assert_eq!(
///     cn!("px-2 text-red-500", active.then_some("text-blue-500"), None::<&str>),
///     "px-2 text-blue-500"
/// );
/// ```
#[macro_export]
macro_rules! cn {
    ($($input:expr),* $(,)?) => {
        $crate::merge(&[$($crate::ClassInput::from($input)),*])
    };
}
