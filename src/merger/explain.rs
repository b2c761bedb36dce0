//! Explain output for merge decisions
//!
//! Structured JSON and human-readable reports of why each token was kept or
//! dropped.

use serde::{Deserialize, Serialize};

use super::{Decision, Resolution};

/// Explanation of one merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    /// Flattened input tokens
    pub input_tokens: Vec<String>,

    /// The merged class string
    pub merged: String,

    /// One entry per input token, in input order
    pub tokens: Vec<TokenExplanation>,

    /// The family table used for resolution
    pub table: TableSummary,

    /// Human-readable explanation
    pub explanation: String,
}

/// Decision for one token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExplanation {
    pub index: usize,
    pub token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Sorted variant modifiers plus `!` for important tokens
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,

    /// Whether the utility value is negated (`-mt-4`)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub negative: bool,

    #[serde(flatten)]
    pub decision: Decision,

    /// The later token that replaced this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,

    /// Machine-readable reason for tokens outside the table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched: Option<String>,
}

/// Summary of the family table in effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    /// SHA-256 of the canonical table JSON
    pub fingerprint: Option<String>,
    pub prefix: Option<String>,
    pub separator: String,
    /// Number of enabled families
    pub families: usize,
}

impl ExplainOutput {
    pub fn from_resolution(resolution: &Resolution, table: TableSummary) -> Self {
        let tokens: Vec<TokenExplanation> = resolution
            .tokens
            .iter()
            .zip(&resolution.decisions)
            .enumerate()
            .map(|(index, (class, decision))| {
                let winner = match decision {
                    Decision::Kept => None,
                    Decision::Duplicate { superseded_by }
                    | Decision::Overridden { superseded_by, .. } => resolution
                        .tokens
                        .get(*superseded_by)
                        .map(|t| t.token.clone()),
                };
                TokenExplanation {
                    index,
                    token: class.token.clone(),
                    family: class.family.clone(),
                    variant: class.variant_key(),
                    negative: class.negative,
                    decision: decision.clone(),
                    winner,
                    unmatched: class.unmatched.as_ref().map(|r| r.to_code()),
                }
            })
            .collect();

        let input_tokens = tokens.iter().map(|t| t.token.clone()).collect::<Vec<_>>();
        let merged = resolution.merged();
        let explanation = Self::generate_explanation(&input_tokens, &merged, &tokens);

        Self {
            input_tokens,
            merged,
            tokens,
            table,
            explanation,
        }
    }

    fn generate_explanation(
        input_tokens: &[String],
        merged: &str,
        tokens: &[TokenExplanation],
    ) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Input: {}", input_tokens.join(" ")));
        lines.push(format!("Merged: {}", merged));

        if !tokens.is_empty() {
            lines.push(String::new());
            lines.push("Tokens:".to_string());
            for token in tokens {
                lines.push(format!("  {}", Self::format_token(token)));
            }
        }

        lines.join("\n")
    }

    fn format_token(token: &TokenExplanation) -> String {
        let family = match (token.family.as_deref(), token.negative) {
            (Some(family), true) => format!("{}, negative", family),
            (Some(family), false) => family.to_string(),
            (None, _) => "-".to_string(),
        };
        let winner = token.winner.as_deref().unwrap_or("?");
        match &token.decision {
            Decision::Kept => format!("{:<24} kept ({})", token.token, family),
            Decision::Duplicate { .. } => {
                format!("{:<24} dropped, repeated later as '{}'", token.token, winner)
            }
            Decision::Overridden { family, .. } => format!(
                "{:<24} dropped, {} overridden by '{}'",
                token.token, family, winner
            ),
        }
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut output = self.explanation.clone();
        output.push_str("\n\n--- Family Table ---\n");

        if let Some(ref fingerprint) = self.table.fingerprint {
            output.push_str(&format!("Fingerprint: {}\n", fingerprint));
        }
        if let Some(ref prefix) = self.table.prefix {
            output.push_str(&format!("Prefix: {}\n", prefix));
        }
        output.push_str(&format!("Separator: {}\n", self.table.separator));
        output.push_str(&format!("Families: {}\n", self.table.families));

        let unmatched: Vec<&TokenExplanation> =
            self.tokens.iter().filter(|t| t.unmatched.is_some()).collect();
        if !unmatched.is_empty() {
            output.push_str("\n--- Outside The Table ---\n");
            for token in unmatched {
                output.push_str(&format!(
                    "{}: {}\n",
                    token.token,
                    token.unmatched.as_deref().unwrap_or_default()
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use crate::input::ClassInput;
    use crate::merger::ClassMerger;

    fn explain(classes: &str) -> super::ExplainOutput {
        ClassMerger::builtin().explain(&[ClassInput::from(classes)])
    }

    #[test]
    fn test_explain_overridden() {
        let output = explain("px-2 py-1 p-4");

        assert_eq!(output.merged, "p-4");
        assert_eq!(output.input_tokens, vec!["px-2", "py-1", "p-4"]);
        assert_eq!(output.tokens[0].winner.as_deref(), Some("p-4"));
        assert_eq!(output.tokens[0].family.as_deref(), Some("padding-x"));
        assert!(output.tokens[2].decision.is_kept());
        assert!(output.explanation.contains("padding-x overridden by 'p-4'"));
    }

    #[test]
    fn test_explain_duplicate_and_unmatched() {
        let output = explain("card card");

        assert_eq!(output.merged, "card");
        assert_eq!(output.tokens[0].winner.as_deref(), Some("card"));
        assert_eq!(output.tokens[1].unmatched.as_deref(), Some("NO_FAMILY:card"));
        assert!(output.to_human().contains("--- Outside The Table ---"));
    }

    #[test]
    fn test_explain_json() {
        let output = explain("hover:text-red-500 hover:text-blue-500");
        let json = output.to_json().unwrap();

        assert!(json.contains("\"decision\": \"overridden\""));
        assert!(json.contains("\"superseded_by\": 1"));
        assert!(json.contains("\"variant\": \"hover:\""));
        assert!(json.contains("\"fingerprint\""));
    }

    #[test]
    fn test_explain_human_table_summary() {
        let human = explain("p-4").to_human();

        assert!(human.contains("Merged: p-4"));
        assert!(human.contains("--- Family Table ---"));
        assert!(human.contains("Separator: :"));
        assert!(!human.contains("Prefix:"));
    }

    #[test]
    fn test_explain_negative_value() {
        let output = explain("-mt-2 mt-4 -mb-1");

        assert_eq!(output.merged, "mt-4 -mb-1");
        assert!(output.tokens[0].negative);
        assert!(!output.tokens[1].negative);
        assert!(output.explanation.contains("kept (margin-bottom, negative)"));

        let json = output.to_json().unwrap();
        assert_eq!(json.matches("\"negative\": true").count(), 2);
    }

    #[test]
    fn test_explain_empty() {
        let output = ClassMerger::builtin().explain(&[]);
        assert_eq!(output.merged, "");
        assert!(output.tokens.is_empty());
    }
}
