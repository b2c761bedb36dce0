//! Token classification result types.

use serde::{Deserialize, Serialize};

/// Why a token did not match any family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "detail")]
pub enum UnmatchedReason {
    /// The token could not be parsed.
    #[serde(rename = "PARSE_ERROR")]
    ParseError(String),

    /// The table requires a class prefix the token does not carry.
    #[serde(rename = "MISSING_PREFIX")]
    MissingPrefix(String),

    /// No family pattern matches the base utility.
    #[serde(rename = "NO_FAMILY")]
    NoFamily(String),
}

impl UnmatchedReason {
    /// Get a machine-readable string representation.
    pub fn to_code(&self) -> String {
        match self {
            UnmatchedReason::ParseError(e) => format!("PARSE_ERROR:{}", e),
            UnmatchedReason::MissingPrefix(p) => format!("MISSING_PREFIX:{}", p),
            UnmatchedReason::NoFamily(b) => format!("NO_FAMILY:{}", b),
        }
    }
}

/// A class token together with the family it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifiedToken {
    /// The token as written.
    pub token: String,

    /// Matched family id. None for tokens outside the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Variant modifiers in conflict order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    /// Whether the token is marked important.
    #[serde(default)]
    pub important: bool,

    /// Whether the value is negated (`-mt-4`).
    #[serde(default, skip_serializing_if = "is_false")]
    pub negative: bool,

    /// Why no family matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmatched: Option<UnmatchedReason>,
}

impl ClassifiedToken {
    /// Create a token that belongs to a family.
    pub fn matched(token: &str, family: String, modifiers: Vec<String>, important: bool) -> Self {
        Self {
            token: token.to_string(),
            family: Some(family),
            modifiers,
            important,
            negative: false,
            unmatched: None,
        }
    }

    /// Create a token outside the table.
    pub fn unmatched(token: &str, reason: UnmatchedReason) -> Self {
        Self {
            token: token.to_string(),
            family: None,
            modifiers: Vec::new(),
            important: false,
            negative: false,
            unmatched: Some(reason),
        }
    }

    /// Mark the token's value as negated.
    pub fn negated(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Key shared by all tokens applied under the same variant stack.
    ///
    /// Two tokens can only override each other when their variant keys are
    /// equal.
    pub fn variant_key(&self) -> String {
        let mut key = self.modifiers.join(":");
        if !key.is_empty() {
            key.push(':');
        }
        if self.important {
            key.push('!');
        }
        key
    }

    /// Conflict key for `family` under this token's variant stack.
    pub fn conflict_key(&self, family: &str) -> String {
        format!("{}{}", self.variant_key(), family)
    }
}

fn is_false(value: &bool) -> bool {
    !value
}
