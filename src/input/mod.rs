//! Class inputs
//!
//! A `ClassInput` is anything that can contribute class tokens to a merge:
//! literal strings, guarded (optional) values, nested sequences and
//! token-to-bool maps. Inputs are flattened depth-first, left to right.

use serde_json::Value;
use std::collections::BTreeMap;

/// A value that contributes class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassInput {
    /// Contributes nothing (a false guard or an omitted value).
    #[default]
    Skip,
    /// One or more whitespace-separated tokens.
    Literal(String),
    /// Nested inputs, flattened in order.
    List(Vec<ClassInput>),
    /// Tokens guarded by a flag, in insertion order.
    Map(ClassMap),
}

impl ClassInput {
    /// `token` when `condition` holds, nothing otherwise.
    pub fn when(condition: bool, token: impl Into<ClassInput>) -> Self {
        if condition {
            token.into()
        } else {
            ClassInput::Skip
        }
    }

    /// Append the tokens of this input to `out`, skipping guarded-off parts.
    pub fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ClassInput::Skip => {}
            ClassInput::Literal(s) => out.extend(s.split_whitespace()),
            ClassInput::List(items) => {
                for item in items {
                    item.collect_tokens(out);
                }
            }
            ClassInput::Map(map) => {
                for (key, enabled) in &map.entries {
                    if *enabled {
                        out.extend(key.split_whitespace());
                    }
                }
            }
        }
    }

    /// Flatten inputs into their tokens.
    pub fn tokens(inputs: &[ClassInput]) -> Vec<&str> {
        let mut out = Vec::new();
        for input in inputs {
            input.collect_tokens(&mut out);
        }
        out
    }
}

/// Ordered token-to-flag mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    entries: Vec<(String, bool)>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a guarded token. A repeated token keeps its first position and
    /// takes the latest flag.
    pub fn insert(&mut self, token: impl Into<String>, enabled: bool) {
        let token = token.into();
        match self.entries.iter_mut().find(|(k, _)| *k == token) {
            Some(entry) => entry.1 = enabled,
            None => self.entries.push((token, enabled)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut map = ClassMap::new();
        for (token, enabled) in iter {
            map.insert(token, enabled);
        }
        map
    }
}

impl<K: Into<String>, const N: usize> From<[(K, bool); N]> for ClassMap {
    fn from(entries: [(K, bool); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>> From<Vec<(K, bool)>> for ClassMap {
    fn from(entries: Vec<(K, bool)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BTreeMap<String, bool>> for ClassMap {
    fn from(entries: BTreeMap<String, bool>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<&str> for ClassInput {
    fn from(s: &str) -> Self {
        ClassInput::Literal(s.to_string())
    }
}

impl From<String> for ClassInput {
    fn from(s: String) -> Self {
        ClassInput::Literal(s)
    }
}

impl From<&String> for ClassInput {
    fn from(s: &String) -> Self {
        ClassInput::Literal(s.clone())
    }
}

impl<T: Into<ClassInput>> From<Option<T>> for ClassInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl<T: Into<ClassInput>> From<Vec<T>> for ClassInput {
    fn from(items: Vec<T>) -> Self {
        ClassInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ClassInput>, const N: usize> From<[T; N]> for ClassInput {
    fn from(items: [T; N]) -> Self {
        ClassInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ClassInput> + Clone> From<&[T]> for ClassInput {
    fn from(items: &[T]) -> Self {
        ClassInput::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl From<ClassMap> for ClassInput {
    fn from(map: ClassMap) -> Self {
        ClassInput::Map(map)
    }
}

/// JSON inputs: strings are literals, arrays are lists and objects are maps
/// whose `true` members are kept. Every other value contributes nothing.
impl From<&Value> for ClassInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => ClassInput::Literal(s.clone()),
            Value::Array(items) => ClassInput::List(items.iter().map(ClassInput::from).collect()),
            Value::Object(members) => ClassInput::Map(
                members
                    .iter()
                    .map(|(k, v)| (k.clone(), v.as_bool() == Some(true)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => ClassInput::Skip,
        }
    }
}

impl From<Value> for ClassInput {
    fn from(value: Value) -> Self {
        ClassInput::from(&value)
    }
}

/// Build a [`ClassMap`] from `token => flag` pairs.
///
/// ```
/// let map = classmerge::class_map! { "c" => true, "d" => false };
/// assert_eq!(map.iter().count(), 2);
/// ```
#[macro_export]
macro_rules! class_map {
    ($($token:expr => $enabled:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::ClassMap::new();
        $(map.insert($token, $enabled);)*
        map
    }};
}
