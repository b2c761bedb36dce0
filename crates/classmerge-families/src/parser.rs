//! Class token parser.
//!
//! Splits a class token into variant modifiers, importance markers and the
//! base utility. Separators inside `[...]` and `(...)` are not split on, so
//! arbitrary variants and arbitrary values survive intact.

/// A parsed class token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedToken {
    /// Variant modifiers in source order (e.g. `hover`, `md`, `[&>*]`).
    pub modifiers: Vec<String>,

    /// Whether the base carries the `!` important marker (leading or trailing).
    pub important: bool,

    /// Whether the base value is negated with a leading `-`.
    pub negative: bool,

    /// Base utility without modifiers or markers.
    pub base: String,
}

/// Parse a class token.
///
/// # Arguments
/// * `token` - A single whitespace-free class token.
/// * `separator` - The variant separator, `:` in a default setup.
///
/// # Returns
/// The parsed token, or an error message when brackets are unbalanced or
/// a modifier or the base utility is empty.
pub fn parse_token(token: &str, separator: &str) -> Result<ParsedToken, String> {
    if separator.is_empty() {
        return Err("variant separator cannot be empty".to_string());
    }

    let mut parts: Vec<&str> = Vec::new();
    let mut bracket_depth: i32 = 0;
    let mut paren_depth: i32 = 0;
    let mut start = 0;
    let mut skip_until = 0;

    for (i, c) in token.char_indices() {
        if i < skip_until {
            continue;
        }
        match c {
            '[' => bracket_depth += 1,
            ']' => bracket_depth -= 1,
            '(' => paren_depth += 1,
            ')' => paren_depth -= 1,
            _ => {}
        }
        if bracket_depth < 0 || paren_depth < 0 {
            return Err(format!("unbalanced brackets in '{}'", token));
        }
        if bracket_depth == 0 && paren_depth == 0 && token[i..].starts_with(separator) {
            parts.push(&token[start..i]);
            start = i + separator.len();
            skip_until = start;
        }
    }

    if bracket_depth != 0 || paren_depth != 0 {
        return Err(format!("unbalanced brackets in '{}'", token));
    }

    let raw_base = &token[start..];
    if parts.iter().any(|m| m.is_empty()) {
        return Err(format!("empty variant modifier in '{}'", token));
    }

    let mut base = raw_base;
    let mut important = false;
    if let Some(rest) = base.strip_prefix('!') {
        base = rest;
        important = true;
    } else if let Some(rest) = base.strip_suffix('!') {
        base = rest;
        important = true;
    }

    let mut negative = false;
    if base.len() > 1 {
        if let Some(rest) = base.strip_prefix('-') {
            base = rest;
            negative = true;
        }
    }

    if base.is_empty() {
        return Err(format!("empty utility in '{}'", token));
    }

    Ok(ParsedToken {
        modifiers: parts.into_iter().map(str::to_string).collect(),
        important,
        negative,
        base: base.to_string(),
    })
}

/// Order modifiers so that equivalent variant stacks compare equal.
///
/// Arbitrary variants (`[...]`) depend on their position and stay where they
/// are; runs of ordinary modifiers between them are sorted.
pub fn sort_modifiers(modifiers: &[String]) -> Vec<String> {
    let mut sorted = Vec::with_capacity(modifiers.len());
    let mut pending: Vec<&String> = Vec::new();

    for modifier in modifiers {
        if modifier.starts_with('[') {
            pending.sort();
            sorted.extend(pending.drain(..).cloned());
            sorted.push(modifier.clone());
        } else {
            pending.push(modifier);
        }
    }

    pending.sort();
    sorted.extend(pending.into_iter().cloned());
    sorted
}

/// Split a `/postfix` modifier off a base utility (`bg-red-500/50`).
///
/// Only a slash outside of brackets counts. Returns `None` when there is no
/// postfix.
pub fn split_postfix(base: &str) -> Option<(&str, &str)> {
    let mut depth: i32 = 0;
    let mut slash = None;

    for (i, c) in base.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            '/' if depth == 0 => slash = Some(i),
            _ => {}
        }
    }

    let pos = slash?;
    let (head, tail) = (&base[..pos], &base[pos + 1..]);
    if head.is_empty() || tail.is_empty() {
        return None;
    }
    Some((head, tail))
}

/// Extract the property name of an arbitrary property (`[mask-type:alpha]`).
pub fn arbitrary_property(base: &str) -> Option<&str> {
    let inner = base.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;
    if property.is_empty() || value.is_empty() {
        return None;
    }
    if !property
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return None;
    }
    Some(property)
}
