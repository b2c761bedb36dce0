//! Value validators for prefixed class patterns.

use crate::config::ValueKind;
use regex_lite::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(\.\d+)?|\.\d+)$").expect("valid number regex"));

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid integer regex"));

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+$").expect("valid fraction regex"));

static TSHIRT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(\.\d+)?)?(xs|sm|md|lg|xl)$").expect("valid t-shirt regex")
});

static LENGTH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-?(\d+(\.\d+)?|\.\d+)(%|px|r?em|[sdl]?v([hwib]|min|max)|pt|pc|in|cm|mm|cap|ch|ex|r?lh|cq(w|h|i|b|min|max))|(calc|min|max|clamp)\(.+\)|0)$",
    )
    .expect("valid length regex")
});

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{3,8}$").expect("valid hex regex"));

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgba?|hsla?|hwb|(ok)?(lab|lch)|color-mix)\(.+\)$")
        .expect("valid color function regex")
});

static PALETTE_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(slate|gray|zinc|neutral|stone|red|orange|amber|yellow|lime|green|emerald|teal|cyan|sky|blue|indigo|violet|purple|fuchsia|pink|rose)-(50|[1-9]00|950)$",
    )
    .expect("valid palette regex")
});

static IMAGE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(url|image|image-set|cross-fade|element|(repeating-)?(linear|radial|conic)-gradient)\(.+\)$",
    )
    .expect("valid image regex")
});

// Offset pair at the start of a shadow (`0_1px_2px_#000`, `inset_0_0_4px`).
static SHADOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(inset_)?-?(\d*\.?\d+[a-z]+|0)_-?(\d*\.?\d+[a-z]+|0)")
        .expect("valid shadow regex")
});

const COLOR_KEYWORDS: &[&str] = &["inherit", "current", "transparent", "black", "white"];

/// Type of an arbitrary `[...]` value, from its hint or its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbitraryType {
    Color,
    Length,
    Number,
    /// `url(...)`, gradients and other `<image>` values.
    Image,
    /// Box-shadow shorthands.
    Shadow,
    /// No hint and no recognizable shape (e.g. `var(--x)`).
    Untyped,
    /// Any other hint (e.g. `family-name:`).
    Other,
}

/// Strip the brackets of an arbitrary value.
pub fn arbitrary_inner(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

/// Classify the content of an arbitrary value.
pub fn arbitrary_type(inner: &str) -> ArbitraryType {
    if let Some((label, rest)) = inner.split_once(':') {
        let is_label = !label.is_empty()
            && label.chars().all(|c| c.is_ascii_lowercase() || c == '-')
            && !rest.is_empty();
        if is_label {
            return match label {
                "color" => ArbitraryType::Color,
                "length" | "size" | "percentage" => ArbitraryType::Length,
                "number" => ArbitraryType::Number,
                "url" | "image" => ArbitraryType::Image,
                "shadow" => ArbitraryType::Shadow,
                _ => ArbitraryType::Other,
            };
        }
    }

    if HEX_COLOR.is_match(inner) || COLOR_FUNCTION.is_match(inner) {
        ArbitraryType::Color
    } else if IMAGE_FUNCTION.is_match(inner) {
        ArbitraryType::Image
    } else if SHADOW.is_match(inner) {
        ArbitraryType::Shadow
    } else if NUMBER.is_match(inner) {
        ArbitraryType::Number
    } else if LENGTH_UNIT.is_match(inner) {
        ArbitraryType::Length
    } else {
        ArbitraryType::Untyped
    }
}

/// Whether `value` is acceptable for a pattern of the given kind.
pub fn accepts(kind: &ValueKind, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    let arbitrary = arbitrary_inner(value).map(arbitrary_type);

    match kind {
        ValueKind::Any => true,
        ValueKind::Number => {
            NUMBER.is_match(value) || arbitrary == Some(ArbitraryType::Number)
        }
        ValueKind::Integer => {
            INTEGER.is_match(value) || arbitrary == Some(ArbitraryType::Number)
        }
        ValueKind::Length => {
            is_scale_value(value)
                || value == "screen"
                || matches!(
                    arbitrary,
                    Some(ArbitraryType::Length) | Some(ArbitraryType::Number)
                )
        }
        ValueKind::Spacing => is_scale_value(value) || arbitrary.is_some(),
        ValueKind::Tshirt => {
            value == "base"
                || TSHIRT.is_match(value)
                || arbitrary == Some(ArbitraryType::Length)
        }
        ValueKind::Color => {
            COLOR_KEYWORDS.contains(&value)
                || PALETTE_COLOR.is_match(value)
                || matches!(
                    arbitrary,
                    Some(ArbitraryType::Color) | Some(ArbitraryType::Untyped)
                )
        }
        ValueKind::Image => arbitrary == Some(ArbitraryType::Image),
        ValueKind::Shadow => arbitrary == Some(ArbitraryType::Shadow),
        ValueKind::Arbitrary => arbitrary.is_some(),
        ValueKind::Keywords(words) => words.iter().any(|w| w == value),
    }
}

fn is_scale_value(value: &str) -> bool {
    NUMBER.is_match(value) || FRACTION.is_match(value) || value == "px" || value == "full"
}
