//! Built-in utility-family table.
//!
//! Covers the common Tailwind CSS v3 utilities. Anything missing can be
//! added or overridden through configuration.

use crate::config::{ClassPattern, FamilyConfig, FamilyDef, ValueKind};
use std::collections::BTreeMap;

fn exact(classes: &[&str]) -> Vec<ClassPattern> {
    classes
        .iter()
        .map(|c| ClassPattern::Exact {
            class: c.to_string(),
        })
        .collect()
}

fn prefixed(prefix: &str, value: ValueKind) -> ClassPattern {
    ClassPattern::Prefixed {
        prefix: prefix.to_string(),
        value,
    }
}

fn keywords(prefix: &str, words: &[&str]) -> ClassPattern {
    prefixed(
        prefix,
        ValueKind::Keywords(words.iter().map(|w| w.to_string()).collect()),
    )
}

struct Builder {
    families: BTreeMap<String, FamilyDef>,
}

impl Builder {
    fn family(&mut self, id: &str, classes: Vec<ClassPattern>, conflicts: &[&str]) -> &mut Self {
        self.families.insert(
            id.to_string(),
            FamilyDef {
                classes,
                conflicts: conflicts.iter().map(|c| c.to_string()).collect(),
                disabled: false,
            },
        );
        self
    }

    /// A family of `<prefix>-<value>` classes plus optional keywords.
    fn scale(
        &mut self,
        id: &str,
        prefix: &str,
        value: ValueKind,
        extra: &[&str],
        conflicts: &[&str],
    ) -> &mut Self {
        let mut classes = vec![prefixed(prefix, value)];
        if !extra.is_empty() {
            classes.push(keywords(prefix, extra));
        }
        self.family(id, classes, conflicts)
    }
}

const SIDES: &[(&str, &str)] = &[
    ("x", "x"),
    ("y", "y"),
    ("s", "start"),
    ("e", "end"),
    ("t", "top"),
    ("r", "right"),
    ("b", "bottom"),
    ("l", "left"),
];

impl FamilyConfig {
    /// The built-in table.
    pub fn builtin() -> Self {
        let mut b = Builder {
            families: BTreeMap::new(),
        };

        layout(&mut b);
        flexbox_and_grid(&mut b);
        spacing(&mut b);
        sizing(&mut b);
        typography(&mut b);
        backgrounds(&mut b);
        borders(&mut b);
        effects(&mut b);
        interactivity(&mut b);

        FamilyConfig {
            families: b.families,
            ..Default::default()
        }
    }
}

fn layout(b: &mut Builder) {
    b.family(
        "display",
        exact(&[
            "block",
            "inline-block",
            "inline",
            "flex",
            "inline-flex",
            "table",
            "inline-table",
            "table-caption",
            "table-cell",
            "table-column",
            "table-column-group",
            "table-footer-group",
            "table-header-group",
            "table-row-group",
            "table-row",
            "flow-root",
            "grid",
            "inline-grid",
            "contents",
            "list-item",
            "hidden",
        ]),
        &[],
    )
    .family(
        "position",
        exact(&["static", "fixed", "absolute", "relative", "sticky"]),
        &[],
    )
    .family("visibility", exact(&["visible", "invisible", "collapse"]), &[])
    .family("box-sizing", exact(&["box-border", "box-content"]), &[])
    .family("isolation", exact(&["isolate", "isolation-auto"]), &[])
    .family(
        "float",
        vec![keywords("float", &["right", "left", "none", "start", "end"])],
        &[],
    )
    .family(
        "clear",
        vec![keywords("clear", &["left", "right", "both", "none", "start", "end"])],
        &[],
    )
    .family(
        "object-fit",
        vec![keywords(
            "object",
            &["contain", "cover", "fill", "none", "scale-down"],
        )],
        &[],
    )
    .family(
        "aspect",
        vec![
            keywords("aspect", &["auto", "square", "video"]),
            prefixed("aspect", ValueKind::Arbitrary),
        ],
        &[],
    );

    const OVERFLOW: &[&str] = &["auto", "hidden", "clip", "visible", "scroll"];
    b.family(
        "overflow",
        vec![keywords("overflow", OVERFLOW)],
        &["overflow-x", "overflow-y"],
    )
    .family("overflow-x", vec![keywords("overflow-x", OVERFLOW)], &[])
    .family("overflow-y", vec![keywords("overflow-y", OVERFLOW)], &[]);

    b.scale(
        "inset",
        "inset",
        ValueKind::Spacing,
        &["auto"],
        &["inset-x", "inset-y", "start", "end", "top", "right", "bottom", "left"],
    )
    .scale("inset-x", "inset-x", ValueKind::Spacing, &["auto"], &["right", "left"])
    .scale("inset-y", "inset-y", ValueKind::Spacing, &["auto"], &["top", "bottom"]);
    for side in ["start", "end", "top", "right", "bottom", "left"] {
        b.scale(side, side, ValueKind::Spacing, &["auto"], &[]);
    }

    b.scale("z-index", "z", ValueKind::Integer, &["auto"], &[]);
}

fn flexbox_and_grid(b: &mut Builder) {
    b.family(
        "flex-direction",
        vec![keywords("flex", &["row", "row-reverse", "col", "col-reverse"])],
        &[],
    )
    .family(
        "flex-wrap",
        vec![keywords("flex", &["wrap", "wrap-reverse", "nowrap"])],
        &[],
    )
    .family(
        "flex",
        vec![
            keywords("flex", &["1", "auto", "initial", "none"]),
            prefixed("flex", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family(
        "grow",
        vec![
            ClassPattern::Exact {
                class: "grow".to_string(),
            },
            prefixed("grow", ValueKind::Integer),
        ],
        &[],
    )
    .family(
        "shrink",
        vec![
            ClassPattern::Exact {
                class: "shrink".to_string(),
            },
            prefixed("shrink", ValueKind::Integer),
        ],
        &[],
    )
    .scale("basis", "basis", ValueKind::Spacing, &["auto"], &[])
    .scale("order", "order", ValueKind::Integer, &["first", "last", "none"], &[])
    .scale(
        "grid-cols",
        "grid-cols",
        ValueKind::Integer,
        &["none", "subgrid"],
        &[],
    )
    .scale(
        "grid-rows",
        "grid-rows",
        ValueKind::Integer,
        &["none", "subgrid"],
        &[],
    )
    .scale("col-span", "col-span", ValueKind::Integer, &["full"], &[])
    .scale("row-span", "row-span", ValueKind::Integer, &["full"], &[])
    .scale("gap", "gap", ValueKind::Spacing, &[], &["gap-x", "gap-y"])
    .scale("gap-x", "gap-x", ValueKind::Spacing, &[], &[])
    .scale("gap-y", "gap-y", ValueKind::Spacing, &[], &[]);

    const CONTENT: &[&str] = &[
        "normal", "start", "end", "center", "between", "around", "evenly", "stretch",
    ];
    b.family("justify-content", vec![keywords("justify", CONTENT)], &[])
        .family(
            "justify-items",
            vec![keywords("justify-items", &["start", "end", "center", "stretch"])],
            &[],
        )
        .family(
            "justify-self",
            vec![keywords(
                "justify-self",
                &["auto", "start", "end", "center", "stretch"],
            )],
            &[],
        )
        .family(
            "align-content",
            vec![keywords(
                "content",
                &[
                    "normal", "center", "start", "end", "between", "around", "evenly",
                    "baseline", "stretch",
                ],
            )],
            &[],
        )
        .family(
            "align-items",
            vec![keywords(
                "items",
                &["start", "end", "center", "baseline", "stretch"],
            )],
            &[],
        )
        .family(
            "align-self",
            vec![keywords(
                "self",
                &["auto", "start", "end", "center", "stretch", "baseline"],
            )],
            &[],
        )
        .family("place-content", vec![keywords("place-content", CONTENT)], &[])
        .family(
            "place-items",
            vec![keywords(
                "place-items",
                &["start", "end", "center", "baseline", "stretch"],
            )],
            &[],
        )
        .family(
            "place-self",
            vec![keywords(
                "place-self",
                &["auto", "start", "end", "center", "stretch"],
            )],
            &[],
        );
}

/// Box families: `p`, `px`, `py`, `ps`, ... with the axis/side overrides.
fn box_families(b: &mut Builder, id: &str, prefix: &str, extra: &[&str]) {
    let sides: Vec<String> = SIDES
        .iter()
        .map(|(_, side)| format!("{}-{}", id, side))
        .collect();
    let all: Vec<&str> = sides.iter().map(String::as_str).collect();
    b.scale(id, prefix, ValueKind::Spacing, extra, &all);

    for (short, side) in SIDES {
        let conflicts: Vec<String> = match *short {
            "x" => vec![format!("{}-right", id), format!("{}-left", id)],
            "y" => vec![format!("{}-top", id), format!("{}-bottom", id)],
            _ => Vec::new(),
        };
        let conflicts: Vec<&str> = conflicts.iter().map(String::as_str).collect();
        b.scale(
            &format!("{}-{}", id, side),
            &format!("{}{}", prefix, short),
            ValueKind::Spacing,
            extra,
            &conflicts,
        );
    }
}

fn spacing(b: &mut Builder) {
    box_families(b, "padding", "p", &[]);
    box_families(b, "margin", "m", &["auto"]);

    b.scale("space-x", "space-x", ValueKind::Spacing, &[], &[])
        .scale("space-y", "space-y", ValueKind::Spacing, &[], &[])
        .family("space-x-reverse", exact(&["space-x-reverse"]), &[])
        .family("space-y-reverse", exact(&["space-y-reverse"]), &[]);
}

fn sizing(b: &mut Builder) {
    const FIT: &[&str] = &["auto", "min", "max", "fit"];

    b.family(
        "width",
        vec![
            prefixed("w", ValueKind::Spacing),
            keywords("w", &["auto", "min", "max", "fit", "screen", "svw", "lvw", "dvw"]),
        ],
        &[],
    )
    .scale("min-width", "min-w", ValueKind::Spacing, &["min", "max", "fit"], &[])
    .family(
        "max-width",
        vec![
            prefixed("max-w", ValueKind::Tshirt),
            keywords("max-w", &["none", "full", "min", "max", "fit", "prose"]),
            prefixed("max-w", ValueKind::Arbitrary),
            prefixed("max-w-screen", ValueKind::Tshirt),
        ],
        &[],
    )
    .family(
        "height",
        vec![
            prefixed("h", ValueKind::Spacing),
            keywords("h", &["auto", "min", "max", "fit", "screen", "svh", "lvh", "dvh"]),
        ],
        &[],
    )
    .scale(
        "min-height",
        "min-h",
        ValueKind::Spacing,
        &["min", "max", "fit", "screen", "svh", "lvh", "dvh"],
        &[],
    )
    .scale(
        "max-height",
        "max-h",
        ValueKind::Spacing,
        &["none", "min", "max", "fit", "screen", "svh", "lvh", "dvh"],
        &[],
    )
    .scale("size", "size", ValueKind::Spacing, FIT, &["width", "height"]);
}

fn typography(b: &mut Builder) {
    b.family("font-size", vec![prefixed("text", ValueKind::Tshirt)], &[])
        .family(
            "font-weight",
            vec![
                keywords(
                    "font",
                    &[
                        "thin",
                        "extralight",
                        "light",
                        "normal",
                        "medium",
                        "semibold",
                        "bold",
                        "extrabold",
                        "black",
                    ],
                ),
                prefixed("font", ValueKind::Number),
            ],
            &[],
        )
        .family(
            "font-family",
            vec![
                keywords("font", &["sans", "serif", "mono"]),
                prefixed("font", ValueKind::Arbitrary),
            ],
            &[],
        )
        .family("font-style", exact(&["italic", "not-italic"]), &[])
        .family(
            "text-align",
            vec![keywords(
                "text",
                &["left", "center", "right", "justify", "start", "end"],
            )],
            &[],
        )
        .family("text-color", vec![prefixed("text", ValueKind::Color)], &[])
        .scale(
            "leading",
            "leading",
            ValueKind::Length,
            &["none", "tight", "snug", "normal", "relaxed", "loose"],
            &[],
        )
        .scale(
            "tracking",
            "tracking",
            ValueKind::Length,
            &["tighter", "tight", "normal", "wide", "wider", "widest"],
            &[],
        )
        .family(
            "text-decoration",
            exact(&["underline", "overline", "line-through", "no-underline"]),
            &[],
        )
        .family(
            "text-decoration-color",
            vec![prefixed("decoration", ValueKind::Color)],
            &[],
        )
        .family(
            "text-transform",
            exact(&["uppercase", "lowercase", "capitalize", "normal-case"]),
            &[],
        )
        .family(
            "text-overflow",
            exact(&["truncate", "text-ellipsis", "text-clip"]),
            &[],
        )
        .family(
            "whitespace",
            vec![keywords(
                "whitespace",
                &["normal", "nowrap", "pre", "pre-line", "pre-wrap", "break-spaces"],
            )],
            &[],
        )
        .family(
            "word-break",
            exact(&["break-normal", "break-words", "break-all", "break-keep"]),
            &[],
        )
        .family(
            "list-style-type",
            vec![
                keywords("list", &["none", "disc", "decimal"]),
                prefixed("list", ValueKind::Arbitrary),
            ],
            &[],
        )
        .family(
            "vertical-align",
            vec![keywords(
                "align",
                &[
                    "baseline",
                    "top",
                    "middle",
                    "bottom",
                    "text-top",
                    "text-bottom",
                    "sub",
                    "super",
                ],
            )],
            &[],
        );
}

fn backgrounds(b: &mut Builder) {
    b.family("bg-color", vec![prefixed("bg", ValueKind::Color)], &[])
        .family(
            "bg-attachment",
            vec![keywords("bg", &["fixed", "local", "scroll"])],
            &[],
        )
        .family(
            "bg-size",
            vec![keywords("bg", &["auto", "cover", "contain"])],
            &[],
        )
        .family(
            "bg-position",
            vec![keywords(
                "bg",
                &[
                    "bottom",
                    "center",
                    "left",
                    "left-bottom",
                    "left-top",
                    "right",
                    "right-bottom",
                    "right-top",
                    "top",
                ],
            )],
            &[],
        )
        .family(
            "bg-repeat",
            vec![
                ClassPattern::Exact {
                    class: "bg-repeat".to_string(),
                },
                ClassPattern::Exact {
                    class: "bg-no-repeat".to_string(),
                },
                keywords("bg-repeat", &["x", "y", "round", "space"]),
            ],
            &[],
        )
        .family(
            "bg-image",
            vec![
                keywords("bg", &["none"]),
                prefixed("bg", ValueKind::Image),
                keywords("bg-gradient-to", &["t", "tr", "r", "br", "b", "bl", "l", "tl"]),
            ],
            &[],
        )
        .family("gradient-from", vec![prefixed("from", ValueKind::Color)], &[])
        .family("gradient-via", vec![prefixed("via", ValueKind::Color)], &[])
        .family("gradient-to", vec![prefixed("to", ValueKind::Color)], &[]);
}

fn borders(b: &mut Builder) {
    // border-width: `border`, `border-2`, `border-x`, `border-t-4`, ...
    let side_ids: Vec<String> = SIDES
        .iter()
        .map(|(_, side)| format!("border-width-{}", side))
        .collect();
    let side_refs: Vec<&str> = side_ids.iter().map(String::as_str).collect();
    b.family(
        "border-width",
        vec![
            ClassPattern::Exact {
                class: "border".to_string(),
            },
            prefixed("border", ValueKind::Length),
        ],
        &side_refs,
    );
    for (short, side) in SIDES {
        let conflicts: &[&str] = match *short {
            "x" => &["border-width-right", "border-width-left"],
            "y" => &["border-width-top", "border-width-bottom"],
            _ => &[],
        };
        let prefix = format!("border-{}", short);
        b.family(
            &format!("border-width-{}", side),
            vec![
                ClassPattern::Exact {
                    class: prefix.clone(),
                },
                prefixed(&prefix, ValueKind::Length),
            ],
            conflicts,
        );
    }

    b.family("border-color", vec![prefixed("border", ValueKind::Color)], &[])
        .family(
            "border-style",
            vec![keywords(
                "border",
                &["solid", "dashed", "dotted", "double", "hidden", "none"],
            )],
            &[],
        );

    // border-radius: `rounded`, `rounded-lg`, `rounded-t-md`, `rounded-tl`, ...
    const RADIUS: &[(&str, &[&str])] = &[
        ("s", &["ss", "es"]),
        ("e", &["se", "ee"]),
        ("t", &["tl", "tr"]),
        ("r", &["tr", "br"]),
        ("b", &["br", "bl"]),
        ("l", &["tl", "bl"]),
        ("ss", &[]),
        ("se", &[]),
        ("ee", &[]),
        ("es", &[]),
        ("tl", &[]),
        ("tr", &[]),
        ("br", &[]),
        ("bl", &[]),
    ];
    let all_corners: Vec<String> = RADIUS.iter().map(|(corner, _)| radius_family(corner)).collect();
    let all_refs: Vec<&str> = all_corners.iter().map(String::as_str).collect();
    b.family("border-radius", radius_patterns("rounded"), &all_refs);
    for (corner, overrides) in RADIUS {
        let conflicts: Vec<String> = overrides.iter().map(|c| radius_family(c)).collect();
        let conflicts: Vec<&str> = conflicts.iter().map(String::as_str).collect();
        b.family(
            &radius_family(corner),
            radius_patterns(&format!("rounded-{}", corner)),
            &conflicts,
        );
    }

    b.family(
        "outline-style",
        vec![
            ClassPattern::Exact {
                class: "outline".to_string(),
            },
            keywords("outline", &["none", "dashed", "dotted", "double"]),
        ],
        &[],
    )
    .family("outline-width", vec![prefixed("outline", ValueKind::Length)], &[])
    .family("outline-color", vec![prefixed("outline", ValueKind::Color)], &[])
    .family(
        "outline-offset",
        vec![prefixed("outline-offset", ValueKind::Length)],
        &[],
    )
    .family(
        "ring-width",
        vec![
            ClassPattern::Exact {
                class: "ring".to_string(),
            },
            prefixed("ring", ValueKind::Length),
        ],
        &[],
    )
    .family("ring-color", vec![prefixed("ring", ValueKind::Color)], &[])
    .family("ring-inset", exact(&["ring-inset"]), &[])
    .family(
        "ring-offset-width",
        vec![prefixed("ring-offset", ValueKind::Length)],
        &[],
    )
    .family(
        "ring-offset-color",
        vec![prefixed("ring-offset", ValueKind::Color)],
        &[],
    );
}

fn radius_family(corner: &str) -> String {
    format!("border-radius-{}", corner)
}

fn radius_patterns(prefix: &str) -> Vec<ClassPattern> {
    vec![
        ClassPattern::Exact {
            class: prefix.to_string(),
        },
        prefixed(prefix, ValueKind::Tshirt),
        keywords(prefix, &["none", "full"]),
        prefixed(prefix, ValueKind::Arbitrary),
    ]
}

fn effects(b: &mut Builder) {
    b.family(
        "shadow",
        vec![
            ClassPattern::Exact {
                class: "shadow".to_string(),
            },
            prefixed("shadow", ValueKind::Tshirt),
            keywords("shadow", &["inner", "none"]),
            prefixed("shadow", ValueKind::Shadow),
            prefixed("shadow", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family("shadow-color", vec![prefixed("shadow", ValueKind::Color)], &[])
    .family("opacity", vec![prefixed("opacity", ValueKind::Number)], &[])
    .family(
        "transition",
        vec![
            ClassPattern::Exact {
                class: "transition".to_string(),
            },
            keywords(
                "transition",
                &["none", "all", "colors", "opacity", "shadow", "transform"],
            ),
            prefixed("transition", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family("duration", vec![prefixed("duration", ValueKind::Integer)], &[])
    .family("delay", vec![prefixed("delay", ValueKind::Integer)], &[])
    .family(
        "ease",
        vec![
            keywords("ease", &["linear", "in", "out", "in-out"]),
            prefixed("ease", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family(
        "animate",
        vec![
            keywords("animate", &["none", "spin", "ping", "pulse", "bounce"]),
            prefixed("animate", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family(
        "scale",
        vec![prefixed("scale", ValueKind::Number)],
        &["scale-x", "scale-y"],
    )
    .family("scale-x", vec![prefixed("scale-x", ValueKind::Number)], &[])
    .family("scale-y", vec![prefixed("scale-y", ValueKind::Number)], &[])
    .family(
        "rotate",
        vec![
            prefixed("rotate", ValueKind::Number),
            prefixed("rotate", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family(
        "translate-x",
        vec![prefixed("translate-x", ValueKind::Spacing)],
        &[],
    )
    .family(
        "translate-y",
        vec![prefixed("translate-y", ValueKind::Spacing)],
        &[],
    );
}

fn interactivity(b: &mut Builder) {
    b.family(
        "cursor",
        vec![
            keywords(
                "cursor",
                &[
                    "auto",
                    "default",
                    "pointer",
                    "wait",
                    "text",
                    "move",
                    "help",
                    "not-allowed",
                    "none",
                    "progress",
                    "grab",
                    "grabbing",
                ],
            ),
            prefixed("cursor", ValueKind::Arbitrary),
        ],
        &[],
    )
    .family(
        "pointer-events",
        vec![keywords("pointer-events", &["none", "auto"])],
        &[],
    )
    .family(
        "user-select",
        vec![keywords("select", &["none", "text", "all", "auto"])],
        &[],
    )
    .family(
        "resize",
        vec![
            ClassPattern::Exact {
                class: "resize".to_string(),
            },
            keywords("resize", &["none", "x", "y"]),
        ],
        &[],
    )
    .family(
        "appearance",
        exact(&["appearance-none", "appearance-auto"]),
        &[],
    )
    .family("sr", exact(&["sr-only", "not-sr-only"]), &[])
    .family(
        "fill",
        vec![keywords("fill", &["none"]), prefixed("fill", ValueKind::Color)],
        &[],
    )
    .family(
        "stroke",
        vec![keywords("stroke", &["none"]), prefixed("stroke", ValueKind::Color)],
        &[],
    )
    .family(
        "stroke-width",
        vec![prefixed("stroke", ValueKind::Number)],
        &[],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let config = FamilyConfig::builtin();
        assert_eq!(config.validate(), Ok(()));
        assert!(config.prefix.is_none());
        assert_eq!(config.separator, ":");
    }

    #[test]
    fn test_builtin_padding_conflicts() {
        let config = FamilyConfig::builtin();
        let padding = &config.families["padding"];
        assert!(padding.conflicts.contains(&"padding-x".to_string()));
        assert!(padding.conflicts.contains(&"padding-top".to_string()));
        assert_eq!(padding.conflicts.len(), SIDES.len());

        let padding_x = &config.families["padding-x"];
        assert_eq!(
            padding_x.conflicts,
            vec!["padding-right".to_string(), "padding-left".to_string()]
        );
        assert!(config.families["padding-top"].conflicts.is_empty());
    }

    #[test]
    fn test_builtin_margin_accepts_auto() {
        let config = FamilyConfig::builtin();
        let margin_x = &config.families["margin-x"];
        assert!(margin_x.classes.contains(&ClassPattern::Prefixed {
            prefix: "mx".to_string(),
            value: ValueKind::Keywords(vec!["auto".to_string()]),
        }));
    }

    #[test]
    fn test_builtin_round_trips_through_json() {
        let config = FamilyConfig::builtin();
        let value = serde_json::to_value(&config).unwrap();
        let parsed: FamilyConfig = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, config);
    }
}
