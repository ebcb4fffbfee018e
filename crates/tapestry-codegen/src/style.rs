//! Platform-neutral style blocks.
//!
//! Declarations use React Native style keys. The React Native emitter writes
//! them as-is; the Flutter emitter maps the keys it understands onto its
//! `NodeStyle` fields.

use crate::props::Props;
use tapestry_catalog::kinds;
use tapestry_core::{ButtonVariant, ComponentKind, Dimension, FieldType};

/// One style declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    /// Percentage of the parent, e.g. `100` for `'100%'`.
    Percent(f64),
    Color(String),
    /// Enumerated keyword such as `row` or `bold`.
    Keyword(String),
    /// Verbatim object literal.
    Raw(String),
}

impl StyleValue {
    pub fn keyword(s: impl Into<String>) -> Self {
        StyleValue::Keyword(s.into())
    }

    pub fn color(s: impl Into<String>) -> Self {
        StyleValue::Color(s.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

pub type Decl = (&'static str, StyleValue);

/// Styles for one node, named by its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleBlock {
    pub ident: String,
    pub decls: Vec<Decl>,
}

impl StyleBlock {
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.decls.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Format a number without a trailing `.0`, rounded to two decimals.
pub fn fmt_num(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Font size for a heading level (`"1"` through `"4"`).
pub fn heading_size(level: &str) -> f64 {
    match level {
        "1" => 32.0,
        "2" => 26.0,
        "3" => 22.0,
        _ => 18.0,
    }
}

fn num(n: f64) -> StyleValue {
    StyleValue::Number(n)
}

/// Node styles for a catalog kind, or `None` for an unknown kind.
pub fn synthesize(kind: &str, p: &Props<'_>) -> Option<Vec<Decl>> {
    use StyleValue as V;

    let decls = match kind {
        kinds::CONTAINER => vec![
            ("flexDirection", V::keyword(p.choice("direction"))),
            ("alignItems", V::keyword(p.choice("alignItems"))),
            ("gap", num(p.number("gap"))),
            ("padding", num(p.number("padding"))),
            ("backgroundColor", V::color(p.color("backgroundColor"))),
            ("borderRadius", num(p.number("borderRadius"))),
            ("borderWidth", num(p.number("borderWidth"))),
            ("borderColor", V::color(p.color("borderColor"))),
        ],
        kinds::CARD => {
            let mut decls = vec![
                ("backgroundColor", V::color(p.color("backgroundColor"))),
                ("padding", num(p.number("padding"))),
                ("gap", num(p.number("gap"))),
                ("borderRadius", num(p.number("borderRadius"))),
                ("borderWidth", num(p.number("borderWidth"))),
                ("borderColor", V::color(p.color("borderColor"))),
            ];
            if p.flag("shadow") {
                decls.extend([
                    ("shadowColor", V::color("#000000")),
                    ("shadowOpacity", num(0.08)),
                    ("shadowRadius", num(8.0)),
                    ("shadowOffset", V::Raw("{ width: 0, height: 2 }".to_string())),
                    ("elevation", num(3.0)),
                ]);
            }
            decls
        }
        kinds::DIVIDER => vec![
            ("height", num(p.number("thickness"))),
            ("backgroundColor", V::color(p.color("color"))),
            ("marginVertical", num(p.number("marginVertical"))),
        ],
        kinds::SPACER => vec![("height", num(p.number("height")))],
        kinds::BUTTON => {
            let palette = ButtonVariant::from_choice(p.choice("variant"))
                .palette(p.color("backgroundColor"), p.color("textColor"));
            let mut decls = vec![
                ("flexDirection", V::keyword("row")),
                ("alignItems", V::keyword("center")),
                ("justifyContent", V::keyword("center")),
                ("gap", num(8.0)),
                ("backgroundColor", V::Color(palette.fill)),
                ("borderRadius", num(p.number("borderRadius"))),
                ("paddingVertical", num(p.number("paddingVertical"))),
                ("paddingHorizontal", num(p.number("paddingHorizontal"))),
            ];
            if let Some(border) = palette.border {
                decls.push(("borderWidth", num(1.0)));
                decls.push(("borderColor", V::Color(border)));
            }
            let align = if p.flag("fullWidth") { "stretch" } else { "flex-start" };
            decls.push(("alignSelf", V::keyword(align)));
            if p.flag("disabled") {
                decls.push(("opacity", num(0.5)));
            }
            decls
        }
        kinds::INPUT => {
            let multiline = p.flag("multiline");
            let mut decls = vec![
                ("flexDirection", V::keyword("row")),
                ("alignItems", V::keyword(if multiline { "flex-start" } else { "center" })),
                ("gap", num(8.0)),
                ("backgroundColor", V::color(p.color("backgroundColor"))),
                ("borderWidth", num(1.0)),
                ("borderColor", V::color(p.color("borderColor"))),
                ("borderRadius", num(p.number("borderRadius"))),
                ("padding", num(p.number("padding"))),
            ];
            if multiline {
                decls.push(("minHeight", num(96.0)));
            }
            decls
        }
        kinds::SWITCH => vec![
            ("flexDirection", V::keyword("row")),
            ("alignItems", V::keyword("center")),
            ("justifyContent", V::keyword("space-between")),
        ],
        kinds::TEXT => {
            let size = p.positive("fontSize", 16.0);
            let mut decls = vec![
                ("fontSize", num(size)),
                ("color", V::color(p.color("color"))),
                ("fontWeight", V::keyword(p.choice("fontWeight"))),
                ("textAlign", V::keyword(p.choice("textAlign"))),
                ("lineHeight", num(size * p.positive("lineSpacing", 1.5))),
            ];
            if p.flag("italic") {
                decls.push(("fontStyle", V::keyword("italic")));
            }
            decls
        }
        kinds::HEADING => {
            let size = heading_size(p.choice("level"));
            vec![
                ("fontSize", num(size)),
                ("fontWeight", V::keyword("bold")),
                ("color", V::color(p.color("color"))),
                ("textAlign", V::keyword(p.choice("textAlign"))),
                ("lineHeight", num(size * p.positive("lineSpacing", 1.25))),
            ]
        }
        kinds::BADGE => vec![
            ("alignSelf", V::keyword("flex-start")),
            ("backgroundColor", V::color(p.color("backgroundColor"))),
            ("borderRadius", num(p.number("borderRadius"))),
            ("paddingVertical", num(4.0)),
            ("paddingHorizontal", num(10.0)),
        ],
        kinds::LIST => vec![
            ("backgroundColor", V::color(p.color("backgroundColor"))),
            ("borderRadius", num(p.number("borderRadius"))),
            ("overflow", V::keyword("hidden")),
        ],
        kinds::HEADER => vec![
            ("height", num(p.positive("height", 56.0))),
            ("flexDirection", V::keyword("row")),
            ("alignItems", V::keyword("center")),
            ("paddingHorizontal", num(8.0)),
            ("backgroundColor", V::color(p.color("backgroundColor"))),
        ],
        kinds::TABBAR => vec![
            ("flexDirection", V::keyword("row")),
            ("backgroundColor", V::color(p.color("backgroundColor"))),
            ("borderTopWidth", num(1.0)),
            ("borderTopColor", V::color("#e2e8f0")),
            ("paddingVertical", num(8.0)),
        ],
        kinds::IMAGE => vec![
            ("width", V::Percent(100.0)),
            ("height", num(p.positive("height", 200.0))),
            ("borderRadius", num(p.number("borderRadius"))),
        ],
        kinds::ICON => vec![("alignSelf", V::keyword("flex-start"))],
        kinds::AVATAR => {
            let size = p.positive("size", 48.0);
            vec![
                ("width", num(size)),
                ("height", num(size)),
                ("borderRadius", num(size / 2.0)),
                ("backgroundColor", V::color(p.color("backgroundColor"))),
                ("alignItems", V::keyword("center")),
                ("justifyContent", V::keyword("center")),
                ("overflow", V::keyword("hidden")),
            ]
        }
        _ => return None,
    };
    Some(decls)
}

/// Schema keys that map straight onto box styles for kinds without a
/// dedicated emitter.
const BOX_NUMBER_KEYS: &[&str] = &[
    "width",
    "height",
    "minHeight",
    "padding",
    "paddingVertical",
    "paddingHorizontal",
    "marginVertical",
    "gap",
    "borderRadius",
    "borderWidth",
];
const BOX_COLOR_KEYS: &[&str] = &["backgroundColor", "borderColor"];
const LABEL_COLOR_KEYS: &[&str] = &["textColor", "color"];

fn style_key(keys: &[&'static str], key: &str) -> Option<&'static str> {
    keys.iter().copied().find(|k| *k == key)
}

/// Box styles for a registered kind that has no dedicated emitter, read from
/// its color and numeric fields, then its default size.
pub fn generic(kind: &ComponentKind, p: &Props<'_>) -> Vec<Decl> {
    let mut decls: Vec<Decl> = kind
        .config_schema
        .iter()
        .filter_map(|field| match field.field_type {
            FieldType::Color => style_key(BOX_COLOR_KEYS, &field.key).map(|k| (k, StyleValue::color(p.color(k)))),
            FieldType::Number | FieldType::Slider => style_key(BOX_NUMBER_KEYS, &field.key).map(|k| (k, num(p.number(k)))),
            _ => None,
        })
        .collect();

    let size = kind.default_size;
    for (key, dimension) in [("width", size.width), ("height", size.height)] {
        if decls.iter().any(|(k, _)| *k == key) {
            continue;
        }
        match dimension {
            Dimension::Points(n) => decls.push((key, num(n))),
            // A percentage height would be unbounded inside the scroll view.
            Dimension::Percent(n) if key == "width" => decls.push((key, StyleValue::Percent(n))),
            _ => {}
        }
    }
    decls
}

/// Text color and size for the labels of a generic kind.
pub fn generic_label<'a>(kind: &ComponentKind, p: &Props<'a>) -> (&'a str, f64) {
    let color = kind
        .config_schema
        .iter()
        .find(|f| f.field_type == FieldType::Color && style_key(LABEL_COLOR_KEYS, &f.key).is_some())
        .map_or("#0f172a", |f| p.color(&f.key));
    (color, p.positive("fontSize", 16.0))
}

/// Dashed outline drawn in place of an unknown kind.
pub fn placeholder() -> Vec<Decl> {
    vec![
        ("padding", num(12.0)),
        ("borderWidth", num(1.0)),
        ("borderStyle", StyleValue::keyword("dashed")),
        ("borderColor", StyleValue::color("#ef4444")),
        ("borderRadius", num(8.0)),
        ("backgroundColor", StyleValue::color("#fef2f2")),
    ]
}
