//! Core value types for canvas nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a placed node. Generated at insertion time and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed property value.
///
/// Values are stored per node keyed by property name. Keys declared by the
/// kind's schema are read with the schema's type in mind; any other key is
/// carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Color(String),
    Choice(String),
}

impl PropertyValue {
    pub fn text(s: impl Into<String>) -> Self {
        PropertyValue::Text(s.into())
    }

    pub fn color(s: impl Into<String>) -> Self {
        PropertyValue::Color(s.into())
    }

    pub fn choice(s: impl Into<String>) -> Self {
        PropertyValue::Choice(s.into())
    }

    /// Get the string payload of a text, color, or choice value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) | PropertyValue::Color(s) | PropertyValue::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// Get as number if it's a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean if it's a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as a color if the payload is a well-formed color literal.
    pub fn as_color(&self) -> Option<&str> {
        match self {
            PropertyValue::Color(s) | PropertyValue::Text(s) if is_color_literal(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Number(_) => "number",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Color(_) => "color",
            PropertyValue::Choice(_) => "choice",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

/// Check for `#rgb`, `#rrggbb`, `#rrggbbaa`, or the `transparent` keyword.
pub fn is_color_literal(s: &str) -> bool {
    if s == "transparent" {
        return true;
    }
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Position on the canvas. Bookkeeping only; not a rendering contract.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One axis of a node's size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    /// Sized by content
    #[default]
    Auto,
    /// Absolute length in points
    Points(f64),
    /// Proportion of the parent, in percent
    Percent(f64),
}

impl Dimension {
    pub fn full() -> Self {
        Dimension::Percent(100.0)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => f.write_str("auto"),
            Dimension::Points(v) => write!(f, "{}", v),
            Dimension::Percent(v) => write!(f, "{}%", v),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") || s.is_empty() {
            return Ok(Dimension::Auto);
        }
        if let Some(pct) = s.strip_suffix('%') {
            return pct
                .trim()
                .parse::<f64>()
                .map(Dimension::Percent)
                .map_err(|_| format!("invalid percentage: {}", s));
        }
        s.trim_end_matches("px")
            .parse::<f64>()
            .map(Dimension::Points)
            .map_err(|_| format!("invalid dimension: {}", s))
    }
}

/// Interchange form: a bare number for points, a string otherwise.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = String;

    fn try_from(repr: DimensionRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(n) => Ok(Dimension::Points(n)),
            DimensionRepr::Text(s) => s.parse(),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Points(n) => DimensionRepr::Number(n),
            other => DimensionRepr::Text(other.to_string()),
        }
    }
}

/// Width and height of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

impl Size {
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: Dimension::full(),
            height: Dimension::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_value_accessors() {
        assert_eq!(PropertyValue::text("hi").as_str(), Some("hi"));
        assert_eq!(PropertyValue::Number(4.0).as_number(), Some(4.0));
        assert_eq!(PropertyValue::Number(f64::NAN).as_number(), None);
        assert_eq!(PropertyValue::Bool(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::text("#fff").as_color(), Some("#fff"));
        assert_eq!(PropertyValue::color("blue").as_color(), None);
    }

    #[test]
    fn test_property_value_serde_shape() {
        let json = serde_json::to_string(&PropertyValue::color("#2563eb")).unwrap();
        assert_eq!(json, r##"{"type":"color","value":"#2563eb"}"##);

        let back: PropertyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PropertyValue::color("#2563eb"));
    }

    #[test]
    fn test_color_literal() {
        assert!(is_color_literal("#abc"));
        assert!(is_color_literal("#2563eb"));
        assert!(is_color_literal("#2563eb80"));
        assert!(is_color_literal("transparent"));
        assert!(!is_color_literal("#25"));
        assert!(!is_color_literal("2563eb"));
        assert!(!is_color_literal("#zzzzzz"));
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("auto".parse::<Dimension>(), Ok(Dimension::Auto));
        assert_eq!("100%".parse::<Dimension>(), Ok(Dimension::Percent(100.0)));
        assert_eq!("48".parse::<Dimension>(), Ok(Dimension::Points(48.0)));
        assert_eq!("48px".parse::<Dimension>(), Ok(Dimension::Points(48.0)));
        assert!("wide".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_dimension_serde() {
        let size = Size::new(Dimension::Percent(50.0), Dimension::Points(40.0));
        let json = serde_json::to_string(&size).unwrap();
        assert_eq!(json, r#"{"width":"50%","height":40.0}"#);

        let back: Size = serde_json::from_str(&json).unwrap();
        assert_eq!(back, size);
    }
}
