//! Visual variants shared by the live preview and the code generator.
//!
//! Both sides must resolve a variant to the same colors, otherwise exported
//! code would not match what the user saw on the canvas.

/// Button fill style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Filled,
    Outline,
    Ghost,
}

/// Resolved colors for a button variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPalette {
    /// Fill color, `transparent` when the variant has no fill
    pub fill: String,
    /// Label and icon color
    pub foreground: String,
    /// Border color, if the variant draws one
    pub border: Option<String>,
}

impl ButtonVariant {
    /// Parse a select value. Unrecognized values fall back to `Filled`.
    pub fn from_choice(value: &str) -> Self {
        match value {
            "outline" => Self::Outline,
            "ghost" => Self::Ghost,
            _ => Self::Filled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
        }
    }

    /// Map the node's `backgroundColor` and `textColor` onto fill, label, and
    /// border colors. Non-filled variants use the background color for the
    /// label instead of the fill.
    pub fn palette(&self, background: &str, text: &str) -> VariantPalette {
        match self {
            Self::Filled => VariantPalette {
                fill: background.to_string(),
                foreground: text.to_string(),
                border: None,
            },
            Self::Outline => VariantPalette {
                fill: "transparent".to_string(),
                foreground: background.to_string(),
                border: Some(background.to_string()),
            },
            Self::Ghost => VariantPalette {
                fill: "transparent".to_string(),
                foreground: background.to_string(),
                border: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_uses_background_for_fill() {
        let p = ButtonVariant::Filled.palette("#2563eb", "#ffffff");
        assert_eq!(p.fill, "#2563eb");
        assert_eq!(p.foreground, "#ffffff");
        assert_eq!(p.border, None);
    }

    #[test]
    fn test_outline_swaps_colors() {
        let p = ButtonVariant::from_choice("outline").palette("#2563eb", "#ffffff");
        assert_eq!(p.fill, "transparent");
        assert_eq!(p.foreground, "#2563eb");
        assert_eq!(p.border.as_deref(), Some("#2563eb"));
    }

    #[test]
    fn test_unknown_choice_is_filled() {
        assert_eq!(ButtonVariant::from_choice("neon"), ButtonVariant::Filled);
    }
}
