//! The built-in component set.

use crate::registry::{Catalog, KindBuilder};
use tapestry_core::{Category, Dimension};

/// Ids of the built-in kinds.
pub mod kinds {
    pub const CONTAINER: &str = "container";
    pub const CARD: &str = "card";
    pub const DIVIDER: &str = "divider";
    pub const SPACER: &str = "spacer";
    pub const BUTTON: &str = "button";
    pub const INPUT: &str = "input";
    pub const SWITCH: &str = "switch";
    pub const TEXT: &str = "text";
    pub const HEADING: &str = "heading";
    pub const BADGE: &str = "badge";
    pub const LIST: &str = "list";
    pub const HEADER: &str = "header";
    pub const TABBAR: &str = "tabbar";
    pub const IMAGE: &str = "image";
    pub const ICON: &str = "icon";
    pub const AVATAR: &str = "avatar";
}

const ALIGN_OPTIONS: &[(&str, &str)] = &[
    ("stretch", "Stretch"),
    ("flex-start", "Start"),
    ("center", "Center"),
    ("flex-end", "End"),
];

const TEXT_ALIGN_OPTIONS: &[(&str, &str)] = &[("left", "Left"), ("center", "Center"), ("right", "Right")];

const WEIGHT_OPTIONS: &[(&str, &str)] = &[
    ("normal", "Regular"),
    ("500", "Medium"),
    ("600", "Semibold"),
    ("bold", "Bold"),
];

impl Catalog {
    /// Catalog with the standard palette registered.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();
        for kind in [
            // Layout
            KindBuilder::new(kinds::CONTAINER, "Container", Category::Layout)
                .container()
                .select("direction", "Direction", "column", &[("column", "Vertical"), ("row", "Horizontal")])
                .select("alignItems", "Align items", "stretch", ALIGN_OPTIONS)
                .number("gap", "Gap", 8.0, 0.0, 64.0)
                .number("padding", "Padding", 16.0, 0.0, 64.0)
                .color("backgroundColor", "Background", "transparent")
                .slider("borderRadius", "Corner radius", 0.0, 0.0, 48.0, 1.0)
                .number("borderWidth", "Border width", 0.0, 0.0, 8.0)
                .color("borderColor", "Border color", "#e2e8f0")
                .build(),
            KindBuilder::new(kinds::CARD, "Card", Category::Layout)
                .container()
                .boolean("showTitle", "Show title", false)
                .text("title", "Title", "Card title")
                .color("backgroundColor", "Background", "#ffffff")
                .number("padding", "Padding", 16.0, 0.0, 64.0)
                .number("gap", "Gap", 8.0, 0.0, 64.0)
                .slider("borderRadius", "Corner radius", 12.0, 0.0, 48.0, 1.0)
                .number("borderWidth", "Border width", 1.0, 0.0, 8.0)
                .color("borderColor", "Border color", "#e2e8f0")
                .boolean("shadow", "Shadow", true)
                .build(),
            KindBuilder::new(kinds::DIVIDER, "Divider", Category::Layout)
                .color("color", "Color", "#e2e8f0")
                .slider("thickness", "Thickness", 1.0, 1.0, 8.0, 1.0)
                .number("marginVertical", "Vertical margin", 8.0, 0.0, 64.0)
                .build(),
            KindBuilder::new(kinds::SPACER, "Spacer", Category::Layout)
                .number("height", "Height", 24.0, 0.0, 256.0)
                .build(),
            // Input
            KindBuilder::new(kinds::BUTTON, "Button", Category::Input)
                .size(Dimension::Auto, Dimension::Auto)
                .text("text", "Text", "Button")
                .select(
                    "variant",
                    "Variant",
                    "filled",
                    &[("filled", "Filled"), ("outline", "Outline"), ("ghost", "Ghost")],
                )
                .color("backgroundColor", "Background", "#2563eb")
                .color("textColor", "Text color", "#ffffff")
                .slider("borderRadius", "Corner radius", 8.0, 0.0, 32.0, 1.0)
                .number("paddingVertical", "Vertical padding", 12.0, 0.0, 48.0)
                .number("paddingHorizontal", "Horizontal padding", 20.0, 0.0, 64.0)
                .slider("fontSize", "Font size", 16.0, 10.0, 32.0, 1.0)
                .boolean("fullWidth", "Full width", false)
                .boolean("showIcon", "Show icon", false)
                .text("icon", "Icon", "arrow-forward")
                .select("iconPosition", "Icon position", "trailing", &[("leading", "Leading"), ("trailing", "Trailing")])
                .boolean("disabled", "Disabled", false)
                .build(),
            KindBuilder::new(kinds::INPUT, "Text field", Category::Input)
                .boolean("showLabel", "Show label", true)
                .text("label", "Label", "Label")
                .text("placeholder", "Placeholder", "Enter text")
                .select(
                    "inputType",
                    "Input type",
                    "text",
                    &[
                        ("text", "Text"),
                        ("email", "Email"),
                        ("password", "Password"),
                        ("number", "Number"),
                        ("phone", "Phone"),
                    ],
                )
                .boolean("multiline", "Multiline", false)
                .boolean("showIcon", "Leading icon", false)
                .text("icon", "Icon", "search")
                .color("backgroundColor", "Background", "#ffffff")
                .color("borderColor", "Border color", "#cbd5e1")
                .slider("borderRadius", "Corner radius", 8.0, 0.0, 32.0, 1.0)
                .number("padding", "Padding", 12.0, 0.0, 32.0)
                .slider("fontSize", "Font size", 16.0, 10.0, 32.0, 1.0)
                .build(),
            KindBuilder::new(kinds::SWITCH, "Switch", Category::Input)
                .text("label", "Label", "Enable notifications")
                .boolean("value", "On", false)
                .color("activeColor", "Active color", "#2563eb")
                .color("labelColor", "Label color", "#0f172a")
                .slider("fontSize", "Font size", 16.0, 10.0, 32.0, 1.0)
                .build(),
            // Display
            KindBuilder::new(kinds::TEXT, "Text", Category::Display)
                .textarea("text", "Text", "Text")
                .slider("fontSize", "Font size", 16.0, 10.0, 48.0, 1.0)
                .color("color", "Color", "#0f172a")
                .select("fontWeight", "Weight", "normal", WEIGHT_OPTIONS)
                .select("textAlign", "Alignment", "left", TEXT_ALIGN_OPTIONS)
                .slider("lineSpacing", "Line spacing", 1.5, 1.0, 3.0, 0.1)
                .boolean("italic", "Italic", false)
                .build(),
            KindBuilder::new(kinds::HEADING, "Heading", Category::Display)
                .text("text", "Text", "Heading")
                .select("level", "Level", "1", &[("1", "H1"), ("2", "H2"), ("3", "H3"), ("4", "H4")])
                .color("color", "Color", "#0f172a")
                .select("textAlign", "Alignment", "left", TEXT_ALIGN_OPTIONS)
                .slider("lineSpacing", "Line spacing", 1.25, 1.0, 3.0, 0.05)
                .build(),
            KindBuilder::new(kinds::BADGE, "Badge", Category::Display)
                .size(Dimension::Auto, Dimension::Auto)
                .text("text", "Text", "New")
                .color("backgroundColor", "Background", "#dcfce7")
                .color("textColor", "Text color", "#166534")
                .slider("borderRadius", "Corner radius", 999.0, 0.0, 999.0, 1.0)
                .slider("fontSize", "Font size", 12.0, 8.0, 24.0, 1.0)
                .build(),
            KindBuilder::new(kinds::LIST, "List", Category::Display)
                .textarea("items", "Items (one per line)", "Item 1\nItem 2\nItem 3")
                .boolean("showDividers", "Dividers", true)
                .boolean("showChevron", "Chevron", true)
                .color("itemColor", "Item color", "#0f172a")
                .color("dividerColor", "Divider color", "#e2e8f0")
                .color("backgroundColor", "Background", "#ffffff")
                .slider("fontSize", "Font size", 16.0, 10.0, 32.0, 1.0)
                .slider("borderRadius", "Corner radius", 8.0, 0.0, 32.0, 1.0)
                .build(),
            // Navigation
            KindBuilder::new(kinds::HEADER, "Header", Category::Navigation)
                .text("title", "Title", "Title")
                .color("backgroundColor", "Background", "#2563eb")
                .color("textColor", "Text color", "#ffffff")
                .number("height", "Height", 56.0, 40.0, 120.0)
                .boolean("showBack", "Back button", false)
                .boolean("showAction", "Action button", false)
                .text("actionIcon", "Action icon", "ellipsis-vertical")
                .build(),
            KindBuilder::new(kinds::TABBAR, "Tab bar", Category::Navigation)
                .textarea("tabs", "Tabs (one per line)", "Home\nSearch\nProfile")
                .textarea("icons", "Icons (one per line)", "home\nsearch\nperson")
                .number("activeIndex", "Active tab", 0.0, 0.0, 9.0)
                .color("activeColor", "Active color", "#2563eb")
                .color("inactiveColor", "Inactive color", "#94a3b8")
                .color("backgroundColor", "Background", "#ffffff")
                .build(),
            // Media
            KindBuilder::new(kinds::IMAGE, "Image", Category::Media)
                .text("source", "Image URL", "https://picsum.photos/400/200")
                .text("alt", "Description", "")
                .number("height", "Height", 200.0, 16.0, 800.0)
                .slider("borderRadius", "Corner radius", 8.0, 0.0, 48.0, 1.0)
                .select(
                    "resizeMode",
                    "Fit",
                    "cover",
                    &[("cover", "Cover"), ("contain", "Contain"), ("stretch", "Stretch")],
                )
                .build(),
            KindBuilder::new(kinds::ICON, "Icon", Category::Media)
                .size(Dimension::Auto, Dimension::Auto)
                .text("name", "Icon name", "star")
                .slider("size", "Size", 24.0, 12.0, 96.0, 1.0)
                .color("color", "Color", "#2563eb")
                .build(),
            KindBuilder::new(kinds::AVATAR, "Avatar", Category::Media)
                .size(Dimension::Auto, Dimension::Auto)
                .text("source", "Image URL", "")
                .text("initials", "Initials", "AB")
                .slider("size", "Size", 48.0, 24.0, 128.0, 1.0)
                .color("backgroundColor", "Background", "#e0e7ff")
                .color("textColor", "Text color", "#3730a3")
                .build(),
        ] {
            catalog.register(kind);
        }
        catalog
    }
}
