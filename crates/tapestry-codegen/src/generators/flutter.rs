//! Flutter code generator.

use super::templates::{TemplateEngine, PUBSPEC_YAML};
use super::{pad, pinned, CodeGenerator, EmitContext, Feature};
use crate::error::Result;
use crate::options::{GenerateOptions, TargetFormat};
use crate::output::{FileKind, GeneratedFile, GenerationOutput};
use crate::props::Props;
use crate::style::{self, fmt_num, StyleBlock, StyleValue};
use convert_case::{Case, Casing};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tapestry_catalog::{kinds, Catalog};
use tapestry_core::{is_color_literal, ButtonVariant, CanvasNode, ComponentKind, Document};

const VERSIONS: &[(&str, &str)] = &[("cached_network_image", "^3.4.1"), ("cupertino_icons", "^1.0.8")];

const BASE_PACKAGES: &[&str] = &["cupertino_icons"];

const NODE_STYLE_CLASS: &str = r#"class NodeStyle {
  const NodeStyle({
    this.backgroundColor,
    this.color,
    this.borderColor,
    this.borderWidth,
    this.borderRadius,
    this.padding,
    this.paddingVertical,
    this.paddingHorizontal,
    this.marginVertical,
    this.gap,
    this.width,
    this.height,
    this.minHeight,
    this.fontSize,
    this.fontWeight,
    this.lineHeight,
    this.textAlign,
    this.italic = false,
    this.shadow = false,
  });

  final Color? backgroundColor;
  final Color? color;
  final Color? borderColor;
  final double? borderWidth;
  final double? borderRadius;
  final double? padding;
  final double? paddingVertical;
  final double? paddingHorizontal;
  final double? marginVertical;
  final double? gap;
  final double? width;
  final double? height;
  final double? minHeight;
  final double? fontSize;
  final FontWeight? fontWeight;
  final double? lineHeight;
  final TextAlign? textAlign;
  final bool italic;
  final bool shadow;

  EdgeInsets get insets => EdgeInsets.symmetric(
        vertical: paddingVertical ?? padding ?? 0,
        horizontal: paddingHorizontal ?? padding ?? 0,
      );

  BoxDecoration get decoration => BoxDecoration(
        color: backgroundColor,
        borderRadius: BorderRadius.circular(borderRadius ?? 0),
        border: (borderWidth ?? 0) > 0
            ? Border.all(color: borderColor ?? Colors.transparent, width: borderWidth ?? 0)
            : null,
        boxShadow: shadow
            ? const [BoxShadow(color: Color(0x14000000), blurRadius: 8, offset: Offset(0, 2))]
            : null,
      );

  TextStyle get text => TextStyle(
        color: color,
        fontSize: fontSize,
        fontWeight: fontWeight,
        height: lineHeight,
        fontStyle: italic ? FontStyle.italic : FontStyle.normal,
      );
}
"#;

/// Flutter generator.
pub struct FlutterGenerator {
    catalog: Arc<Catalog>,
    templates: TemplateEngine<'static>,
}

impl FlutterGenerator {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        Ok(Self {
            catalog,
            templates: TemplateEngine::with_builtin_templates()?,
        })
    }

    fn screen_source(&self, screen: &str, styles_file: &str, writer: &WidgetWriter<'_>, inline_styles: Option<&str>) -> String {
        let mut out = String::from("import 'package:flutter/material.dart';\n");
        if writer.ctx.features.contains(&Feature::Haptics) {
            out.push_str("import 'package:flutter/services.dart';\n");
        }
        if writer.ctx.features.contains(&Feature::NetworkImage) {
            out.push_str("import 'package:cached_network_image/cached_network_image.dart';\n");
        }
        if inline_styles.is_none() {
            out.push_str(&format!("\nimport '{}';\n", styles_file));
        }
        out.push('\n');
        out.push_str(&format!("class {} extends StatelessWidget {{\n", screen));
        out.push_str(&format!("  const {}({{super.key}});\n\n", screen));
        out.push_str("  @override\n");
        out.push_str("  Widget build(BuildContext context) {\n");
        out.push_str("    return Scaffold(\n");
        out.push_str("      backgroundColor: const Color(0xFFF8FAFC),\n");
        out.push_str("      body: SafeArea(\n");
        out.push_str("        child: SingleChildScrollView(\n");
        out.push_str("          padding: const EdgeInsets.all(16),\n");
        out.push_str("          child: Column(\n");
        out.push_str("            crossAxisAlignment: CrossAxisAlignment.stretch,\n");
        out.push_str("            spacing: 12,\n");
        out.push_str("            children: [\n");
        for line in &writer.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("            ],\n");
        out.push_str("          ),\n");
        out.push_str("        ),\n");
        out.push_str("      ),\n");
        out.push_str("    );\n");
        out.push_str("  }\n");
        out.push_str("}\n");

        if let Some(styles) = inline_styles {
            out.push('\n');
            out.push_str(styles);
        }
        out
    }

    fn main_source(&self, screen: &str, screen_file: &str, app_name: &str) -> String {
        let mut app_class: String = app_name
            .to_case(Case::Pascal)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if app_class.is_empty() || app_class.starts_with(|c: char| c.is_ascii_digit()) {
            app_class.insert_str(0, "Generated");
        }
        if app_class == screen {
            app_class.push_str("App");
        }

        format!(
            "import 'package:flutter/material.dart';\n\
             \n\
             import 'screens/{screen_file}';\n\
             \n\
             void main() => runApp(const {app}());\n\
             \n\
             class {app} extends StatelessWidget {{\n\
             \x20 const {app}({{super.key}});\n\
             \n\
             \x20 @override\n\
             \x20 Widget build(BuildContext context) {{\n\
             \x20   return MaterialApp(\n\
             \x20     title: {title},\n\
             \x20     debugShowCheckedModeBanner: false,\n\
             \x20     theme: ThemeData(useMaterial3: true),\n\
             \x20     home: const {screen}(),\n\
             \x20   );\n\
             \x20 }}\n\
             }}\n",
            screen_file = screen_file,
            app = app_class,
            title = dart_str(app_name),
            screen = screen,
        )
    }
}

impl CodeGenerator for FlutterGenerator {
    fn target(&self) -> TargetFormat {
        TargetFormat::Flutter
    }

    fn framework_name(&self) -> &'static str {
        "Flutter"
    }

    fn emit(&self, document: &Document, options: &GenerateOptions) -> Result<GenerationOutput> {
        let name = options.screen_name(document);
        let screen = format!("{}Screen", name);
        let file_stem = name.to_case(Case::Snake);
        let screen_file = format!("{}_screen.dart", file_stem);
        let styles_file = format!("{}_styles.dart", file_stem);
        let app_name = options.app_name(document);

        let mut writer = WidgetWriter::new(&self.catalog);
        for node in &document.nodes {
            writer.widget(node, 7);
        }

        let mut files = Vec::new();
        if options.separate_stylesheet {
            let styles = format!(
                "import 'package:flutter/material.dart';\n\n{}",
                styles_source(&writer.ctx.styles)
            );
            files.push(GeneratedFile::new(
                format!("lib/screens/{}", screen_file),
                self.screen_source(&screen, &styles_file, &writer, None),
                FileKind::Screen,
            ));
            files.push(GeneratedFile::new(
                format!("lib/screens/{}", styles_file),
                styles,
                FileKind::Style,
            ));
        } else {
            let styles = styles_source(&writer.ctx.styles);
            files.push(GeneratedFile::new(
                format!("lib/screens/{}", screen_file),
                self.screen_source(&screen, &styles_file, &writer, Some(&styles)),
                FileKind::Screen,
            ));
        }
        files.push(GeneratedFile::new(
            "lib/main.dart",
            self.main_source(&screen, &screen_file, &app_name),
            FileKind::Component,
        ));

        let mut names: BTreeSet<&str> = BASE_PACKAGES.iter().copied().collect();
        if writer.ctx.features.contains(&Feature::NetworkImage) {
            names.insert("cached_network_image");
        }
        let dependencies = pinned(&names, VERSIONS);
        files.push(GeneratedFile::new(
            "pubspec.yaml",
            self.templates.render(
                PUBSPEC_YAML,
                &json!({
                    "app_name": app_name,
                    "description": format!("{} generated screen.", app_name),
                    "dependencies": dependencies,
                }),
            )?,
            FileKind::Config,
        ));

        Ok(GenerationOutput {
            files,
            dependencies,
            instructions: vec!["flutter pub get".to_string(), "flutter run".to_string()],
            warnings: writer.ctx.warnings,
        })
    }
}

/// `NodeStyle` class plus one `AppStyles` constant per block.
fn styles_source(blocks: &[StyleBlock]) -> String {
    let mut out = String::from(NODE_STYLE_CLASS);
    out.push_str("\nclass AppStyles {\n  AppStyles._();\n");
    for block in blocks {
        let args = dart_args(block);
        out.push('\n');
        if args.is_empty() {
            out.push_str(&format!("  static const {} = NodeStyle();\n", dart_ident(&block.ident)));
            continue;
        }
        out.push_str(&format!("  static const {} = NodeStyle(\n", dart_ident(&block.ident)));
        for arg in args {
            out.push_str(&format!("    {},\n", arg));
        }
        out.push_str("  );\n");
    }
    out.push_str("}\n");
    out
}

/// Map declarations onto `NodeStyle` arguments. Keys with no Flutter
/// counterpart (dashed borders, alignSelf, overflow) are dropped.
fn dart_args(block: &StyleBlock) -> Vec<String> {
    let font_size = block.get("fontSize").and_then(StyleValue::as_number);
    let mut args = Vec::new();
    for (key, value) in &block.decls {
        let arg = match (*key, value) {
            ("backgroundColor" | "color" | "borderColor", StyleValue::Color(c)) => {
                format!("{}: {}", key, dart_color(c))
            }
            (
                "borderWidth" | "borderRadius" | "padding" | "paddingVertical" | "paddingHorizontal" | "marginVertical"
                | "gap" | "fontSize" | "width" | "height" | "minHeight",
                StyleValue::Number(n),
            ) => format!("{}: {}", key, fmt_num(*n)),
            ("width" | "height", StyleValue::Percent(_)) => format!("{}: double.infinity", key),
            ("fontWeight", StyleValue::Keyword(w)) => format!("fontWeight: {}", font_weight(w)),
            ("textAlign", StyleValue::Keyword(a)) => format!("textAlign: {}", text_align(a)),
            ("lineHeight", StyleValue::Number(n)) => match font_size {
                Some(size) if size > 0.0 => format!("lineHeight: {}", fmt_num(n / size)),
                _ => continue,
            },
            ("fontStyle", StyleValue::Keyword(s)) if s == "italic" => "italic: true".to_string(),
            ("elevation", _) => "shadow: true".to_string(),
            _ => continue,
        };
        args.push(arg);
    }
    args
}

/// Dart color expression for a color literal.
pub fn dart_color(literal: &str) -> String {
    if !is_color_literal(literal) || literal.eq_ignore_ascii_case("transparent") {
        return "Colors.transparent".to_string();
    }
    let hex = literal.trim_start_matches('#').to_ascii_uppercase();
    let argb = match hex.len() {
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("FF{}", expanded)
        }
        6 => format!("FF{}", hex),
        8 => format!("{}{}", &hex[6..], &hex[..6]),
        _ => return "Colors.transparent".to_string(),
    };
    format!("Color(0x{})", argb)
}

fn font_weight(weight: &str) -> String {
    match weight {
        "bold" => "FontWeight.bold".to_string(),
        "normal" => "FontWeight.normal".to_string(),
        w if w.len() == 3 && w.ends_with("00") && ('1'..='9').contains(&w.chars().next().unwrap_or('0')) => {
            format!("FontWeight.w{}", w)
        }
        _ => "FontWeight.normal".to_string(),
    }
}

fn text_align(align: &str) -> &'static str {
    match align {
        "center" => "TextAlign.center",
        "right" => "TextAlign.right",
        _ => "TextAlign.left",
    }
}

/// Leading underscores are library-private in Dart.
fn dart_ident(ident: &str) -> String {
    if ident.starts_with('_') {
        format!("s{}", ident)
    } else {
        ident.to_string()
    }
}

/// Single-quoted Dart string literal.
fn dart_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Material icon for an Ionicons name.
fn material_icon(name: &str) -> &'static str {
    let base = name.trim_end_matches("-outline").trim_end_matches("-sharp");
    match base {
        "home" => "home",
        "search" => "search",
        "person" => "person",
        "people" => "people",
        "settings" => "settings",
        "star" => "star",
        "heart" => "favorite",
        "add" => "add",
        "close" => "close",
        "menu" => "menu",
        "arrow-back" => "arrow_back",
        "arrow-forward" => "arrow_forward",
        "chevron-back" => "chevron_left",
        "chevron-forward" => "chevron_right",
        "ellipsis-vertical" => "more_vert",
        "ellipsis-horizontal" => "more_horiz",
        "notifications" => "notifications",
        "mail" => "mail",
        "call" => "call",
        "cart" => "shopping_cart",
        "camera" => "camera_alt",
        "image" => "image",
        "lock-closed" => "lock",
        "calendar" => "calendar_today",
        "chatbubble" => "chat_bubble",
        "share" => "share",
        "trash" => "delete",
        "create" => "edit",
        "checkmark" => "check",
        "information-circle" => "info",
        "location" => "location_on",
        "time" => "access_time",
        "ellipse" => "circle",
        _ => "help_outline",
    }
}

fn icon(name: &str, size: f64, color: &str) -> String {
    format!(
        "Icon(Icons.{}, size: {}, color: {})",
        material_icon(name),
        fmt_num(size),
        dart_color(color)
    )
}

fn text_style(color: &str, size: f64, weight: Option<&str>) -> String {
    match weight {
        Some(w) => format!(
            "TextStyle(color: {}, fontSize: {}, fontWeight: {})",
            dart_color(color),
            fmt_num(size),
            font_weight(w)
        ),
        None => format!("TextStyle(color: {}, fontSize: {})", dart_color(color), fmt_num(size)),
    }
}

/// Accumulates widget-tree lines for the screen body.
struct WidgetWriter<'a> {
    ctx: EmitContext<'a>,
    lines: Vec<String>,
}

impl<'a> WidgetWriter<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        Self {
            ctx: EmitContext::new(catalog),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", pad(depth), text.as_ref()));
    }

    fn widget(&mut self, node: &CanvasNode, depth: usize) {
        let entered = self.ctx.enter(node);
        let s = format!("AppStyles.{}", dart_ident(&entered.ident));
        let p = entered.props;
        let Some(kind) = entered.kind else {
            self.placeholder(&node.kind, &s, depth);
            return;
        };

        match node.kind.as_str() {
            kinds::CONTAINER => {
                let row = p.choice("direction") == "row";
                self.group(&node.children, &s, row, p.choice("alignItems"), p.number("gap"), None, depth)
            }
            kinds::CARD => {
                let title = p.flag("showTitle").then(|| p.text("title"));
                self.group(&node.children, &s, false, "stretch", p.number("gap"), title, depth)
            }
            kinds::DIVIDER => {
                let thickness = p.positive("thickness", 1.0);
                self.line(
                    depth,
                    format!(
                        "Divider(height: {}, thickness: {}, color: {}),",
                        fmt_num(p.number("marginVertical") * 2.0 + thickness),
                        fmt_num(thickness),
                        dart_color(p.color("color"))
                    ),
                );
            }
            kinds::SPACER => self.line(depth, format!("SizedBox(height: {}),", fmt_num(p.number("height")))),
            kinds::BUTTON => self.button(&p, &s, depth),
            kinds::INPUT => self.input(&p, depth),
            kinds::SWITCH => {
                self.line(depth, "SwitchListTile(");
                self.line(depth + 1, format!("value: {},", p.flag("value")));
                self.line(depth + 1, "onChanged: (_) {},");
                self.line(depth + 1, format!("activeColor: {},", dart_color(p.color("activeColor"))));
                self.line(depth + 1, "contentPadding: EdgeInsets.zero,");
                self.line(
                    depth + 1,
                    format!(
                        "title: Text({}, style: {}),",
                        dart_str(p.text("label")),
                        text_style(p.color("labelColor"), p.positive("fontSize", 16.0), None)
                    ),
                );
                self.line(depth, "),");
            }
            kinds::TEXT => self.line(
                depth,
                format!("Text({}, textAlign: {s}.textAlign, style: {s}.text),", dart_str(p.text("text")), s = s),
            ),
            kinds::HEADING => self.line(
                depth,
                format!(
                    "Semantics(header: true, child: Text({}, textAlign: {s}.textAlign, style: {s}.text)),",
                    dart_str(p.text("text")),
                    s = s
                ),
            ),
            kinds::BADGE => {
                self.line(depth, "Align(");
                self.line(depth + 1, "alignment: Alignment.centerLeft,");
                self.line(depth + 1, "child: Container(");
                self.line(depth + 2, format!("padding: {}.insets,", s));
                self.line(depth + 2, format!("decoration: {}.decoration,", s));
                self.line(
                    depth + 2,
                    format!(
                        "child: Text({}, style: {}),",
                        dart_str(p.text("text")),
                        text_style(p.color("textColor"), p.positive("fontSize", 12.0), Some("600"))
                    ),
                );
                self.line(depth + 1, "),");
                self.line(depth, "),");
            }
            kinds::LIST => self.list(&p, &s, depth),
            kinds::HEADER => self.header(&p, depth),
            kinds::TABBAR => self.tabbar(&p, &s, depth),
            kinds::IMAGE => self.image(&p, depth),
            kinds::ICON => self.line(
                depth,
                format!(
                    "Align(alignment: Alignment.centerLeft, child: {}),",
                    icon(p.text("name"), p.positive("size", 24.0), p.color("color"))
                ),
            ),
            kinds::AVATAR => self.avatar(&p, depth),
            _ => self.generic(kind, &p, &node.children, &s, depth),
        }
    }

    /// A registered kind with no dedicated widget: a styled `Container`
    /// holding its text fields, then its children when it is a container.
    fn generic(&mut self, kind: &ComponentKind, p: &Props<'_>, children: &[CanvasNode], s: &str, depth: usize) {
        let labels = p.labels();
        let children: &[CanvasNode] = if kind.container { children } else { &[] };
        self.line(depth, "Container(");
        self.line(depth + 1, format!("width: {}.width,", s));
        self.line(depth + 1, format!("height: {}.height,", s));
        self.line(depth + 1, format!("padding: {}.insets,", s));
        self.line(depth + 1, format!("decoration: {}.decoration,", s));
        if !labels.is_empty() || !children.is_empty() {
            let (color, size) = style::generic_label(kind, p);
            self.line(depth + 1, "child: Column(");
            self.line(depth + 2, "crossAxisAlignment: CrossAxisAlignment.stretch,");
            self.line(depth + 2, format!("spacing: {}.gap ?? 0.0,", s));
            self.line(depth + 2, "children: [");
            for text in labels {
                self.line(depth + 3, format!("Text({}, style: {}),", dart_str(text), text_style(color, size, None)));
            }
            for child in children {
                self.widget(child, depth + 3);
            }
            self.line(depth + 2, "],");
            self.line(depth + 1, "),");
        }
        self.line(depth, "),");
    }

    #[allow(clippy::too_many_arguments)]
    fn group(
        &mut self,
        children: &[CanvasNode],
        s: &str,
        row: bool,
        align: &str,
        gap: f64,
        title: Option<&str>,
        depth: usize,
    ) {
        let cross = match (align, row) {
            ("flex-start", _) => "start",
            ("center", _) | ("stretch", true) => "center",
            ("flex-end", _) => "end",
            _ => "stretch",
        };
        self.line(depth, "Container(");
        self.line(depth + 1, format!("padding: {}.insets,", s));
        self.line(depth + 1, format!("decoration: {}.decoration,", s));
        self.line(depth + 1, format!("child: {}(", if row { "Row" } else { "Column" }));
        self.line(depth + 2, format!("crossAxisAlignment: CrossAxisAlignment.{},", cross));
        self.line(depth + 2, format!("spacing: {},", fmt_num(gap)));
        self.line(depth + 2, "children: [");
        if let Some(title) = title {
            self.line(
                depth + 3,
                format!(
                    "Text({}, style: {}),",
                    dart_str(title),
                    text_style("#0f172a", 18.0, Some("600"))
                ),
            );
        }
        for child in children {
            self.widget(child, depth + 3);
        }
        self.line(depth + 2, "],");
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn button(&mut self, p: &Props<'_>, s: &str, depth: usize) {
        let palette =
            ButtonVariant::from_choice(p.choice("variant")).palette(p.color("backgroundColor"), p.color("textColor"));
        let font = p.positive("fontSize", 16.0);
        let full_width = p.flag("fullWidth");
        let disabled = p.flag("disabled");
        let leading = p.choice("iconPosition") == "leading";
        let icon_line = Some(p.text("icon"))
            .filter(|i| p.flag("showIcon") && !i.is_empty())
            .map(|i| format!("{},", icon(i, font, &palette.foreground)));

        let mut d = depth;
        let mut lead = "";
        let mut wrappers = 0;
        if !full_width {
            self.line(d, "Align(");
            self.line(d + 1, "alignment: Alignment.centerLeft,");
            lead = "child: ";
            d += 1;
            wrappers += 1;
        }
        if disabled {
            self.line(d, format!("{}Opacity(", lead));
            self.line(d + 1, "opacity: 0.5,");
            lead = "child: ";
            d += 1;
            wrappers += 1;
        }

        if !disabled {
            self.ctx.use_feature(Feature::Haptics);
        }
        self.line(d, format!("{}InkWell(", lead));
        if disabled {
            self.line(d + 1, "onTap: null,");
        } else {
            self.line(d + 1, "onTap: () => HapticFeedback.lightImpact(),");
        }
        self.line(
            d + 1,
            format!("borderRadius: BorderRadius.circular({}),", fmt_num(p.number("borderRadius"))),
        );
        self.line(d + 1, "child: Ink(");
        self.line(d + 2, format!("padding: {}.insets,", s));
        self.line(d + 2, format!("decoration: {}.decoration,", s));
        self.line(d + 2, "child: Row(");
        self.line(
            d + 3,
            format!(
                "mainAxisSize: MainAxisSize.{},",
                if full_width { "max" } else { "min" }
            ),
        );
        self.line(d + 3, "mainAxisAlignment: MainAxisAlignment.center,");
        self.line(d + 3, "spacing: 8,");
        self.line(d + 3, "children: [");
        if let (Some(line), true) = (&icon_line, leading) {
            self.line(d + 4, line);
        }
        self.line(
            d + 4,
            format!(
                "Text({}, style: {}),",
                dart_str(p.text("text")),
                text_style(&palette.foreground, font, Some("600"))
            ),
        );
        if let (Some(line), false) = (&icon_line, leading) {
            self.line(d + 4, line);
        }
        self.line(d + 3, "],");
        self.line(d + 2, "),");
        self.line(d + 1, "),");
        self.line(d, "),");
        for _ in 0..wrappers {
            d -= 1;
            self.line(d, "),");
        }
    }

    fn input(&mut self, p: &Props<'_>, depth: usize) {
        self.line(depth, "TextField(");
        match p.choice("inputType") {
            "email" => self.line(depth + 1, "keyboardType: TextInputType.emailAddress,"),
            "password" => self.line(depth + 1, "obscureText: true,"),
            "number" => self.line(depth + 1, "keyboardType: TextInputType.number,"),
            "phone" => self.line(depth + 1, "keyboardType: TextInputType.phone,"),
            _ => {}
        }
        if p.flag("multiline") {
            self.line(depth + 1, "maxLines: 4,");
        }
        self.line(
            depth + 1,
            format!(
                "style: TextStyle(fontSize: {}, color: Color(0xFF0F172A)),",
                fmt_num(p.positive("fontSize", 16.0))
            ),
        );
        self.line(depth + 1, "decoration: InputDecoration(");
        if p.flag("showLabel") {
            self.line(depth + 2, format!("labelText: {},", dart_str(p.text("label"))));
        }
        self.line(depth + 2, format!("hintText: {},", dart_str(p.text("placeholder"))));
        let leading_icon = p.text("icon");
        if p.flag("showIcon") && !leading_icon.is_empty() {
            self.line(depth + 2, format!("prefixIcon: {},", icon(leading_icon, 20.0, "#64748b")));
        }
        self.line(depth + 2, "filled: true,");
        self.line(depth + 2, format!("fillColor: {},", dart_color(p.color("backgroundColor"))));
        self.line(
            depth + 2,
            format!("contentPadding: EdgeInsets.all({}),", fmt_num(p.number("padding"))),
        );
        self.line(depth + 2, "border: OutlineInputBorder(");
        self.line(
            depth + 3,
            format!("borderRadius: BorderRadius.circular({}),", fmt_num(p.number("borderRadius"))),
        );
        self.line(
            depth + 3,
            format!("borderSide: BorderSide(color: {}),", dart_color(p.color("borderColor"))),
        );
        self.line(depth + 2, "),");
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn list(&mut self, p: &Props<'_>, s: &str, depth: usize) {
        let items = p.lines("items");
        self.line(depth, "Container(");
        self.line(depth + 1, "clipBehavior: Clip.antiAlias,");
        self.line(depth + 1, format!("decoration: {}.decoration,", s));
        self.line(depth + 1, "child: Column(");
        self.line(depth + 2, "children: [");
        for (i, item) in items.iter().enumerate() {
            self.line(depth + 3, "ListTile(");
            self.line(
                depth + 4,
                format!(
                    "title: Text({}, style: {}),",
                    dart_str(item),
                    text_style(p.color("itemColor"), p.positive("fontSize", 16.0), None)
                ),
            );
            if p.flag("showChevron") {
                self.line(depth + 4, format!("trailing: {},", icon("chevron-forward", 18.0, "#94a3b8")));
            }
            self.line(depth + 3, "),");
            if p.flag("showDividers") && i + 1 < items.len() {
                self.line(
                    depth + 3,
                    format!("Divider(height: 1, color: {}),", dart_color(p.color("dividerColor"))),
                );
            }
        }
        self.line(depth + 2, "],");
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn header(&mut self, p: &Props<'_>, depth: usize) {
        let fg = p.color("textColor");
        self.line(depth, "Container(");
        self.line(depth + 1, format!("height: {},", fmt_num(p.positive("height", 56.0))));
        self.line(depth + 1, format!("color: {},", dart_color(p.color("backgroundColor"))));
        self.line(depth + 1, "padding: const EdgeInsets.symmetric(horizontal: 8),");
        self.line(depth + 1, "child: Row(");
        self.line(depth + 2, "children: [");
        if p.flag("showBack") {
            self.line(
                depth + 3,
                format!("IconButton(onPressed: () {{}}, icon: {}),", icon("arrow-back", 24.0, fg)),
            );
        }
        self.line(
            depth + 3,
            format!(
                "Expanded(child: Text({}, maxLines: 1, overflow: TextOverflow.ellipsis, style: {})),",
                dart_str(p.text("title")),
                text_style(fg, 18.0, Some("600"))
            ),
        );
        let action = p.text("actionIcon");
        if p.flag("showAction") && !action.is_empty() {
            self.line(
                depth + 3,
                format!("IconButton(onPressed: () {{}}, icon: {}),", icon(action, 24.0, fg)),
            );
        }
        self.line(depth + 2, "],");
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn tabbar(&mut self, p: &Props<'_>, s: &str, depth: usize) {
        let tabs = p.lines("tabs");
        let icons = p.lines("icons");
        let active = p.number("activeIndex").max(0.0) as usize;

        self.line(depth, "Container(");
        self.line(depth + 1, format!("padding: {}.insets,", s));
        self.line(depth + 1, format!("decoration: {}.decoration,", s));
        self.line(depth + 1, "child: Row(");
        self.line(depth + 2, "children: [");
        for (i, tab) in tabs.iter().enumerate() {
            let color = if i == active { p.color("activeColor") } else { p.color("inactiveColor") };
            self.line(depth + 3, "Expanded(");
            self.line(depth + 4, "child: Column(");
            self.line(depth + 5, "mainAxisSize: MainAxisSize.min,");
            self.line(depth + 5, "spacing: 2,");
            self.line(depth + 5, "children: [");
            self.line(
                depth + 6,
                format!("{},", icon(icons.get(i).copied().unwrap_or("ellipse"), 22.0, color)),
            );
            self.line(
                depth + 6,
                format!("Text({}, style: {}),", dart_str(tab), text_style(color, 12.0, None)),
            );
            self.line(depth + 5, "],");
            self.line(depth + 4, "),");
            self.line(depth + 3, "),");
        }
        self.line(depth + 2, "],");
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn image(&mut self, p: &Props<'_>, depth: usize) {
        let source = p.text("source").trim();
        let height = fmt_num(p.positive("height", 200.0));
        let radius = fmt_num(p.number("borderRadius"));
        if source.is_empty() {
            self.line(depth, "Container(");
            self.line(depth + 1, format!("height: {},", height));
            self.line(
                depth + 1,
                format!(
                    "decoration: BoxDecoration(color: Color(0xFFE2E8F0), borderRadius: BorderRadius.circular({})),",
                    radius
                ),
            );
            self.line(depth, "),");
            return;
        }
        self.ctx.use_feature(Feature::NetworkImage);
        let fit = match p.choice("resizeMode") {
            "contain" => "BoxFit.contain",
            "stretch" => "BoxFit.fill",
            _ => "BoxFit.cover",
        };
        self.line(depth, "ClipRRect(");
        self.line(depth + 1, format!("borderRadius: BorderRadius.circular({}),", radius));
        self.line(depth + 1, "child: CachedNetworkImage(");
        self.line(depth + 2, format!("imageUrl: {},", dart_str(source)));
        self.line(depth + 2, format!("height: {},", height));
        self.line(depth + 2, "width: double.infinity,");
        self.line(depth + 2, format!("fit: {},", fit));
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn avatar(&mut self, p: &Props<'_>, depth: usize) {
        let size = p.positive("size", 48.0);
        let source = p.text("source").trim();
        self.line(depth, "Align(");
        self.line(depth + 1, "alignment: Alignment.centerLeft,");
        self.line(depth + 1, "child: CircleAvatar(");
        self.line(depth + 2, format!("radius: {},", fmt_num(size / 2.0)));
        self.line(
            depth + 2,
            format!("backgroundColor: {},", dart_color(p.color("backgroundColor"))),
        );
        if source.is_empty() {
            self.line(
                depth + 2,
                format!(
                    "child: Text({}, style: {}),",
                    dart_str(p.text("initials")),
                    text_style(p.color("textColor"), size * 0.4, Some("600"))
                ),
            );
        } else {
            self.ctx.use_feature(Feature::NetworkImage);
            self.line(
                depth + 2,
                format!("backgroundImage: CachedNetworkImageProvider({}),", dart_str(source)),
            );
        }
        self.line(depth + 1, "),");
        self.line(depth, "),");
    }

    fn placeholder(&mut self, kind: &str, s: &str, depth: usize) {
        self.line(depth, "Container(");
        self.line(depth + 1, format!("padding: {}.insets,", s));
        self.line(depth + 1, format!("decoration: {}.decoration,", s));
        self.line(
            depth + 1,
            format!(
                "child: Text({}, style: {}),",
                dart_str(&format!("Unknown component: {}", kind)),
                text_style("#b91c1c", 14.0, None)
            ),
        );
        self.line(depth, "),");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::Generator;

    fn generate(document: &Document) -> GenerationOutput {
        Generator::new(Arc::new(Catalog::builtin()))
            .unwrap()
            .generate(document, &GenerateOptions::for_target(TargetFormat::Flutter))
            .unwrap()
    }

    #[test]
    fn test_bundle_layout() {
        let document = Document::new("Order History");
        let output = generate(&document);
        let paths: Vec<_> = output.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "lib/screens/order_history_screen.dart",
                "lib/screens/order_history_styles.dart",
                "lib/main.dart",
                "pubspec.yaml",
            ]
        );
        let main = &output.file("lib/main.dart").unwrap().content;
        assert!(main.contains("home: const OrderHistoryScreen(),"));
        assert!(main.contains("class OrderHistoryApp extends StatelessWidget"));
        assert_eq!(output.instructions, vec!["flutter pub get", "flutter run"]);
    }

    #[test]
    fn test_button_scenario() {
        let mut document = Document::new("Home");
        document
            .nodes
            .push(CanvasNode::new("n1", kinds::BUTTON).with_property("text", "Simpan"));

        let output = generate(&document);
        let screen = &output.screen().unwrap().content;
        assert!(screen.contains("Text('Simpan'"));
        assert!(screen.contains("HapticFeedback.lightImpact()"));
        let styles = &output.files_of(FileKind::Style).next().unwrap().content;
        let start = styles.find("static const button_n1 = NodeStyle(").unwrap();
        let end = start + styles[start..].find("  );").unwrap();
        assert!(styles[start..end].contains("backgroundColor: Color(0xFF2563EB),"));
    }

    #[test]
    fn test_network_image_adds_dependency() {
        let mut document = Document::new("Home");
        document.nodes.push(CanvasNode::new("img", kinds::IMAGE));

        let output = generate(&document);
        let names: Vec<_> = output.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["cached_network_image", "cupertino_icons"]);
        let pubspec = &output.file("pubspec.yaml").unwrap().content;
        assert!(pubspec.contains("  cached_network_image: \"^3.4.1\""));
    }

    #[test]
    fn test_dart_color() {
        assert_eq!(dart_color("#2563eb"), "Color(0xFF2563EB)");
        assert_eq!(dart_color("#fff"), "Color(0xFFFFFFFF)");
        assert_eq!(dart_color("#11223380"), "Color(0x80112233)");
        assert_eq!(dart_color("transparent"), "Colors.transparent");
        assert_eq!(dart_color("red"), "Colors.transparent");
    }

    #[test]
    fn test_dart_str_escapes_interpolation() {
        assert_eq!(dart_str("it's $5"), r"'it\'s \$5'");
    }

    #[test]
    fn test_line_height_becomes_multiplier() {
        let block = StyleBlock {
            ident: "text_t".to_string(),
            decls: vec![
                ("fontSize", StyleValue::Number(20.0)),
                ("lineHeight", StyleValue::Number(30.0)),
                ("alignSelf", StyleValue::keyword("flex-start")),
            ],
        };
        assert_eq!(dart_args(&block), vec!["fontSize: 20", "lineHeight: 1.5"]);
    }

    #[test]
    fn test_icon_fallback() {
        assert_eq!(material_icon("heart-outline"), "favorite");
        assert_eq!(material_icon("rocket"), "help_outline");
    }
}
