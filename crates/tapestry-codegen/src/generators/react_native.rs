//! React Native (Expo) code generator.

use super::templates::{TemplateEngine, APP_JSON, PACKAGE_JSON, TSCONFIG_JSON};
use super::{pad, pinned, CodeGenerator, EmitContext, Feature};
use crate::error::Result;
use crate::options::{GenerateOptions, TargetFormat};
use crate::output::{FileKind, GeneratedFile, GenerationOutput};
use crate::props::Props;
use crate::style::{self, fmt_num, Decl, StyleBlock, StyleValue};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tapestry_catalog::{kinds, Catalog};
use tapestry_core::{ButtonVariant, CanvasNode, ComponentKind, Document};

const VERSIONS: &[(&str, &str)] = &[
    ("@expo/vector-icons", "^14.0.2"),
    ("@types/react", "~18.2.45"),
    ("expo", "~51.0.28"),
    ("expo-haptics", "~13.0.1"),
    ("react", "18.2.0"),
    ("react-native", "0.74.5"),
    ("react-native-keyboard-aware-scroll-view", "^0.9.5"),
    ("react-native-safe-area-context", "4.10.5"),
    ("typescript", "~5.3.3"),
];

const BASE_PACKAGES: &[&str] = &["expo", "react", "react-native", "react-native-safe-area-context"];

const TS_DEV_PACKAGES: &[&str] = &["@types/react", "typescript"];

fn package_for(feature: Feature) -> Option<&'static str> {
    match feature {
        Feature::Icons => Some("@expo/vector-icons"),
        Feature::Haptics => Some("expo-haptics"),
        Feature::KeyboardAware => Some("react-native-keyboard-aware-scroll-view"),
        Feature::NetworkImage => None,
    }
}

/// React Native generator, JavaScript or TypeScript flavored.
pub struct ReactNativeGenerator {
    catalog: Arc<Catalog>,
    templates: TemplateEngine<'static>,
    typescript: bool,
}

impl ReactNativeGenerator {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self> {
        Ok(Self {
            catalog,
            templates: TemplateEngine::with_builtin_templates()?,
            typescript: false,
        })
    }

    pub fn typescript(catalog: Arc<Catalog>) -> Result<Self> {
        Ok(Self {
            typescript: true,
            ..Self::new(catalog)?
        })
    }

    fn code_ext(&self) -> &'static str {
        if self.typescript {
            "tsx"
        } else {
            "js"
        }
    }

    fn style_ext(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }

    fn screen_source(&self, screen: &str, writer: &ScreenWriter<'_>, inline_styles: Option<&str>) -> String {
        let features = &writer.ctx.features;
        let mut components = writer.components.clone();
        if inline_styles.is_some() {
            components.insert("StyleSheet");
        }

        let mut out = String::from("import React from 'react';\n");
        let list: Vec<&str> = components.into_iter().collect();
        out.push_str(&format!("import {{ {} }} from 'react-native';\n", list.join(", ")));
        out.push_str("import { SafeAreaView } from 'react-native-safe-area-context';\n");
        if features.contains(&Feature::Icons) {
            out.push_str("import { Ionicons } from '@expo/vector-icons';\n");
        }
        if features.contains(&Feature::Haptics) {
            out.push_str("import * as Haptics from 'expo-haptics';\n");
        }
        let scroll = if features.contains(&Feature::KeyboardAware) {
            out.push_str("import { KeyboardAwareScrollView } from 'react-native-keyboard-aware-scroll-view';\n");
            "KeyboardAwareScrollView"
        } else {
            "ScrollView"
        };
        if inline_styles.is_none() {
            out.push_str(&format!("import {{ styles }} from './{}.styles';\n", screen));
        }
        out.push('\n');

        if self.typescript {
            out.push_str(&format!("export default function {}(): React.JSX.Element {{\n", screen));
        } else {
            out.push_str(&format!("export default function {}() {{\n", screen));
        }
        out.push_str("  return (\n");
        out.push_str("    <SafeAreaView style={styles.screen}>\n");
        out.push_str(&format!("      <{} contentContainerStyle={{styles.content}}>\n", scroll));
        for line in &writer.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&format!("      </{}>\n", scroll));
        out.push_str("    </SafeAreaView>\n");
        out.push_str("  );\n}\n");

        if let Some(styles) = inline_styles {
            out.push('\n');
            out.push_str(styles);
        }
        out
    }

    fn app_source(&self, screen: &str) -> String {
        let signature = if self.typescript {
            "export default function App(): React.JSX.Element {"
        } else {
            "export default function App() {"
        };
        format!(
            "import React from 'react';\n\
             import {{ SafeAreaProvider }} from 'react-native-safe-area-context';\n\
             import {screen} from './src/screens/{screen}';\n\
             \n\
             {signature}\n\
             \x20 return (\n\
             \x20   <SafeAreaProvider>\n\
             \x20     <{screen} />\n\
             \x20   </SafeAreaProvider>\n\
             \x20 );\n\
             }}\n",
            screen = screen,
            signature = signature,
        )
    }
}

impl CodeGenerator for ReactNativeGenerator {
    fn target(&self) -> TargetFormat {
        if self.typescript {
            TargetFormat::ReactNativeTs
        } else {
            TargetFormat::ReactNative
        }
    }

    fn framework_name(&self) -> &'static str {
        "React Native"
    }

    fn emit(&self, document: &Document, options: &GenerateOptions) -> Result<GenerationOutput> {
        let screen = format!("{}Screen", options.screen_name(document));
        let app_name = options.app_name(document);

        let mut writer = ScreenWriter::new(&self.catalog);
        for node in &document.nodes {
            writer.node(node, 4);
        }
        if !writer.ctx.features.contains(&Feature::KeyboardAware) {
            writer.tag("ScrollView");
        }

        let mut blocks = scaffold_blocks();
        blocks.extend(writer.ctx.styles.iter().cloned());
        let sheet = stylesheet(&blocks);

        let dir = "src/screens";
        let mut files = Vec::new();
        if options.separate_stylesheet {
            files.push(GeneratedFile::new(
                format!("{}/{}.{}", dir, screen, self.code_ext()),
                self.screen_source(&screen, &writer, None),
                FileKind::Screen,
            ));
            files.push(GeneratedFile::new(
                format!("{}/{}.styles.{}", dir, screen, self.style_ext()),
                format!("import {{ StyleSheet }} from 'react-native';\n\nexport {}", sheet),
                FileKind::Style,
            ));
        } else {
            files.push(GeneratedFile::new(
                format!("{}/{}.{}", dir, screen, self.code_ext()),
                self.screen_source(&screen, &writer, Some(&sheet)),
                FileKind::Screen,
            ));
        }
        files.push(GeneratedFile::new(
            format!("App.{}", self.code_ext()),
            self.app_source(&screen),
            FileKind::Component,
        ));

        let mut names: BTreeSet<&str> = BASE_PACKAGES.iter().copied().collect();
        names.extend(writer.ctx.features.iter().filter_map(|f| package_for(*f)));
        let dependencies = pinned(&names, VERSIONS);
        let dev_dependencies = if self.typescript {
            pinned(&TS_DEV_PACKAGES.iter().copied().collect(), VERSIONS)
        } else {
            Vec::new()
        };

        files.push(GeneratedFile::new(
            "app.json",
            self.templates.render(APP_JSON, &json!({ "app_name": app_name }))?,
            FileKind::Config,
        ));
        files.push(GeneratedFile::new(
            "package.json",
            self.templates.render(
                PACKAGE_JSON,
                &json!({
                    "app_name": app_name,
                    "dependencies": dependencies,
                    "dev_dependencies": dev_dependencies,
                }),
            )?,
            FileKind::Config,
        ));
        if self.typescript {
            files.push(GeneratedFile::new(
                "tsconfig.json",
                self.templates.render(TSCONFIG_JSON, &json!({}))?,
                FileKind::Config,
            ));
        }

        Ok(GenerationOutput {
            files,
            dependencies,
            instructions: vec!["npm install".to_string(), "npx expo start".to_string()],
            warnings: writer.ctx.warnings,
        })
    }
}

fn scaffold_blocks() -> Vec<StyleBlock> {
    vec![
        StyleBlock {
            ident: "screen".to_string(),
            decls: vec![
                ("flex", StyleValue::Number(1.0)),
                ("backgroundColor", StyleValue::color("#f8fafc")),
            ],
        },
        StyleBlock {
            ident: "content".to_string(),
            decls: vec![
                ("padding", StyleValue::Number(16.0)),
                ("gap", StyleValue::Number(12.0)),
            ],
        },
    ]
}

fn stylesheet(blocks: &[StyleBlock]) -> String {
    let mut out = String::from("const styles = StyleSheet.create({\n");
    for block in blocks {
        out.push_str(&format!("  {}: {{\n", block.ident));
        for (key, value) in &block.decls {
            out.push_str(&format!("    {}: {},\n", key, js_value(value)));
        }
        out.push_str("  },\n");
    }
    out.push_str("});\n");
    out
}

/// JavaScript string literal.
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn js_quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn js_value(value: &StyleValue) -> String {
    match value {
        StyleValue::Number(n) => fmt_num(*n),
        StyleValue::Percent(n) => format!("'{}%'", fmt_num(*n)),
        StyleValue::Color(s) | StyleValue::Keyword(s) => js_quote(s),
        StyleValue::Raw(s) => s.clone(),
    }
}

/// Inline JSX style attribute value, e.g. `{{ color: '#fff' }}`.
fn inline(decls: &[Decl]) -> String {
    let parts: Vec<String> = decls
        .iter()
        .map(|(key, value)| format!("{}: {}", key, js_value(value)))
        .collect();
    format!("{{{{ {} }}}}", parts.join(", "))
}

fn num(n: f64) -> StyleValue {
    StyleValue::Number(n)
}

/// Accumulates JSX lines and the `react-native` imports they use.
struct ScreenWriter<'a> {
    ctx: EmitContext<'a>,
    components: BTreeSet<&'static str>,
    lines: Vec<String>,
}

impl<'a> ScreenWriter<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        Self {
            ctx: EmitContext::new(catalog),
            components: BTreeSet::new(),
            lines: Vec::new(),
        }
    }

    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        self.lines.push(format!("{}{}", pad(depth), text.as_ref()));
    }

    fn tag(&mut self, name: &'static str) -> &'static str {
        self.components.insert(name);
        name
    }

    fn text(&mut self, depth: usize, style: &str, content: &str) {
        self.tag("Text");
        self.line(depth, format!("<Text style={}>{{{}}}</Text>", style, js_str(content)));
    }

    fn ionicon(&mut self, depth: usize, name: &str, size: f64, color: &str, extra: &str) {
        self.ctx.use_feature(Feature::Icons);
        self.line(
            depth,
            format!(
                "<Ionicons name={{{}}} size={{{}}} color={{{}}}{} />",
                js_str(name),
                fmt_num(size),
                js_str(color),
                extra
            ),
        );
    }

    fn node(&mut self, node: &CanvasNode, depth: usize) {
        let entered = self.ctx.enter(node);
        let style = format!("{{styles.{}}}", entered.ident);
        let p = entered.props;
        let Some(kind) = entered.kind else {
            self.placeholder(&node.kind, &style, depth);
            return;
        };

        match node.kind.as_str() {
            kinds::CONTAINER => self.group(&node.children, &style, None, depth),
            kinds::CARD => {
                let title = p.flag("showTitle").then(|| p.text("title"));
                self.group(&node.children, &style, title, depth)
            }
            kinds::DIVIDER | kinds::SPACER => {
                self.tag("View");
                self.line(depth, format!("<View style={} />", style));
            }
            kinds::BUTTON => self.button(&p, &style, depth),
            kinds::INPUT => self.input(&p, &style, depth),
            kinds::SWITCH => self.switch(&p, &style, depth),
            kinds::TEXT => self.text(depth, &style, p.text("text")),
            kinds::HEADING => {
                self.tag("Text");
                self.line(
                    depth,
                    format!(
                        "<Text style={} accessibilityRole=\"header\">{{{}}}</Text>",
                        style,
                        js_str(p.text("text"))
                    ),
                );
            }
            kinds::BADGE => {
                self.tag("View");
                self.line(depth, format!("<View style={}>", style));
                let label = inline(&[
                    ("color", StyleValue::color(p.color("textColor"))),
                    ("fontSize", num(p.positive("fontSize", 12.0))),
                    ("fontWeight", StyleValue::keyword("600")),
                ]);
                self.text(depth + 1, &label, p.text("text"));
                self.line(depth, "</View>");
            }
            kinds::LIST => self.list(&p, &style, depth),
            kinds::HEADER => self.header(&p, &style, depth),
            kinds::TABBAR => self.tabbar(&p, &style, depth),
            kinds::IMAGE => self.image(&p, &style, depth),
            kinds::ICON => {
                let extra = format!(" style={}", style);
                self.ionicon(depth, p.text("name"), p.positive("size", 24.0), p.color("color"), &extra);
            }
            kinds::AVATAR => self.avatar(&p, &style, depth),
            _ => self.generic(kind, &p, &node.children, &style, depth),
        }
    }

    /// A registered kind with no dedicated markup: a styled `View` holding
    /// its text fields, then its children when it is a container.
    fn generic(&mut self, kind: &ComponentKind, p: &Props<'_>, children: &[CanvasNode], style: &str, depth: usize) {
        let labels = p.labels();
        let children: &[CanvasNode] = if kind.container { children } else { &[] };
        self.tag("View");
        if labels.is_empty() && children.is_empty() {
            self.line(depth, format!("<View style={} />", style));
            return;
        }
        self.line(depth, format!("<View style={}>", style));
        let (color, size) = style::generic_label(kind, p);
        let label = inline(&[("color", StyleValue::color(color)), ("fontSize", num(size))]);
        for text in labels {
            self.text(depth + 1, &label, text);
        }
        for child in children {
            self.node(child, depth + 1);
        }
        self.line(depth, "</View>");
    }

    fn group(&mut self, children: &[CanvasNode], style: &str, title: Option<&str>, depth: usize) {
        self.tag("View");
        if children.is_empty() && title.is_none() {
            self.line(depth, format!("<View style={} />", style));
            return;
        }
        self.line(depth, format!("<View style={}>", style));
        if let Some(title) = title {
            let title_style = inline(&[
                ("fontSize", num(18.0)),
                ("fontWeight", StyleValue::keyword("600")),
                ("color", StyleValue::color("#0f172a")),
            ]);
            self.text(depth + 1, &title_style, title);
        }
        for child in children {
            self.node(child, depth + 1);
        }
        self.line(depth, "</View>");
    }

    fn button(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        let palette =
            ButtonVariant::from_choice(p.choice("variant")).palette(p.color("backgroundColor"), p.color("textColor"));
        let font = p.positive("fontSize", 16.0);
        let icon = Some(p.text("icon")).filter(|i| p.flag("showIcon") && !i.is_empty());
        let leading = p.choice("iconPosition") == "leading";
        let disabled = if p.flag("disabled") { " disabled" } else { "" };

        self.tag("TouchableOpacity");
        self.ctx.use_feature(Feature::Haptics);
        self.line(
            depth,
            format!(
                "<TouchableOpacity style={} activeOpacity={{0.8}} onPress={{() => Haptics.impactAsync(Haptics.ImpactFeedbackStyle.Light)}}{}>",
                style, disabled
            ),
        );
        if let (Some(icon), true) = (icon, leading) {
            self.ionicon(depth + 1, icon, font, &palette.foreground, "");
        }
        let label = inline(&[
            ("color", StyleValue::Color(palette.foreground.clone())),
            ("fontSize", num(font)),
            ("fontWeight", StyleValue::keyword("600")),
        ]);
        self.text(depth + 1, &label, p.text("text"));
        if let (Some(icon), false) = (icon, leading) {
            self.ionicon(depth + 1, icon, font, &palette.foreground, "");
        }
        self.line(depth, "</TouchableOpacity>");
    }

    fn input(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        self.tag("View");
        self.tag("TextInput");
        self.ctx.use_feature(Feature::KeyboardAware);

        self.line(depth, "<View>");
        if p.flag("showLabel") {
            let label = inline(&[
                ("marginBottom", num(6.0)),
                ("fontSize", num(14.0)),
                ("fontWeight", StyleValue::keyword("500")),
                ("color", StyleValue::color("#334155")),
            ]);
            self.text(depth + 1, &label, p.text("label"));
        }
        self.line(depth + 1, format!("<View style={}>", style));
        let icon = p.text("icon");
        if p.flag("showIcon") && !icon.is_empty() {
            self.ionicon(depth + 2, icon, 20.0, "#64748b", "");
        }

        let mut attrs = vec![
            format!("placeholder={{{}}}", js_str(p.text("placeholder"))),
            "placeholderTextColor=\"#94a3b8\"".to_string(),
        ];
        match p.choice("inputType") {
            "email" => {
                attrs.push("keyboardType=\"email-address\"".to_string());
                attrs.push("autoCapitalize=\"none\"".to_string());
            }
            "password" => attrs.push("secureTextEntry".to_string()),
            "number" => attrs.push("keyboardType=\"numeric\"".to_string()),
            "phone" => attrs.push("keyboardType=\"phone-pad\"".to_string()),
            _ => {}
        }
        if p.flag("multiline") {
            attrs.push("multiline".to_string());
            attrs.push("numberOfLines={4}".to_string());
            attrs.push("textAlignVertical=\"top\"".to_string());
        }
        attrs.push(format!(
            "style={}",
            inline(&[
                ("flex", num(1.0)),
                ("fontSize", num(p.positive("fontSize", 16.0))),
                ("color", StyleValue::color("#0f172a")),
            ])
        ));
        self.line(depth + 2, format!("<TextInput {} />", attrs.join(" ")));
        self.line(depth + 1, "</View>");
        self.line(depth, "</View>");
    }

    fn switch(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        self.tag("View");
        self.tag("Switch");
        self.line(depth, format!("<View style={}>", style));
        let label = inline(&[
            ("flex", num(1.0)),
            ("color", StyleValue::color(p.color("labelColor"))),
            ("fontSize", num(p.positive("fontSize", 16.0))),
        ]);
        self.text(depth + 1, &label, p.text("label"));
        self.line(
            depth + 1,
            format!(
                "<Switch value={{{}}} trackColor={{{{ true: {} }}}} />",
                p.flag("value"),
                js_quote(p.color("activeColor"))
            ),
        );
        self.line(depth, "</View>");
    }

    fn list(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        self.tag("View");
        self.line(depth, format!("<View style={}>", style));
        let items = p.lines("items");
        let dividers = p.flag("showDividers");
        for (i, item) in items.iter().enumerate() {
            let mut row = vec![
                ("flexDirection", StyleValue::keyword("row")),
                ("alignItems", StyleValue::keyword("center")),
                ("paddingVertical", num(14.0)),
                ("paddingHorizontal", num(16.0)),
            ];
            if dividers && i + 1 < items.len() {
                row.push(("borderBottomWidth", num(1.0)));
                row.push(("borderBottomColor", StyleValue::color(p.color("dividerColor"))));
            }
            self.line(depth + 1, format!("<View style={}>", inline(&row)));
            let label = inline(&[
                ("flex", num(1.0)),
                ("color", StyleValue::color(p.color("itemColor"))),
                ("fontSize", num(p.positive("fontSize", 16.0))),
            ]);
            self.text(depth + 2, &label, item);
            if p.flag("showChevron") {
                self.ionicon(depth + 2, "chevron-forward", 18.0, "#94a3b8", "");
            }
            self.line(depth + 1, "</View>");
        }
        self.line(depth, "</View>");
    }

    fn header(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        self.tag("View");
        let fg = p.color("textColor");
        self.line(depth, format!("<View style={}>", style));
        if p.flag("showBack") {
            self.tag("TouchableOpacity");
            self.line(depth + 1, "<TouchableOpacity style={{ padding: 8 }}>");
            self.ionicon(depth + 2, "arrow-back", 24.0, fg, "");
            self.line(depth + 1, "</TouchableOpacity>");
        }
        let title = inline(&[
            ("flex", num(1.0)),
            ("paddingHorizontal", num(8.0)),
            ("color", StyleValue::color(fg)),
            ("fontSize", num(18.0)),
            ("fontWeight", StyleValue::keyword("600")),
        ]);
        self.tag("Text");
        self.line(
            depth + 1,
            format!("<Text style={} numberOfLines={{1}}>{{{}}}</Text>", title, js_str(p.text("title"))),
        );
        let action = p.text("actionIcon");
        if p.flag("showAction") && !action.is_empty() {
            self.tag("TouchableOpacity");
            self.line(depth + 1, "<TouchableOpacity style={{ padding: 8 }}>");
            self.ionicon(depth + 2, action, 24.0, fg, "");
            self.line(depth + 1, "</TouchableOpacity>");
        }
        self.line(depth, "</View>");
    }

    fn tabbar(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        self.tag("View");
        self.tag("TouchableOpacity");
        let tabs = p.lines("tabs");
        let icons = p.lines("icons");
        let active = p.number("activeIndex").max(0.0) as usize;

        self.line(depth, format!("<View style={}>", style));
        for (i, tab) in tabs.iter().enumerate() {
            let color = if i == active { p.color("activeColor") } else { p.color("inactiveColor") };
            self.line(
                depth + 1,
                "<TouchableOpacity style={{ flex: 1, alignItems: 'center', gap: 2 }}>",
            );
            self.ionicon(depth + 2, icons.get(i).copied().unwrap_or("ellipse"), 22.0, color, "");
            let label = inline(&[("color", StyleValue::color(color)), ("fontSize", num(12.0))]);
            self.text(depth + 2, &label, tab);
            self.line(depth + 1, "</TouchableOpacity>");
        }
        self.line(depth, "</View>");
    }

    fn image(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        let source = p.text("source").trim();
        if source.is_empty() {
            self.tag("View");
            let inner = &style[1..style.len() - 1];
            self.line(
                depth,
                format!("<View style={{[{}, {{ backgroundColor: '#e2e8f0' }}]}} />", inner),
            );
            return;
        }
        self.tag("Image");
        self.line(
            depth,
            format!(
                "<Image source={{{{ uri: {} }}}} style={} resizeMode={} accessibilityLabel={{{}}} />",
                js_str(source),
                style,
                js_str(p.choice("resizeMode")),
                js_str(p.text("alt"))
            ),
        );
    }

    fn avatar(&mut self, p: &Props<'_>, style: &str, depth: usize) {
        let source = p.text("source").trim();
        if !source.is_empty() {
            self.tag("Image");
            self.line(
                depth,
                format!("<Image source={{{{ uri: {} }}}} style={} />", js_str(source), style),
            );
            return;
        }
        self.tag("View");
        self.line(depth, format!("<View style={}>", style));
        let label = inline(&[
            ("color", StyleValue::color(p.color("textColor"))),
            ("fontSize", num(p.positive("size", 48.0) * 0.4)),
            ("fontWeight", StyleValue::keyword("600")),
        ]);
        self.text(depth + 1, &label, p.text("initials"));
        self.line(depth, "</View>");
    }

    fn placeholder(&mut self, kind: &str, style: &str, depth: usize) {
        self.tag("View");
        self.line(depth, format!("<View style={}>", style));
        let label = inline(&[
            ("color", StyleValue::color("#b91c1c")),
            ("fontSize", num(14.0)),
        ]);
        self.text(depth + 1, &label, &format!("Unknown component: {}", kind));
        self.line(depth, "</View>");
    }
}
