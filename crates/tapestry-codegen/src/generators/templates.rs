//! Handlebars templates for project configuration files.

use crate::error::{CodegenError, Result};
use convert_case::{Case, Casing};
use handlebars::Handlebars;
use serde::Serialize;

pub const PACKAGE_JSON: &str = "package_json";
pub const APP_JSON: &str = "app_json";
pub const TSCONFIG_JSON: &str = "tsconfig_json";
pub const PUBSPEC_YAML: &str = "pubspec_yaml";

const PACKAGE_JSON_TEMPLATE: &str = r#"{
  "name": "{{kebab_case app_name}}",
  "version": "1.0.0",
  "private": true,
  "main": "node_modules/expo/AppEntry.js",
  "scripts": {
    "start": "expo start",
    "android": "expo start --android",
    "ios": "expo start --ios"
  },
  "dependencies": {
{{#each dependencies}}    {{json name}}: {{json version}}{{#unless @last}},{{/unless}}
{{/each}}  }{{#if dev_dependencies}},
  "devDependencies": {
{{#each dev_dependencies}}    {{json name}}: {{json version}}{{#unless @last}},{{/unless}}
{{/each}}  }{{/if}}
}
"#;

const APP_JSON_TEMPLATE: &str = r#"{
  "expo": {
    "name": {{json app_name}},
    "slug": "{{kebab_case app_name}}",
    "version": "1.0.0",
    "orientation": "portrait",
    "userInterfaceStyle": "light"
  }
}
"#;

const TSCONFIG_JSON_TEMPLATE: &str = r#"{
  "extends": "expo/tsconfig.base",
  "compilerOptions": {
    "strict": true
  }
}
"#;

const PUBSPEC_YAML_TEMPLATE: &str = r#"name: {{snake_case app_name}}
description: {{json description}}
publish_to: 'none'
version: 1.0.0+1

environment:
  sdk: '>=3.6.0 <4.0.0'

dependencies:
  flutter:
    sdk: flutter
{{#each dependencies}}  {{name}}: {{json version}}
{{/each}}
flutter:
  uses-material-design: true
"#;

/// Template engine using Handlebars.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with no templates registered.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Create an engine with the bundled configuration templates.
    pub fn with_builtin_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(PACKAGE_JSON, PACKAGE_JSON_TEMPLATE)?;
        engine.register_template(APP_JSON, APP_JSON_TEMPLATE)?;
        engine.register_template(TSCONFIG_JSON, TSCONFIG_JSON_TEMPLATE)?;
        engine.register_template(PUBSPEC_YAML, PUBSPEC_YAML_TEMPLATE)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        // JSON literal of any value, quotes included
        handlebars.register_helper(
            "json",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let value = h
                        .param(0)
                        .map(|v| v.value().to_string())
                        .unwrap_or_else(|| "null".to_string());
                    out.write(&value)?;
                    Ok(())
                },
            ),
        );

        for (name, case) in [("kebab_case", Case::Kebab), ("snake_case", Case::Snake)] {
            handlebars.register_helper(
                name,
                Box::new(
                    move |h: &handlebars::Helper,
                          _r: &Handlebars,
                          _ctx: &handlebars::Context,
                          _rc: &mut handlebars::RenderContext,
                          out: &mut dyn handlebars::Output| {
                        let param = h
                            .param(0)
                            .and_then(|v| v.value().as_str())
                            .unwrap_or("");
                        out.write(&package_case(param, case))?;
                        Ok(())
                    },
                ),
            );
        }
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Package-manager-safe name: ASCII letters, digits and the case's separator.
fn package_case(s: &str, case: Case) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let name = cleaned.to_case(case);
    if name.is_empty() {
        "app".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("app{}{}", if case == Case::Snake { "_" } else { "-" }, name)
    } else {
        name
    }
}
