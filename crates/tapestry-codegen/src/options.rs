//! Generation options.

use crate::error::CodegenError;
use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tapestry_core::Document;

/// Output platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetFormat {
    #[default]
    ReactNative,
    ReactNativeTs,
    Flutter,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 3] = [
        TargetFormat::ReactNative,
        TargetFormat::ReactNativeTs,
        TargetFormat::Flutter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReactNative => "react-native",
            Self::ReactNativeTs => "react-native-ts",
            Self::Flutter => "flutter",
        }
    }

    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::ReactNativeTs)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetFormat {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "react-native" | "rn" | "react-native-js" => Ok(Self::ReactNative),
            "react-native-ts" | "rn-ts" | "typescript" => Ok(Self::ReactNativeTs),
            "flutter" | "dart" => Ok(Self::Flutter),
            _ => Err(CodegenError::UnknownTarget(s.to_string())),
        }
    }
}

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub target: TargetFormat,
    /// Emit styles to their own file instead of appending them to the screen.
    pub separate_stylesheet: bool,
    pub minify: bool,
    /// Screen component name; derived from the document name when unset.
    pub screen_name: Option<String>,
    /// App display name; derived from the document name when unset.
    pub app_name: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            target: TargetFormat::default(),
            separate_stylesheet: true,
            minify: false,
            screen_name: None,
            app_name: None,
        }
    }
}

impl GenerateOptions {
    pub fn for_target(target: TargetFormat) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// PascalCase screen name without a trailing `Screen`, e.g. `Login`.
    pub fn screen_name(&self, document: &Document) -> String {
        let raw = self
            .screen_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&document.name);
        let mut name: String = raw
            .to_case(Case::Pascal)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if name.len() > "Screen".len() && name.ends_with("Screen") {
            name.truncate(name.len() - "Screen".len());
        }
        match name.chars().next() {
            None => "Home".to_string(),
            Some(c) if c.is_ascii_digit() => format!("Screen{}", name),
            Some(_) => name,
        }
    }

    /// Human-readable app name.
    pub fn app_name(&self, document: &Document) -> String {
        self.app_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} App", self.screen_name(document).to_case(Case::Title)))
    }
}
