//! `tapestry generate`: write a project bundle for a document.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tapestry_catalog::Catalog;
use tapestry_codegen::{CodegenError, GenerateOptions, GenerationOutput, Generator, TargetFormat};
use tracing::info;

use super::read_document;
use crate::config::Config;

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Document JSON file
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub out: PathBuf,

    /// Target platform: react-native, react-native-ts or flutter
    #[arg(short, long, value_parser = parse_target)]
    pub target: Option<TargetFormat>,

    /// Append styles to the screen file instead of a separate stylesheet
    #[arg(long)]
    pub inline_styles: bool,

    /// Strip indentation, blank lines and comments
    #[arg(long)]
    pub minify: bool,

    /// Screen component name (defaults to the document name)
    #[arg(long, value_name = "NAME")]
    pub screen_name: Option<String>,

    /// App display name
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Print the generation summary as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_target(s: &str) -> Result<TargetFormat, String> {
    s.parse().map_err(|e: CodegenError| e.to_string())
}

impl GenerateArgs {
    /// Config file values with flags applied on top.
    pub fn options(&self, config: &Config) -> GenerateOptions {
        let mut options = config.generate.options();
        if let Some(target) = self.target {
            options.target = target;
        }
        if self.inline_styles {
            options.separate_stylesheet = false;
        }
        if self.minify {
            options.minify = true;
        }
        if self.screen_name.is_some() {
            options.screen_name = self.screen_name.clone();
        }
        if self.app_name.is_some() {
            options.app_name = self.app_name.clone();
        }
        options
    }
}

pub fn run(args: &GenerateArgs, config: &Config) -> Result<()> {
    let document = read_document(&args.document)?;
    let options = args.options(config);

    let generator = Generator::new(Arc::new(Catalog::builtin())).context("Failed to initialize generator")?;
    let output = generator
        .generate(&document, &options)
        .with_context(|| format!("Failed to generate {} project", options.target))?;
    let written = output
        .write_to(&args.out)
        .with_context(|| format!("Failed to write project to {}", args.out.display()))?;
    info!(
        target = %options.target,
        files = written.len(),
        out = %args.out.display(),
        "Generated project"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary(&output))?);
    } else {
        print_summary(&output);
    }
    Ok(())
}

fn summary(output: &GenerationOutput) -> serde_json::Value {
    serde_json::json!({
        "files": output.files.iter().map(|f| &f.path).collect::<Vec<_>>(),
        "dependencies": output.dependencies,
        "instructions": output.instructions,
        "warnings": output.warnings,
    })
}

fn print_summary(output: &GenerationOutput) {
    println!("Files:");
    for file in &output.files {
        println!("  {}", file.path);
    }
    println!("Dependencies:");
    for dep in &output.dependencies {
        println!("  {} {}", dep.name, dep.version);
    }
    println!("Next steps:");
    for step in &output.instructions {
        println!("  {}", step);
    }
    for warning in &output.warnings {
        println!("warning: {}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: GenerateArgs,
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::from_toml("[generate]\ntarget = \"flutter\"\napp_name = \"From File\"\n").unwrap();
        let harness = Harness::parse_from(["x", "doc.json", "--out", "out", "--target", "rn-ts", "--inline-styles"]);

        let options = harness.args.options(&config);
        assert_eq!(options.target, TargetFormat::ReactNativeTs);
        assert!(!options.separate_stylesheet);
        assert_eq!(options.app_name.as_deref(), Some("From File"));
    }

    #[test]
    fn test_config_applies_without_flags() {
        let config = Config::from_toml("[generate]\ntarget = \"flutter\"\nminify = true\n").unwrap();
        let harness = Harness::parse_from(["x", "doc.json", "-o", "out"]);

        let options = harness.args.options(&config);
        assert_eq!(options.target, TargetFormat::Flutter);
        assert!(options.minify);
        assert!(options.separate_stylesheet);
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert!(Harness::try_parse_from(["x", "doc.json", "-o", "out", "-t", "swiftui"]).is_err());
    }
}
