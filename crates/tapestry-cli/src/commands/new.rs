//! `tapestry new`: build a document through the mutation engine.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tapestry_catalog::Catalog;
use tapestry_core::{Document, NodeId};
use tapestry_editor::{MutationEngine, Placement};
use tracing::info;

use super::write_document;
use crate::config::Config;

#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Output document JSON file
    #[arg(value_name = "FILE")]
    pub out: PathBuf,

    /// Comma-separated kinds in screen order. Prefix a kind with `>` to place
    /// it inside the most recent container, e.g. `card,>heading,>button,text`.
    #[arg(short, long, value_delimiter = ',', value_name = "KINDS")]
    pub kinds: Vec<String>,

    /// Document name (defaults to the file stem)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

pub fn run(args: &NewArgs, config: &Config) -> Result<()> {
    let name = args.name.clone().unwrap_or_else(|| {
        args.out
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Home")
            .to_string()
    });
    let document = build(&name, &args.kinds, config.editor.history_capacity)?;
    write_document(&args.out, &document)?;
    info!(nodes = document.len(), path = %args.out.display(), "Created document");
    Ok(())
}

pub fn build(name: &str, kinds: &[String], history_capacity: usize) -> Result<Document> {
    let catalog = Arc::new(Catalog::builtin());
    let mut engine = MutationEngine::new(catalog.clone()).with_history_capacity(history_capacity);
    engine
        .load(Document::new(name))
        .context("Failed to initialize document")?;

    let mut container: Option<NodeId> = None;
    for spec in kinds.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        let (kind, placement) = match spec.strip_prefix('>') {
            Some(kind) => match &container {
                Some(parent) => (kind.trim(), Placement::Into(parent.clone())),
                None => bail!("'{}' has no container to go into", spec),
            },
            None => (spec, Placement::End),
        };
        let id = engine
            .insert(kind, placement)
            .with_context(|| format!("Failed to insert '{}'", kind))?;
        if !spec.starts_with('>') && catalog.get(kind).map_or(false, |k| k.container) {
            container = Some(id);
        }
    }
    Ok(engine.into_document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapestry_catalog::kinds;

    fn specs(list: &str) -> Vec<String> {
        list.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_build_nests_into_last_container() {
        let document = build("Home", &specs("header,card,>heading,>button,text"), 10).unwrap();
        let roots: Vec<_> = document.nodes.iter().map(|n| n.kind.as_str()).collect();
        assert_eq!(roots, vec![kinds::HEADER, kinds::CARD, kinds::TEXT]);
        let children: Vec<_> = document.nodes[1].children.iter().map(|n| n.kind.as_str()).collect();
        assert_eq!(children, vec![kinds::HEADING, kinds::BUTTON]);
        assert!(document.validate().is_ok());
    }

    #[test]
    fn test_build_rejects_unknown_kind() {
        let err = build("Home", &specs("text,carousel"), 10).unwrap_err();
        assert!(format!("{:#}", err).contains("carousel"));
    }

    #[test]
    fn test_build_rejects_orphan_child() {
        assert!(build("Home", &specs(">button"), 10).is_err());
    }
}
