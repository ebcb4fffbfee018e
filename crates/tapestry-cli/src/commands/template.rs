//! `tapestry template`: named documents in a directory store.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tapestry_editor::{DirectoryStore, DocumentId, DocumentStore};
use tracing::info;

use super::{read_document, write_document};
use crate::config::Config;

/// Manage saved document templates
#[derive(Debug, Clone, Args)]
pub struct TemplateArgs {
    /// Template directory (overrides `[store] templates`)
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: TemplateCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TemplateCommand {
    /// Save a document under a name and print its id
    Save {
        /// Template name
        name: String,
        /// Document JSON file
        document: PathBuf,
    },
    /// Print a saved document, or write it to a file
    Load {
        /// Template id
        id: String,
        /// Output file
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// List saved templates
    List {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(args: &TemplateArgs, config: &Config) -> Result<()> {
    let root = match &args.dir {
        Some(dir) => dir.clone(),
        None => config.templates_dir()?,
    };
    let mut store = DirectoryStore::new(root);

    match &args.command {
        TemplateCommand::Save { name, document } => {
            let document = read_document(document)?;
            let id = store
                .save(name, &document)
                .with_context(|| format!("Failed to save template '{}'", name))?;
            info!(id = %id, name = %name, dir = %store.root().display(), "Saved template");
            println!("{}", id);
        }
        TemplateCommand::Load { id, out } => {
            let id = DocumentId::from(id.as_str());
            let document = store
                .load(&id)
                .with_context(|| format!("Failed to load template {}", id))?;
            match out {
                Some(path) => {
                    write_document(path, &document)?;
                    info!(id = %id, path = %path.display(), "Wrote template");
                }
                None => println!("{}", document.to_json().context("Failed to serialize document")?),
            }
        }
        TemplateCommand::List { json } => {
            let templates = store.list().context("Failed to list templates")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&templates)?);
            } else if templates.is_empty() {
                println!("No templates in {}", store.root().display());
            } else {
                for template in templates {
                    println!("{}  {}  ({} nodes)", template.id, template.name, template.nodes);
                }
            }
        }
    }
    Ok(())
}
