//! `tapestry catalog`: list component kinds.

use anyhow::Result;
use clap::Args;
use tapestry_catalog::Catalog;
use tapestry_core::Category;

#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Output kinds and their schemas as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &CatalogArgs) -> Result<()> {
    let catalog = Catalog::builtin();
    if args.json {
        let kinds: Vec<_> = catalog.list().collect();
        println!("{}", serde_json::to_string_pretty(&kinds)?);
        return Ok(());
    }
    print!("{}", render_table(&catalog));
    Ok(())
}

fn render_table(catalog: &Catalog) -> String {
    let width = catalog.list().map(|k| k.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for category in Category::ALL {
        let kinds: Vec<_> = catalog.by_category(category).collect();
        if kinds.is_empty() {
            continue;
        }
        out.push_str(category.label());
        out.push('\n');
        for kind in kinds {
            let container = if kind.container { "  [container]" } else { "" };
            out.push_str(&format!(
                "  {:<width$}  {} ({} fields){}\n",
                kind.id,
                kind.label,
                kind.config_schema.len(),
                container,
                width = width
            ));
        }
    }
    out
}
