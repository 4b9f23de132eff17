use crate::prelude::{eprintln, println, *};
use prettytable::row;
use toolshelf_core::query::Facets;

use super::output_json;

#[derive(Debug, clap::Args, Clone)]
pub struct FacetsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: FacetsOptions, global: crate::Global, service: CatalogService) -> Result<()> {
    if global.verbose {
        eprintln!("Loading filter options...");
    }

    let facets = facets_data(&service).await?;

    if options.json {
        output_json(&facets)?;
    } else {
        println!("{}", format_facets(&facets));
    }

    Ok(())
}

/// Distinct categories, pricing models and tags across the approved catalog
pub async fn facets_data<A: CatalogApi>(api: &A) -> Result<Facets> {
    crate::controller::load_facets(api)
        .await
        .map_err(|e| eyre!(e))
}

fn format_facets(facets: &Facets) -> String {
    let mut table = new_table();
    table.set_titles(row!["FACET", "COUNT", "VALUES"]);

    let categories: Vec<&str> = facets.categories.iter().map(|c| c.label()).collect();
    let pricing: Vec<&str> = facets.pricing_models.iter().map(|p| p.label()).collect();

    table.add_row(row![
        "Categories",
        categories.len(),
        categories.join(", ")
    ]);
    table.add_row(row![
        "Pricing",
        pricing.len(),
        pricing.join(", ")
    ]);
    table.add_row(row!["Tags", facets.tags.len(), facets.tags.join(", ")]);

    table.to_string()
}
