use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use toolshelf_core::catalog::{PricingModel, ToolCategory, ToolRecord};
use toolshelf_core::submission::{parse_tags, ToolCandidate, DEFAULT_SUBMITTER};

use super::{format_record, output_json};

#[derive(Debug, clap::Args, Clone)]
pub struct SubmitOptions {
    /// Tool homepage
    #[arg(short, long)]
    pub url: String,

    /// Tool name (derived from the URL with --auto-fill)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Short description (derived from the URL with --auto-fill)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Category label
    #[arg(short, long)]
    pub category: ToolCategory,

    /// Pricing model label
    #[arg(short, long)]
    pub pricing: PricingModel,

    /// Comma-separated tags (e.g. "api, free, productivity")
    #[arg(short, long, default_value = "")]
    pub tags: String,

    /// Image URL shown with the tool
    #[arg(long)]
    pub image_url: Option<String>,

    /// Id of the submitting user
    #[arg(long, env = "TOOLSHELF_USER", default_value = DEFAULT_SUBMITTER)]
    pub user: String,

    /// Fill missing name, description and image from the URL
    #[arg(long)]
    pub auto_fill: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SubmitOptions, global: crate::Global, service: CatalogService) -> Result<()> {
    if global.verbose {
        eprintln!("Submitting {}", options.url);
    }

    let record = submit_data(&service, options.clone()).await?;

    if options.json {
        output_json(&record)?;
    } else {
        println!("{}", "Tool submitted and approved".bright_green().bold());
        println!("{}", format_record(1, &record));
    }

    if global.verbose {
        eprintln!(
            "Catalog now holds {} tools (in memory for this process only)",
            service.len().await
        );
    }

    Ok(())
}

/// Build a candidate from the options, optionally auto-filled, and submit it
pub async fn submit_data<A: CatalogApi>(api: &A, options: SubmitOptions) -> Result<ToolRecord> {
    let mut name = options.name.unwrap_or_default();
    let mut description = options.description.unwrap_or_default();
    let mut image_url = options.image_url;

    if options.auto_fill {
        let info = api
            .fetch_info_from_url(&options.url)
            .await
            .map_err(|e| eyre!(e))?;
        if name.trim().is_empty() {
            name = info.name;
        }
        if description.trim().is_empty() {
            description = info.description;
        }
        if image_url.is_none() {
            image_url = Some(info.image_url);
        }
    }

    let candidate = ToolCandidate {
        name,
        url: options.url,
        description,
        category: options.category,
        pricing_model: options.pricing,
        tags: parse_tags(&options.tags),
        image_url,
        submitted_by_user_id: options.user,
    };

    api.add_tool(candidate).await.map_err(|e| eyre!(e))
}
