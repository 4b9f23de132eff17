use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use serde::Serialize;
use toolshelf_core::catalog::{PricingModel, ToolCategory, ToolRecord};
use toolshelf_core::pagination::{PageWindow, PaginationInfo};
use toolshelf_core::query::{FilterSpec, Selection};

use super::{format_page, output_json};

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Case-insensitive text matched against name and description
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category label, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: Selection<ToolCategory>,

    /// Pricing model label, or "all"
    #[arg(long, default_value = "all")]
    pub pricing: Selection<PricingModel>,

    /// Required tag; repeat to require several (all must match)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Tools per page (defaults to --page-size)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    fn filters(&self) -> FilterSpec {
        FilterSpec {
            search: self.search.clone(),
            category: self.category,
            pricing: self.pricing,
            tags: self.tags.clone(),
        }
    }
}

/// One page of results with the filters that produced it
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub filters: FilterSpec,
    pub tools: Vec<ToolRecord>,
    pub pagination: PaginationInfo,
}

pub async fn run(options: ListOptions, global: crate::Global, service: CatalogService) -> Result<()> {
    let limit = options.limit.unwrap_or(global.page_size);

    if global.verbose {
        eprintln!(
            "Listing tools (page {}, {} per page) with filters {:?}",
            options.page,
            limit,
            options.filters()
        );
    }

    let output = list_tools_data(&service, options.filters(), options.page, limit).await?;

    if options.json {
        output_json(&output)?;
    } else {
        println!("{}", format_page(&output.tools, &output.pagination));
        print_navigation(&options, &output.pagination);
    }

    Ok(())
}

/// Query the catalog and return one page as a structured ListOutput
pub async fn list_tools_data<A: CatalogApi>(
    api: &A,
    filters: FilterSpec,
    page: usize,
    limit: usize,
) -> Result<ListOutput> {
    let window = PageWindow::new(page, limit).map_err(|e| eyre!("{}", e))?;
    let result = api
        .get_tools(&filters, window)
        .await
        .map_err(|e| eyre!(e))?;

    Ok(ListOutput {
        pagination: PaginationInfo::new(window, result.total_count),
        tools: result.data,
        filters,
    })
}

fn print_navigation(options: &ListOptions, pagination: &PaginationInfo) {
    let mut base = String::from("toolshelf tools list");
    if !options.search.is_empty() {
        base.push_str(&format!(" --search {:?}", options.search));
    }
    if !options.category.is_all() {
        base.push_str(&format!(" --category {:?}", options.category.to_string()));
    }
    if !options.pricing.is_all() {
        base.push_str(&format!(" --pricing {:?}", options.pricing.to_string()));
    }
    for tag in &options.tags {
        base.push_str(&format!(" --tag {tag:?}"));
    }
    if let Some(limit) = options.limit {
        base.push_str(&format!(" --limit {limit}"));
    }

    if pagination.has_next {
        println!(
            "  {}: {}",
            "Next page".green(),
            format!("{base} --page {}", pagination.current_page.saturating_add(1)).cyan()
        );
    }
    if pagination.has_prev {
        println!(
            "  {}: {}",
            "Previous page".green(),
            format!("{base} --page {}", pagination.current_page - 1).cyan()
        );
    }
}
