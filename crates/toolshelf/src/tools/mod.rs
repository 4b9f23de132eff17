use crate::prelude::{println, *};
use colored::Colorize;
use toolshelf_core::catalog::ToolRecord;
use toolshelf_core::pagination::PaginationInfo;

pub mod browse;
pub mod facets;
pub mod info;
pub mod list;
pub mod submit;

// Re-export public data functions
pub use facets::facets_data;
pub use info::info_data;

#[derive(Debug, clap::Parser)]
#[command(name = "tools")]
#[command(about = "Catalog operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List tools matching a search, category, pricing model and tags
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show the categories, pricing models and tags in use
    #[clap(name = "facets")]
    Facets(facets::FacetsOptions),

    /// Submit a new tool to the catalog
    #[clap(name = "submit")]
    Submit(submit::SubmitOptions),

    /// Derive a name, description and image from a tool's URL
    #[clap(name = "info")]
    Info(info::InfoOptions),

    /// Interactive browsing session
    #[clap(name = "browse")]
    Browse,
}

pub async fn run(app: App, global: crate::Global, service: CatalogService) -> Result<()> {
    match app.command {
        Commands::List(options) => list::run(options, global, service).await,
        Commands::Facets(options) => facets::run(options, global, service).await,
        Commands::Submit(options) => submit::run(options, global, service).await,
        Commands::Info(options) => info::run(options, global, service).await,
        Commands::Browse => browse::run(global, service).await,
    }
}

/// Pretty-print any serializable value as JSON on stdout
pub fn output_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{json}");
    Ok(())
}

/// One record as a numbered, colored block
pub fn format_record(number: usize, record: &ToolRecord) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {}\n",
        format!("[{number}]").yellow().bold(),
        record.name.white().bold()
    ));
    result.push_str(&format!(
        "    {}: {}\n",
        "URL".green(),
        record.url.cyan().underline()
    ));
    result.push_str(&format!("    {}\n", record.description.bright_white()));
    result.push_str(&format!(
        "    {}: {} | {}: {} | {}: {}\n",
        "Category".green(),
        record.category.label().bright_magenta(),
        "Pricing".green(),
        record.pricing_model.label().bright_yellow(),
        "Added".green(),
        record
            .created_at
            .format("%Y-%m-%d")
            .to_string()
            .bright_black()
    ));
    if !record.tags.is_empty() {
        result.push_str(&format!(
            "    {}: {}\n",
            "Tags".green(),
            record.tags.join(", ").cyan()
        ));
    }

    result
}

/// Records of one page with a header, numbered from the page offset
pub fn format_page(records: &[ToolRecord], pagination: &PaginationInfo) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "{} TOOLS FOUND (Page {} of {})",
            pagination.total_count,
            pagination.current_page,
            pagination.total_pages.max(1)
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if records.is_empty() {
        result.push_str(&format!(
            "\n{}\n{}\n",
            "No Tools Found".yellow().bold(),
            "Try adjusting your search or filter criteria.".yellow()
        ));
    }

    let offset = (pagination.current_page - 1).saturating_mul(pagination.limit);
    for (idx, record) in records.iter().enumerate() {
        result.push_str(&format_record(offset + idx + 1, record));
    }

    if pagination.total_pages > 1 {
        let strip: Vec<String> = pagination
            .page_numbers
            .iter()
            .map(|n| {
                if *n == pagination.current_page {
                    format!("[{n}]").bright_cyan().bold().to_string()
                } else {
                    n.to_string()
                }
            })
            .collect();
        result.push_str(&format!(
            "\n{}: {}\n",
            "Pages".bright_white().bold(),
            strip.join(" ")
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolshelf_core::catalog::CatalogStore;
    use toolshelf_core::pagination::PageWindow;

    #[test]
    fn test_format_record_contains_fields() {
        colored::control::set_override(false);
        let store = CatalogStore::seeded();
        let text = format_record(1, &store.snapshot()[0]);

        assert!(text.contains("[1] Gemini"));
        assert!(text.contains("https://gemini.google.com"));
        assert!(text.contains("Category: AI Assistant"));
        assert!(text.contains("Tags: api, free, paid"));
    }

    #[test]
    fn test_format_page_numbers_from_offset() {
        colored::control::set_override(false);
        let store = CatalogStore::seeded();
        let pagination = PaginationInfo::new(PageWindow::new(2, 9).unwrap(), 15);
        let text = format_page(&store.snapshot()[9..], &pagination);

        assert!(text.contains("15 TOOLS FOUND (Page 2 of 2)"));
        assert!(text.contains("[10] Runway"));
        assert!(text.contains("Pages: 1 [2]"));
    }

    #[test]
    fn test_format_page_empty() {
        colored::control::set_override(false);
        let pagination = PaginationInfo::new(PageWindow::default(), 0);
        let text = format_page(&[], &pagination);
        assert!(text.contains("No Tools Found"));
        assert!(!text.contains("Pages:"));
    }

    #[test]
    fn test_format_page_far_past_the_end() {
        colored::control::set_override(false);
        let pagination = PaginationInfo::new(PageWindow::new(usize::MAX, 1).unwrap(), 15);
        let text = format_page(&[], &pagination);
        assert!(text.contains("No Tools Found"));
        assert!(text.contains("Pages: 11 12 13 14 15"));
    }
}
