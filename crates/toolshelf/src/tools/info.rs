use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use toolshelf_core::submission::UrlInfo;

use super::output_json;

#[derive(Debug, clap::Args, Clone)]
pub struct InfoOptions {
    /// URL of the tool (e.g. https://www.example.com)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: InfoOptions, global: crate::Global, service: CatalogService) -> Result<()> {
    if global.verbose {
        eprintln!("Deriving tool info from {}", options.url);
    }

    let info = info_data(&service, &options.url).await?;

    if options.json {
        output_json(&info)?;
    } else {
        println!("{}", format_info(&info));
    }

    Ok(())
}

/// Name, description and image derived from `url`
pub async fn info_data<A: CatalogApi>(api: &A, url: &str) -> Result<UrlInfo> {
    api.fetch_info_from_url(url).await.map_err(|e| eyre!(e))
}

fn format_info(info: &UrlInfo) -> String {
    format!(
        "{}: {}\n{}: {}\n{}: {}",
        "Name".green(),
        info.name.white().bold(),
        "Description".green(),
        info.description,
        "Image".green(),
        info.image_url.cyan()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_info_data() {
        let service = CatalogService::default();
        let info = info_data(&service, "https://www.example.com/page")
            .await
            .unwrap();
        assert_eq!(info.name, "Example");

        let err = info_data(&service, "not-a-url").await.unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }
}
