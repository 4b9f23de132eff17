use crate::prelude::{eprintln, *};
use serde::Deserialize;
use toolshelf_core::catalog::{PricingModel, ToolCategory};
use toolshelf_core::pagination::PageWindow;
use toolshelf_core::query::{FilterSpec, Selection};
use toolshelf_core::submission::ToolCandidate;

use super::{parse_arguments, text_result, Context, JsonRpcError};

fn execution_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError::new(
        JsonRpcError::INTERNAL_ERROR,
        format!("Tool execution error: {e}"),
    )
}

pub async fn handle_query(
    arguments: Option<serde_json::Value>,
    context: &Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct QueryArgs {
        #[serde(default)]
        search: String,
        #[serde(default)]
        category: Selection<ToolCategory>,
        #[serde(default)]
        pricing: Selection<PricingModel>,
        #[serde(default)]
        tags: Vec<String>,
        page: Option<usize>,
        limit: Option<usize>,
    }

    let args: QueryArgs = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!(
            "Calling catalog_query: search={:?}, category={}, pricing={}, tags={:?}, page={:?}, limit={:?}",
            args.search, args.category, args.pricing, args.tags, args.page, args.limit
        );
    }

    let window = PageWindow::new(
        args.page.unwrap_or(1),
        args.limit.unwrap_or(context.global.page_size),
    )
    .map_err(|e| JsonRpcError::new(JsonRpcError::INVALID_PARAMS, format!("Invalid arguments: {e}")))?;

    let filters = FilterSpec {
        search: args.search,
        category: args.category,
        pricing: args.pricing,
        tags: args.tags,
    };

    let result = context
        .service
        .get_tools(&filters, window)
        .await
        .map_err(execution_error)?;

    text_result(&result)
}

pub async fn handle_facets(context: &Context) -> Result<serde_json::Value, JsonRpcError> {
    if context.global.verbose {
        eprintln!("Calling catalog_facets");
    }

    let facets = crate::tools::facets_data(&context.service)
        .await
        .map_err(execution_error)?;

    text_result(&facets)
}

pub async fn handle_submit(
    arguments: Option<serde_json::Value>,
    context: &Context,
) -> Result<serde_json::Value, JsonRpcError> {
    let candidate: ToolCandidate = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!(
            "Calling catalog_submit: name={:?}, url={:?}",
            candidate.name, candidate.url
        );
    }

    let record = context
        .service
        .add_tool(candidate)
        .await
        .map_err(execution_error)?;

    text_result(&record)
}

pub async fn handle_url_info(
    arguments: Option<serde_json::Value>,
    context: &Context,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UrlInfoArgs {
        url: String,
    }

    let args: UrlInfoArgs = parse_arguments(arguments)?;

    if context.global.verbose {
        eprintln!("Calling catalog_url_info: url={}", args.url);
    }

    let info = crate::tools::info_data(&context.service, &args.url)
        .await
        .map_err(execution_error)?;

    text_result(&info)
}
