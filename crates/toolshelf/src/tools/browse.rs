use crate::controller::Controller;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use toolshelf_core::catalog::{PricingModel, ToolCategory};
use toolshelf_core::query::{FilterSpec, Selection};
use toolshelf_core::submission::{parse_tags, ToolCandidate};
use toolshelf_core::view_state::{FacetState, FilterChange, LoadState, SubmitState, ViewState};

use super::format_page;

const HELP: &str = "\
Commands:
  search <text>         match name or description (empty clears)
  category <label|all>  filter by category
  pricing <label|all>   filter by pricing model
  tag <tag>             toggle a required tag
  tags <a,b,...>        replace the required tags (empty clears)
  reset                 clear all filters
  page <n> | next | prev
  refresh               re-run the current query
  facets                show available filter values
  info <url>            derive name, description and image from a URL
  submit <json>         submit a tool, e.g. {\"name\":..,\"url\":..,\"description\":..,
                        \"category\":\"CRM\",\"pricing_model\":\"Paid\",\"tags\":[..]}
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Filter(FilterChange),
    Page(usize),
    Next,
    Prev,
    Refresh,
    Facets,
    Info(String),
    Submit(Box<ToolCandidate>),
    Help,
    Quit,
}

/// Parse one line of input. Empty lines yield `None`.
pub fn parse_command(line: &str) -> std::result::Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "search" | "s" => BrowseCommand::Filter(FilterChange::Search(rest.to_string())),
        "category" | "c" => {
            let category: Selection<ToolCategory> = rest.parse().map_err(|e| f!("{e}"))?;
            BrowseCommand::Filter(FilterChange::Category(category))
        }
        "pricing" => {
            let pricing: Selection<PricingModel> = rest.parse().map_err(|e| f!("{e}"))?;
            BrowseCommand::Filter(FilterChange::Pricing(pricing))
        }
        "tag" | "t" => {
            if rest.is_empty() {
                return Err("Usage: tag <tag>".to_string());
            }
            BrowseCommand::Filter(FilterChange::ToggleTag(rest.to_string()))
        }
        "tags" => BrowseCommand::Filter(FilterChange::Tags(parse_tags(rest))),
        "reset" => BrowseCommand::Filter(FilterChange::Reset),
        "page" | "p" => {
            let page = rest
                .parse::<usize>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| f!("Invalid page number: {rest:?}"))?;
            BrowseCommand::Page(page)
        }
        "next" | "n" => BrowseCommand::Next,
        "prev" => BrowseCommand::Prev,
        "refresh" => BrowseCommand::Refresh,
        "facets" => BrowseCommand::Facets,
        "info" => {
            if rest.is_empty() {
                return Err("Please enter a URL first.".to_string());
            }
            BrowseCommand::Info(rest.to_string())
        }
        "submit" => {
            let candidate: ToolCandidate =
                serde_json::from_str(rest).map_err(|e| f!("Invalid submission: {e}"))?;
            BrowseCommand::Submit(Box::new(candidate))
        }
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(f!("Unknown command: {other}. Type 'help' for a list.")),
    };

    Ok(Some(command))
}

pub async fn run(global: crate::Global, service: CatalogService) -> Result<()> {
    let mut controller = Controller::new(service, global.page_size)?;

    if global.verbose {
        eprintln!("Loading catalog...");
    }
    controller.start().await;
    render(controller.state());
    println!("{}", "Type 'help' for commands.".bright_black());

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            break; // EOF
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };

        if global.verbose {
            eprintln!("Command: {command:?}");
        }

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Facets => render_facets(controller.state().facets()),
            BrowseCommand::Info(url) => {
                controller.fetch_info(&url).await;
                render_submission(controller.state().submission());
            }
            BrowseCommand::Submit(candidate) => {
                controller.submit(*candidate).await;
                render_submission(controller.state().submission());
                if matches!(
                    controller.state().submission(),
                    SubmitState::Submitted { .. }
                ) {
                    render(controller.state());
                }
            }
            BrowseCommand::Filter(change) => {
                controller.change_filter(change).await;
                render(controller.state());
            }
            BrowseCommand::Page(page) => {
                controller.go_to_page(page).await;
                render(controller.state());
            }
            BrowseCommand::Next => {
                let page = controller.state().page().saturating_add(1);
                controller.go_to_page(page).await;
                render(controller.state());
            }
            BrowseCommand::Prev => {
                let page = controller.state().page().saturating_sub(1).max(1);
                controller.go_to_page(page).await;
                render(controller.state());
            }
            BrowseCommand::Refresh => {
                controller.refresh().await;
                render(controller.state());
            }
        }
    }

    Ok(())
}

fn describe_filters(filters: &FilterSpec) -> String {
    if filters.is_default() {
        return "no filters".to_string();
    }

    let mut parts = Vec::new();
    if !filters.search.is_empty() {
        parts.push(f!("search={:?}", filters.search));
    }
    if !filters.category.is_all() {
        parts.push(f!("category={}", filters.category));
    }
    if !filters.pricing.is_all() {
        parts.push(f!("pricing={}", filters.pricing));
    }
    if !filters.tags.is_empty() {
        parts.push(f!("tags={}", filters.tags.join("+")));
    }
    parts.join(", ")
}

fn render(state: &ViewState) {
    println!(
        "{} {}",
        "Filters:".bright_white().bold(),
        describe_filters(state.filters())
    );

    match state.load() {
        LoadState::Idle => {}
        LoadState::Loading => println!("{}", "Searching tools...".bright_black()),
        LoadState::Loaded { records, .. } => {
            if let Some(pagination) = state.pagination() {
                println!("{}", format_page(records, &pagination));
            }
        }
        LoadState::Error { message } => println!("{}", message.red()),
    }

    if let FacetState::Failed { message } = state.facets() {
        println!("{}", message.red());
    }
}

fn render_submission(submission: &SubmitState) {
    match submission {
        SubmitState::Submitted { record } => println!(
            "{} {}",
            "Submitted".bright_green().bold(),
            record.name.white().bold()
        ),
        SubmitState::Fetched { info } => println!(
            "{}: {}\n{}: {}\n{}: {}",
            "Name".green(),
            info.name,
            "Description".green(),
            info.description,
            "Image".green(),
            info.image_url
        ),
        SubmitState::Failed { message } => println!("{}", message.red()),
        SubmitState::Idle | SubmitState::Submitting | SubmitState::Fetching => {}
    }
}

fn render_facets(facets: &FacetState) {
    match facets {
        FacetState::Loaded(facets) => {
            let categories: Vec<&str> = facets.categories.iter().map(|c| c.label()).collect();
            let pricing: Vec<&str> = facets.pricing_models.iter().map(|p| p.label()).collect();
            println!("{}: {}", "Categories".green(), categories.join(", "));
            println!("{}: {}", "Pricing".green(), pricing.join(", "));
            println!("{}: {}", "Tags".green(), facets.tags.join(", "));
        }
        FacetState::Failed { message } => println!("{}", message.red()),
        FacetState::Idle | FacetState::Loading => {
            println!("{}", "Filter options are still loading".bright_black())
        }
    }
}
