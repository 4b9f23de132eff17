//! View-state controller
//!
//! Drives a [`ViewState`] against a [`CatalogApi`]: issues a query whenever the
//! filters or the page change, feeds outcomes back in, and loads the facet
//! lists once at startup. Every failure is turned into view state here:
//! query errors into the result list, facet errors into the facet lists, and
//! submission or URL-info errors into the submission form.

use crate::prelude::*;
use toolshelf_core::query::{Facets, QueryResult};
use toolshelf_core::submission::ToolCandidate;
use toolshelf_core::view_state::{FilterChange, QueryTicket, ViewState};

/// Result of running one ticket, ready to be applied
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub seq: u64,
    pub result: std::result::Result<QueryResult, String>,
}

/// Run `ticket` against `api` without touching any view state
pub async fn execute<A: CatalogApi>(api: &A, ticket: &QueryTicket) -> QueryOutcome {
    let result = api
        .get_tools(&ticket.filters, ticket.window)
        .await
        .map_err(|e| {
            log::warn!("query #{} failed: {}", ticket.seq, e);
            e.to_string()
        });

    QueryOutcome {
        seq: ticket.seq,
        result,
    }
}

/// Load the three facet lists together
pub async fn load_facets<A: CatalogApi>(api: &A) -> std::result::Result<Facets, Error> {
    let (categories, pricing_models, tags) = futures::try_join!(
        api.get_categories(),
        api.get_pricing_models(),
        api.get_tags()
    )
    .map_err(|e| Error::FacetLoadFailure(e.detail().to_string()))?;

    Ok(Facets {
        categories,
        pricing_models,
        tags,
    })
}

pub struct Controller<A> {
    api: A,
    state: ViewState,
}

impl<A: CatalogApi> Controller<A> {
    pub fn new(api: A, page_size: usize) -> Result<Self> {
        let state = ViewState::new(page_size).map_err(|e| eyre!("Invalid page size: {}", e))?;
        Ok(Self { api, state })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Load facets, then the first page of the unfiltered catalog
    pub async fn start(&mut self) {
        self.reload_facets().await;
        let ticket = self.state.refresh();
        self.run(ticket).await;
    }

    pub async fn reload_facets(&mut self) {
        self.state.begin_facet_load();
        let outcome = load_facets(&self.api).await.map_err(|e| {
            log::warn!("{e}");
            e.to_string()
        });
        self.state.apply_facets(outcome);
    }

    pub async fn refresh(&mut self) {
        let ticket = self.state.refresh();
        self.run(ticket).await;
    }

    pub async fn change_filter(&mut self, change: FilterChange) {
        let ticket = self.begin(change);
        self.run(ticket).await;
    }

    /// Move to `page`. Page 0 is ignored and the current view is kept.
    pub async fn go_to_page(&mut self, page: usize) {
        match self.state.go_to_page(page) {
            Ok(ticket) => self.run(ticket).await,
            Err(e) => log::warn!("ignoring page change: {e}"),
        }
    }

    /// Submit a tool. On success the filters are cleared and the first page
    /// reloaded; on failure the message lands in the submission form.
    pub async fn submit(&mut self, candidate: ToolCandidate) {
        self.state.begin_submit();
        let outcome = self.api.add_tool(candidate).await.map_err(|e| {
            log::warn!("submission rejected: {e}");
            e.to_string()
        });
        if let Some(ticket) = self.state.apply_submit(outcome) {
            self.run(ticket).await;
        }
    }

    /// Derive name, description and image for the submission form
    pub async fn fetch_info(&mut self, url: &str) {
        self.state.begin_fetch_info();
        let outcome = self
            .api
            .fetch_info_from_url(url)
            .await
            .map_err(|e| e.to_string());
        self.state.apply_fetch_info(outcome);
    }

    /// Apply a filter change and return the ticket without running it
    pub fn begin(&mut self, change: FilterChange) -> QueryTicket {
        self.state.change_filter(change)
    }

    /// Apply an outcome; stale outcomes are dropped
    pub fn apply(&mut self, outcome: QueryOutcome) -> bool {
        let applied = self.state.apply_query(outcome.seq, outcome.result);
        if !applied {
            log::debug!("discarded stale result for query #{}", outcome.seq);
        }
        applied
    }

    async fn run(&mut self, ticket: QueryTicket) {
        let outcome = execute(&self.api, &ticket).await;
        self.apply(outcome);
    }
}
