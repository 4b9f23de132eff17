//! View-state machine behind the catalog browser
//!
//! Owns the current filters and page window, and the loading lifecycle of
//! the result list and the facet lists. Every transition that needs fresh
//! data hands back a [`QueryTicket`]; the caller runs the query and feeds the
//! outcome back through [`ViewState::apply_query`]. Tickets carry increasing
//! sequence numbers and only the newest one may change the visible state,
//! so a slow response to an old filter can never overwrite a newer result.
//!
//! The submission form has its own [`SubmitState`]: submission and URL-info
//! failures end up there as a message instead of escaping to the caller.

use serde::Serialize;

use crate::catalog::{PricingModel, ToolCategory, ToolRecord};
use crate::pagination::{PageWindow, PaginationError, PaginationInfo};
use crate::query::{Facets, FilterSpec, QueryResult, Selection};
use crate::submission::UrlInfo;

/// Loading lifecycle of the result list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded {
        records: Vec<ToolRecord>,
        total_pages: usize,
        total_count: usize,
    },
    Error {
        message: String,
    },
}

/// Loading lifecycle of the facet lists. Independent of [`LoadState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum FacetState {
    Idle,
    Loading,
    Loaded(Facets),
    Failed { message: String },
}

/// Lifecycle of the submission form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmitState {
    Idle,
    Submitting,
    Fetching,
    Submitted { record: Box<ToolRecord> },
    Fetched { info: UrlInfo },
    Failed { message: String },
}

/// A single edit to the current filters
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Search(String),
    Category(Selection<ToolCategory>),
    Pricing(Selection<PricingModel>),
    Tags(Vec<String>),
    ToggleTag(String),
    Reset,
}

impl FilterChange {
    fn apply(self, filters: &mut FilterSpec) {
        match self {
            FilterChange::Search(search) => filters.search = search,
            FilterChange::Category(category) => filters.category = category,
            FilterChange::Pricing(pricing) => filters.pricing = pricing,
            FilterChange::Tags(tags) => filters.tags = tags,
            FilterChange::ToggleTag(tag) => filters.toggle_tag(&tag),
            FilterChange::Reset => *filters = FilterSpec::default(),
        }
    }
}

/// Everything needed to run one query, tagged with its sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTicket {
    pub seq: u64,
    pub filters: FilterSpec,
    pub window: PageWindow,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    filters: FilterSpec,
    window: PageWindow,
    load: LoadState,
    facets: FacetState,
    submit: SubmitState,
    latest_seq: u64,
}

impl ViewState {
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        Ok(Self {
            filters: FilterSpec::default(),
            window: PageWindow::first(page_size)?,
            load: LoadState::Idle,
            facets: FacetState::Idle,
            submit: SubmitState::Idle,
            latest_seq: 0,
        })
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn page(&self) -> usize {
        self.window.page()
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn facets(&self) -> &FacetState {
        &self.facets
    }

    pub fn submission(&self) -> &SubmitState {
        &self.submit
    }

    /// Whether a submission or a URL lookup is in flight
    pub fn is_submitting(&self) -> bool {
        matches!(self.submit, SubmitState::Submitting | SubmitState::Fetching)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    /// Records currently on screen; empty unless loaded
    pub fn records(&self) -> &[ToolRecord] {
        match &self.load {
            LoadState::Loaded { records, .. } => records,
            _ => &[],
        }
    }

    /// Navigation metadata for the loaded page
    pub fn pagination(&self) -> Option<PaginationInfo> {
        match &self.load {
            LoadState::Loaded { total_count, .. } => {
                Some(PaginationInfo::new(self.window, *total_count))
            }
            _ => None,
        }
    }

    /// Re-run the current query without changing filters or page
    pub fn refresh(&mut self) -> QueryTicket {
        self.issue()
    }

    /// Apply a filter edit. Always returns to page 1.
    pub fn change_filter(&mut self, change: FilterChange) -> QueryTicket {
        change.apply(&mut self.filters);
        self.window = self.first_page();
        self.issue()
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<QueryTicket, PaginationError> {
        self.window = self.window.with_page(page)?;
        Ok(self.issue())
    }

    /// A tool was added: clear all filters and show the first page
    pub fn tool_submitted(&mut self) -> QueryTicket {
        self.filters = FilterSpec::default();
        self.window = self.first_page();
        self.issue()
    }

    /// Feed back the outcome of a ticket.
    ///
    /// Returns `false` and leaves the state alone when `seq` is not the most
    /// recently issued ticket.
    pub fn apply_query(&mut self, seq: u64, outcome: Result<QueryResult, String>) -> bool {
        if seq != self.latest_seq || !self.is_loading() {
            return false;
        }

        self.load = match outcome {
            Ok(result) => LoadState::Loaded {
                records: result.data,
                total_pages: result.total_pages,
                total_count: result.total_count,
            },
            Err(message) => LoadState::Error { message },
        };
        true
    }

    pub fn begin_submit(&mut self) {
        self.submit = SubmitState::Submitting;
    }

    /// Record the outcome of a submission. A successful one clears the
    /// filters and returns the ticket for the first page; a failure keeps the
    /// current view untouched.
    pub fn apply_submit(&mut self, outcome: Result<ToolRecord, String>) -> Option<QueryTicket> {
        match outcome {
            Ok(record) => {
                self.submit = SubmitState::Submitted {
                    record: Box::new(record),
                };
                Some(self.tool_submitted())
            }
            Err(message) => {
                self.submit = SubmitState::Failed { message };
                None
            }
        }
    }

    pub fn begin_fetch_info(&mut self) {
        self.submit = SubmitState::Fetching;
    }

    pub fn apply_fetch_info(&mut self, outcome: Result<UrlInfo, String>) {
        self.submit = match outcome {
            Ok(info) => SubmitState::Fetched { info },
            Err(message) => SubmitState::Failed { message },
        };
    }

    pub fn begin_facet_load(&mut self) {
        self.facets = FacetState::Loading;
    }

    pub fn apply_facets(&mut self, outcome: Result<Facets, String>) {
        self.facets = match outcome {
            Ok(facets) => FacetState::Loaded(facets),
            Err(message) => FacetState::Failed { message },
        };
    }

    fn first_page(&self) -> PageWindow {
        // with_page(1) cannot fail: the limit was validated on construction
        self.window.with_page(1).unwrap_or(self.window)
    }

    fn issue(&mut self) -> QueryTicket {
        self.latest_seq += 1;
        self.load = LoadState::Loading;
        QueryTicket {
            seq: self.latest_seq,
            filters: self.filters.clone(),
            window: self.window,
        }
    }
}
