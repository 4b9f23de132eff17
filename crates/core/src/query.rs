//! Filter/query engine
//!
//! Applies a [`FilterSpec`] to a catalog snapshot, slices the result into a
//! page and derives the facet lists used to populate filter controls. All
//! functions here are pure: they read a snapshot and return owned results.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::{PricingModel, ToolCategory, ToolRecord};
use crate::pagination::{self, PageWindow, PaginationError};

/// Literal accepted and emitted for the "no constraint" selection
pub const ALL: &str = "all";

/// Error type for query operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid page window: {0}")]
    InvalidWindow(#[from] PaginationError),
}

/// Either the wildcard `all` or one exact value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        trimmed.parse().map(Selection::Only)
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::All => serializer.serialize_str(ALL),
            Selection::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Search, category, pricing and tag constraints for one query
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub search: String,
    pub category: Selection<ToolCategory>,
    pub pricing: Selection<PricingModel>,
    pub tags: Vec<String>,
}

impl FilterSpec {
    pub fn is_default(&self) -> bool {
        *self == FilterSpec::default()
    }

    /// Add the tag if absent, remove it if present
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    /// Whether `record` satisfies every constraint. Status is not checked here.
    pub fn matches(&self, record: &ToolRecord) -> bool {
        self.matches_search(record)
            && self.category.matches(&record.category)
            && self.pricing.matches(&record.pricing_model)
            && self.matches_tags(record)
    }

    fn matches_search(&self, record: &ToolRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.name.to_lowercase().contains(&needle)
            || record.description.to_lowercase().contains(&needle)
    }

    // AND semantics: every requested tag must be present on the record
    fn matches_tags(&self, record: &ToolRecord) -> bool {
        self.tags.iter().all(|tag| record.tags.contains(tag))
    }
}

/// One page of matching records plus the size of the full match set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: Vec<ToolRecord>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub limit: usize,
}

/// Run `filters` over the approved records of `snapshot` and return the page
/// selected by `window`. Store order is preserved.
pub fn query(snapshot: &[ToolRecord], filters: &FilterSpec, window: PageWindow) -> QueryResult {
    let matching: Vec<&ToolRecord> = snapshot
        .iter()
        .filter(|record| record.is_approved())
        .filter(|record| filters.matches(record))
        .collect();

    let total_count = matching.len();
    let (start, end) = window.bounds(total_count);

    QueryResult {
        data: matching[start..end].iter().map(|r| (*r).clone()).collect(),
        total_count,
        total_pages: pagination::total_pages(total_count, window.limit()),
        page: window.page(),
        limit: window.limit(),
    }
}

/// [`query`] with a raw page/limit pair, rejecting a zero page or limit
pub fn query_page(
    snapshot: &[ToolRecord],
    filters: &FilterSpec,
    page: usize,
    limit: usize,
) -> Result<QueryResult, QueryError> {
    let window = PageWindow::new(page, limit)?;
    Ok(query(snapshot, filters, window))
}

/// Distinct values available for each filter control
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Facets {
    pub categories: Vec<ToolCategory>,
    pub pricing_models: Vec<PricingModel>,
    pub tags: Vec<String>,
}

impl Facets {
    pub fn from_snapshot(snapshot: &[ToolRecord]) -> Self {
        Self {
            categories: distinct_categories(snapshot),
            pricing_models: distinct_pricing_models(snapshot),
            tags: distinct_tags(snapshot),
        }
    }
}

fn approved(snapshot: &[ToolRecord]) -> impl Iterator<Item = &ToolRecord> {
    snapshot.iter().filter(|r| r.is_approved())
}

/// Categories in use by approved records, sorted by label
pub fn distinct_categories(snapshot: &[ToolRecord]) -> Vec<ToolCategory> {
    approved(snapshot)
        .map(|r| (r.category.label(), r.category))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// Pricing models in use by approved records, sorted by label
pub fn distinct_pricing_models(snapshot: &[ToolRecord]) -> Vec<PricingModel> {
    approved(snapshot)
        .map(|r| (r.pricing_model.label(), r.pricing_model))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}

/// Tags in use by approved records, sorted lexicographically
pub fn distinct_tags(snapshot: &[ToolRecord]) -> Vec<String> {
    approved(snapshot)
        .flat_map(|r| r.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
