//! Core library for toolshelf
//!
//! This crate implements the **Functional Core** of the toolshelf catalog,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The toolshelf project uses a two-crate architecture:
//!
//! - **`toolshelf_core`** (this crate): catalog types and pure transformations, zero I/O
//! - **`toolshelf`**: the async catalog service, the view controller, the CLI and
//!   the JSON-RPC server (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: the query engine reads a snapshot and returns owned results
//! - **Explicit state**: the catalog store and the view state are plain values owned
//!   by the caller, never globals
//! - **Injected clock**: submission takes `now` as an argument so tests are deterministic
//!
//! # Module Organization
//!
//! - [`catalog`]: tool records, the category/pricing enumerations and the catalog store
//! - [`query`]: filter specification, filtering, paging and facet derivation
//! - [`pagination`]: page window arithmetic and navigation metadata
//! - [`submission`]: validation, id assignment and URL-derived metadata
//! - [`view_state`]: filter/page state and the loading lifecycle of a browsing session
//!
//! # Example Usage
//!
//! ```rust
//! use toolshelf_core::catalog::CatalogStore;
//! use toolshelf_core::query::{query_page, FilterSpec};
//!
//! let store = CatalogStore::seeded();
//! let page = query_page(store.snapshot(), &FilterSpec::default(), 2, 9).unwrap();
//!
//! assert_eq!(page.total_count, 15);
//! assert_eq!(page.total_pages, 2);
//! assert_eq!(page.data.len(), 6);
//! ```

pub mod catalog;
pub mod pagination;
pub mod query;
mod seed;
pub mod submission;
pub mod view_state;
