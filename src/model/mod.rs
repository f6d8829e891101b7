//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (filters, breakpoints, UI state, etc.)
//! - `pagination`: Page-strip computation
//! - `listing`: Listing controller (filters, paging, latest-query tracking)
//! - `catalog`: Catalog wire types and REST client
//! - `cart`: Local cart store
//! - `app_model`: Main application model with state management methods

mod types;
mod pagination;
mod listing;
mod catalog;
mod cart;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, Breakpoint, FilterField, SortDirection, UiState,
    CATEGORY_OPTIONS, SORT_FIELD_OPTIONS, cycle_option,
};

pub use pagination::{PageRangeItem, DEFAULT_SIBLING_COUNT, page_range};

pub use listing::{IssuedQuery, ListingController, ListingStatus};

pub use catalog::{
    CatalogClient, CatalogError, Product, ProductPage, ProductQuery, ProductSource, Rating,
};

pub use cart::{CartStore, CartSummary};

pub use app_model::AppModel;
