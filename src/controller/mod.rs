//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives catalog fetches.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `listing`: Filter, paging and resize transitions plus background fetches
//! - `cart`: Cart actions and persistence

mod input;
mod listing;
mod cart;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, CatalogError, ProductSource};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) source: Arc<dyn ProductSource>,
    cell_width_px: u32,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, source: Arc<dyn ProductSource>, cell_width_px: u32) -> Self {
        Self {
            model,
            source,
            cell_width_px,
        }
    }

    pub(crate) fn format_error(error: &CatalogError) -> String {
        match error {
            CatalogError::Status { status: 404, .. } => {
                "Product catalog not found. Check api.base_url.".to_string()
            }
            CatalogError::Status { status: 401 | 403, .. } => {
                "The store refused the request (not authorized).".to_string()
            }
            CatalogError::Status { status: 429, .. } => {
                "Rate limited. Please wait a moment.".to_string()
            }
            CatalogError::Status { status, .. } if *status >= 500 => {
                format!("The store is having trouble (HTTP {}).", status)
            }
            CatalogError::Status { status, body } if body.is_empty() => {
                format!("Request rejected (HTTP {}).", status)
            }
            CatalogError::Status { status, body } => {
                format!("Request rejected (HTTP {}): {}", status, body)
            }
            CatalogError::Http(e) if e.is_timeout() => "The store took too long to answer.".to_string(),
            CatalogError::Http(e) if e.is_connect() => "Could not reach the store.".to_string(),
            CatalogError::Http(e) if e.is_decode() => {
                "The store sent a response we could not read.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}
