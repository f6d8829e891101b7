//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (price formatting, scrollable lists)
//! - `layout`: Filter bar and status bar
//! - `content`: Product list and its loading, empty and failed states
//! - `pagination`: Page strip under the product list
//! - `overlays`: Modal overlays (error, help, product detail, cart)

mod utils;
mod layout;
mod content;
mod pagination;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::config::DisplayConfig;
use crate::model::{CartSummary, ListingController, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        listing: &ListingController,
        ui_state: &UiState,
        cart: &CartSummary,
        display: &DisplayConfig,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search + filters
                Constraint::Min(0),    // Product list + page strip
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        layout::render_filter_bar(frame, chunks[0], listing, ui_state);
        content::render_main_content(frame, chunks[1], listing, ui_state, display);
        layout::render_status_bar(frame, chunks[2], listing, cart, display.currency());

        // Product detail overlay (if open)
        if ui_state.show_product_detail {
            let selected = listing
                .results()
                .and_then(|r| r.products.get(ui_state.product_selected));
            if let Some(product) = selected {
                let in_cart = cart
                    .items
                    .iter()
                    .find(|item| item.product.id == product.id)
                    .map_or(0, |item| item.quantity);
                overlays::render_product_detail(frame, product, in_cart, display.currency());
            }
        }

        // Cart overlay (if open)
        if ui_state.show_cart {
            overlays::render_cart(frame, ui_state, cart, display.currency());
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Error notification goes on top of everything else
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }
    }
}
