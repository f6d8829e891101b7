//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::cart::{CartStore, CartSummary};
use super::catalog::Product;
use super::listing::ListingController;
use super::types::{ActiveSection, FilterField, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub listing: Arc<Mutex<ListingController>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub cart: CartStore,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(listing: ListingController, cart: CartStore) -> Self {
        Self {
            listing: Arc::new(Mutex::new(listing)),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            cart,
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Snapshots for rendering
    // ========================================================================

    pub async fn get_listing(&self) -> ListingController {
        self.listing.lock().await.clone()
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_cart_summary(&self) -> CartSummary {
        self.cart.summary().await
    }

    // ========================================================================
    // Sections & search draft
    // ========================================================================

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_draft.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_draft.pop();
    }

    pub async fn clear_search_draft(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_draft.clear();
    }

    pub async fn focus_next_filter(&self) {
        let mut state = self.ui_state.lock().await;
        state.filter_field = state.filter_field.next();
    }

    pub async fn focus_previous_filter(&self) {
        let mut state = self.ui_state.lock().await;
        state.filter_field = state.filter_field.prev();
    }

    pub async fn get_filter_field(&self) -> FilterField {
        self.ui_state.lock().await.filter_field
    }

    // ========================================================================
    // Product selection
    // ========================================================================

    /// Selection goes back to the top whenever a new page of results lands.
    pub async fn reset_product_selection(&self) {
        let mut state = self.ui_state.lock().await;
        state.product_selected = 0;
        state.show_product_detail = false;
    }

    pub async fn product_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.product_selected > 0 {
            state.product_selected -= 1;
        }
    }

    pub async fn product_move_down(&self) {
        let count = self.visible_product_count().await;
        let mut state = self.ui_state.lock().await;
        if state.product_selected < count.saturating_sub(1) {
            state.product_selected += 1;
        }
    }

    async fn visible_product_count(&self) -> usize {
        self.listing
            .lock()
            .await
            .results()
            .map(|r| r.products.len())
            .unwrap_or(0)
    }

    pub async fn get_selected_product(&self) -> Option<Product> {
        let index = self.ui_state.lock().await.product_selected;
        let listing = self.listing.lock().await;
        listing
            .results()
            .and_then(|r| r.products.get(index))
            .cloned()
    }

    pub async fn show_product_detail(&self) {
        if self.get_selected_product().await.is_some() {
            self.ui_state.lock().await.show_product_detail = true;
        }
    }

    pub async fn hide_product_detail(&self) {
        self.ui_state.lock().await.show_product_detail = false;
    }

    pub async fn is_product_detail_open(&self) -> bool {
        self.ui_state.lock().await.show_product_detail
    }

    // ========================================================================
    // Cart overlay
    // ========================================================================

    pub async fn show_cart(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_cart = true;
        state.cart_selected = 0;
    }

    pub async fn hide_cart(&self) {
        self.ui_state.lock().await.show_cart = false;
    }

    pub async fn is_cart_open(&self) -> bool {
        self.ui_state.lock().await.show_cart
    }

    pub async fn cart_move_up(&self) {
        let mut state = self.ui_state.lock().await;
        if state.cart_selected > 0 {
            state.cart_selected -= 1;
        }
    }

    pub async fn cart_move_down(&self) {
        let len = self.cart.len().await;
        let mut state = self.ui_state.lock().await;
        if state.cart_selected < len.saturating_sub(1) {
            state.cart_selected += 1;
        }
    }

    pub async fn get_selected_cart_product_id(&self) -> Option<u64> {
        let index = self.ui_state.lock().await.cart_selected;
        self.cart.product_id_at(index).await
    }

    /// Keep the cart cursor on an existing row after removals.
    pub async fn clamp_cart_selection(&self) {
        let len = self.cart.len().await;
        let mut state = self.ui_state.lock().await;
        state.cart_selected = state.cart_selected.min(len.saturating_sub(1));
    }

    // ========================================================================
    // Errors & help
    // ========================================================================

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{ProductPage, Rating};
    use crate::model::types::Breakpoint;

    fn model_with_products(count: u64) -> AppModel {
        let mut listing = ListingController::new();
        let issued = listing.mount(Breakpoint::Sm);
        let products = (1..=count)
            .map(|id| Product {
                id,
                title: format!("Product {id}"),
                price: 1.0,
                description: String::new(),
                category: String::new(),
                image: String::new(),
                rating: Rating::default(),
            })
            .collect();
        listing.apply_response(
            issued.seq,
            Ok(ProductPage {
                products,
                total_pages: 1,
                current_page: 1,
                total_products: count,
            }),
        );
        AppModel::new(listing, CartStore::new("unused.json"))
    }

    #[tokio::test]
    async fn test_product_selection_is_bounded() {
        let model = model_with_products(2);
        model.product_move_up().await;
        assert_eq!(model.get_ui_state().await.product_selected, 0);

        model.product_move_down().await;
        model.product_move_down().await;
        assert_eq!(model.get_ui_state().await.product_selected, 1);
        assert_eq!(model.get_selected_product().await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_detail_needs_a_selected_product() {
        let model = model_with_products(0);
        model.show_product_detail().await;
        assert!(!model.is_product_detail_open().await);
    }

    #[tokio::test]
    async fn test_cart_selection_follows_removals() {
        let model = model_with_products(3);
        for _ in 0..3 {
            let product = model.get_selected_product().await.unwrap();
            model.cart.add(product).await;
            model.product_move_down().await;
        }
        model.show_cart().await;
        model.cart_move_down().await;
        model.cart_move_down().await;
        assert_eq!(model.get_selected_cart_product_id().await, Some(3));

        model.cart.remove(3).await;
        model.clamp_cart_selection().await;
        assert_eq!(model.get_selected_cart_product_id().await, Some(2));
    }
}
