//! Listing transitions (search, filters, paging, resize) and background fetches

use tokio::task::JoinHandle;

use crate::model::{
    Breakpoint, FilterField, IssuedQuery, ListingController, CATEGORY_OPTIONS,
    SORT_FIELD_OPTIONS, cycle_option,
};
use super::AppController;

impl AppController {
    /// Run a listing transition and fetch whatever query it issues.
    async fn transition<F>(&self, f: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(&mut ListingController) -> Option<IssuedQuery>,
    {
        let issued = {
            let model = self.model.lock().await;
            let mut listing = model.listing.lock().await;
            f(&mut *listing)
        };
        issued.map(|issued| self.dispatch(issued))
    }

    /// Fetch `issued` in the background. The response only reaches the
    /// screen if no newer query was issued in the meantime.
    pub fn dispatch(&self, issued: IssuedQuery) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_and_apply(issued).await;
        })
    }

    async fn fetch_and_apply(&self, issued: IssuedQuery) {
        let IssuedQuery { seq, query } = issued;
        tracing::debug!(seq, page = query.page, "Dispatching listing fetch");

        let result = self.source.fetch_products(&query).await;
        crate::log_api_result!("get_products", result);
        let outcome = result.map_err(|e| Self::format_error(&e));

        let model = self.model.lock().await;
        let applied = model.listing.lock().await.apply_response(seq, outcome);
        if applied {
            model.reset_product_selection().await;
        }
    }

    /// First layout pass: measure, size the page and load page 1.
    pub async fn mount(&self, columns: u16) -> JoinHandle<()> {
        let breakpoint = Breakpoint::from_columns(columns, self.cell_width_px);
        tracing::info!(columns, breakpoint = breakpoint.label(), "Mounting listing");
        let issued = {
            let model = self.model.lock().await;
            let mut listing = model.listing.lock().await;
            listing.mount(breakpoint)
        };
        self.dispatch(issued)
    }

    pub async fn handle_resize(&self, columns: u16) -> Option<JoinHandle<()>> {
        let breakpoint = Breakpoint::from_columns(columns, self.cell_width_px);
        self.transition(|listing| listing.set_breakpoint(breakpoint)).await
    }

    /// Apply the search draft as typed.
    pub async fn submit_search(&self) -> Option<JoinHandle<()>> {
        let draft = self.model.lock().await.get_ui_state().await.search_draft;
        tracing::debug!(query = %draft, "Submitting search");
        self.transition(|listing| Some(listing.submit_search(&draft))).await
    }

    pub async fn clear_search(&self) -> Option<JoinHandle<()>> {
        self.model.lock().await.clear_search_draft().await;
        self.transition(|listing| Some(listing.clear_search())).await
    }

    /// Step the focused filter control to its next (or previous) value and apply it.
    pub async fn cycle_filter_value(&self, forward: bool) -> Option<JoinHandle<()>> {
        let field = self.model.lock().await.get_filter_field().await;
        self.transition(|listing| {
            let filters = listing.filters().clone();
            let issued = match field {
                FilterField::Category => listing.change_category(cycle_option(
                    &CATEGORY_OPTIONS,
                    &filters.category,
                    forward,
                )),
                FilterField::SortBy => listing.change_sort_by(cycle_option(
                    &SORT_FIELD_OPTIONS,
                    &filters.sort_field,
                    forward,
                )),
                FilterField::SortOrder => {
                    listing.change_sort_order(filters.sort_direction.toggled())
                }
            };
            Some(issued)
        })
        .await
    }

    pub async fn go_to_page(&self, page: u32) -> Option<JoinHandle<()>> {
        self.transition(|listing| listing.go_to_page(page)).await
    }

    pub async fn next_page(&self) -> Option<JoinHandle<()>> {
        self.transition(ListingController::next_page).await
    }

    pub async fn previous_page(&self) -> Option<JoinHandle<()>> {
        self.transition(ListingController::previous_page).await
    }

    pub async fn first_page(&self) -> Option<JoinHandle<()>> {
        self.go_to_page(1).await
    }

    pub async fn last_page(&self) -> Option<JoinHandle<()>> {
        self.transition(ListingController::last_page).await
    }

    /// Re-issue the last query unchanged.
    pub async fn retry(&self) -> Option<JoinHandle<()>> {
        self.transition(ListingController::retry).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::controller::test_support::{FakeSource, controller};
    use crate::model::{CartStore, ListingStatus, SortDirection};

    async fn shown_ids(controller: &crate::controller::AppController) -> Vec<u64> {
        let model = controller.model.lock().await;
        let listing = model.get_listing().await;
        listing
            .results()
            .map(|r| r.products.iter().map(|p| p.id).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_mount_loads_first_page_sized_by_terminal() {
        let source = Arc::new(FakeSource::new(5));
        let controller = controller(source.clone(), CartStore::new("unused.json"));

        // 128 columns * 8px = 1024px -> lg
        controller.mount(128).await.await.unwrap();

        let seen = source.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].page, 1);
        assert_eq!(seen[0].page_size, 16);
        assert_eq!(shown_ids(&controller).await, vec![101, 102]);
    }

    #[tokio::test]
    async fn test_slow_older_page_never_replaces_newer_page() {
        let source = Arc::new(FakeSource::new(10));
        let controller = controller(source.clone(), CartStore::new("unused.json"));
        controller.mount(128).await.await.unwrap();

        let page_two_gate = source.gate(2);
        let page_two = controller.go_to_page(2).await.unwrap();
        let page_three = controller.go_to_page(3).await.unwrap();

        page_three.await.unwrap();
        assert_eq!(shown_ids(&controller).await, vec![301, 302]);

        // Page 2 finally answers; it must be dropped
        page_two_gate.notify_one();
        page_two.await.unwrap();
        assert_eq!(shown_ids(&controller).await, vec![301, 302]);

        let model = controller.model.lock().await;
        let listing = model.get_listing().await;
        assert_eq!(listing.page().current_page, 3);
        assert_eq!(listing.status(), &ListingStatus::Ready);
    }

    #[tokio::test]
    async fn test_category_change_on_page_three_fetches_page_one() {
        let source = Arc::new(FakeSource::new(10));
        let controller = controller(source.clone(), CartStore::new("unused.json"));
        controller.mount(128).await.await.unwrap();
        controller.go_to_page(3).await.unwrap().await.unwrap();

        controller.cycle_filter_value(true).await.unwrap().await.unwrap();

        let last = source.seen().pop().unwrap();
        assert_eq!(last.category, "electronics");
        assert_eq!(last.page, 1);
    }

    #[tokio::test]
    async fn test_shrinking_terminal_resets_to_first_page() {
        let source = Arc::new(FakeSource::new(10));
        let controller = controller(source.clone(), CartStore::new("unused.json"));
        controller.mount(128).await.await.unwrap();
        controller.go_to_page(4).await.unwrap().await.unwrap();

        // Same bucket: nothing happens
        assert!(controller.handle_resize(130).await.is_none());

        // 90 columns * 8px = 720px -> sm
        controller.handle_resize(90).await.unwrap().await.unwrap();
        let last = source.seen().pop().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.page_size, 8);
    }

    #[tokio::test]
    async fn test_failure_then_retry_uses_the_same_query() {
        let source = Arc::new(FakeSource::new(10));
        let controller = controller(source.clone(), CartStore::new("unused.json"));
        controller.mount(128).await.await.unwrap();

        source.fail_with(2, 503);
        controller.go_to_page(2).await.unwrap().await.unwrap();
        {
            let model = controller.model.lock().await;
            let listing = model.get_listing().await;
            assert!(matches!(listing.status(), ListingStatus::Failed(_)));
        }

        source.heal(2);
        controller.retry().await.unwrap().await.unwrap();

        let seen = source.seen();
        let n = seen.len();
        assert_eq!(seen[n - 1], seen[n - 2]);
        assert_eq!(shown_ids(&controller).await, vec![201, 202]);
    }

    #[tokio::test]
    async fn test_search_draft_is_submitted_and_cleared() {
        let source = Arc::new(FakeSource::new(3));
        let controller = controller(source.clone(), CartStore::new("unused.json"));
        controller.mount(80).await.await.unwrap();

        {
            let model = controller.model.lock().await;
            for c in "bag".chars() {
                model.append_to_search(c).await;
            }
        }
        controller.submit_search().await.unwrap().await.unwrap();
        assert_eq!(source.seen().pop().unwrap().search, "bag");

        controller.clear_search().await.unwrap().await.unwrap();
        assert_eq!(source.seen().pop().unwrap().search, "");
        let model = controller.model.lock().await;
        assert!(model.get_ui_state().await.search_draft.is_empty());
    }

    #[tokio::test]
    async fn test_sort_order_toggles() {
        let source = Arc::new(FakeSource::new(3));
        let controller = controller(source.clone(), CartStore::new("unused.json"));
        controller.mount(80).await.await.unwrap();
        {
            let model = controller.model.lock().await;
            model.focus_previous_filter().await;
        }
        controller.cycle_filter_value(true).await.unwrap().await.unwrap();
        assert_eq!(source.seen().pop().unwrap().sort_order, SortDirection::Desc);
    }
}
