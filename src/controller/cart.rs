//! Cart actions; every change is written through to disk

use super::AppController;

impl AppController {
    pub async fn add_selected_to_cart(&self) {
        let model = self.model.lock().await;
        if let Some(product) = model.get_selected_product().await {
            tracing::info!(product_id = product.id, title = %product.title, "Adding to cart");
            model.cart.add(product).await;
            drop(model);
            self.save_cart().await;
        }
    }

    pub async fn increment_selected_cart_item(&self) {
        let model = self.model.lock().await;
        if let Some(id) = model.get_selected_cart_product_id().await {
            model.cart.increment(id).await;
            drop(model);
            self.save_cart().await;
        }
    }

    pub async fn decrement_selected_cart_item(&self) {
        let model = self.model.lock().await;
        if let Some(id) = model.get_selected_cart_product_id().await {
            model.cart.decrement(id).await;
            model.clamp_cart_selection().await;
            drop(model);
            self.save_cart().await;
        }
    }

    pub async fn remove_selected_cart_item(&self) {
        let model = self.model.lock().await;
        if let Some(id) = model.get_selected_cart_product_id().await {
            tracing::info!(product_id = id, "Removing from cart");
            model.cart.remove(id).await;
            model.clamp_cart_selection().await;
            drop(model);
            self.save_cart().await;
        }
    }

    pub async fn clear_cart(&self) {
        let model = self.model.lock().await;
        model.cart.clear().await;
        model.clamp_cart_selection().await;
        drop(model);
        self.save_cart().await;
    }

    async fn save_cart(&self) {
        let model = self.model.lock().await;
        if let Err(e) = model.cart.save_to_disk().await {
            tracing::error!(error = %e, path = %model.cart.path().display(), "Failed to save cart");
            model.set_error(format!("Could not save cart: {}", e)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::controller::test_support::{FakeSource, controller};
    use crate::model::CartStore;

    #[tokio::test]
    async fn test_cart_actions_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        let source = Arc::new(FakeSource::new(2));
        let controller = controller(source, CartStore::new(&path));
        controller.mount(80).await.await.unwrap();

        controller.add_selected_to_cart().await;
        controller.add_selected_to_cart().await;
        {
            let model = controller.model.lock().await;
            model.show_cart().await;
        }
        controller.decrement_selected_cart_item().await;

        let reloaded = CartStore::new(&path);
        reloaded.load_from_disk().await.unwrap();
        let summary = reloaded.summary().await;
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.items[0].product.id, 101);

        controller.remove_selected_cart_item().await;
        let reloaded = CartStore::new(&path);
        reloaded.load_from_disk().await.unwrap();
        assert_eq!(reloaded.len().await, 0);
    }

    #[tokio::test]
    async fn test_unwritable_cart_surfaces_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail
        let path = dir.path().join("cart.json");
        std::fs::create_dir_all(&path).unwrap();

        let controller = controller(Arc::new(FakeSource::new(1)), CartStore::new(&path));
        controller.mount(80).await.await.unwrap();
        controller.add_selected_to_cart().await;

        let model = controller.model.lock().await;
        assert!(model.has_error().await);
    }
}
