//! Local shopping cart, persisted as JSON between runs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::catalog::Product;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Cart contents as handed to the view
#[derive(Clone, Debug, Default)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub total_price: f64,
}

#[derive(Clone)]
pub struct CartStore {
    items: Arc<RwLock<Vec<CartItem>>>,
    path: PathBuf,
}

impl CartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_from_disk(&self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let items: Vec<CartItem> = serde_json::from_str(&content)?;
            tracing::debug!(items = items.len(), path = %self.path.display(), "Cart loaded");
            *self.items.write().await = items;
        }
        Ok(())
    }

    pub async fn save_to_disk(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let items = self.items.read().await;
        let content = serde_json::to_string_pretty(&*items)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Add one unit of `product`; an item already in the cart just grows.
    pub async fn add(&self, product: Product) {
        let mut items = self.items.write().await;
        if let Some(existing) = items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    /// A quantity of zero removes the item.
    pub async fn set_quantity(&self, product_id: u64, quantity: u32) {
        let mut items = self.items.write().await;
        if quantity == 0 {
            items.retain(|i| i.product.id != product_id);
        } else if let Some(item) = items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    pub async fn increment(&self, product_id: u64) {
        let quantity = self.quantity_of(product_id).await;
        if quantity > 0 {
            self.set_quantity(product_id, quantity.saturating_add(1)).await;
        }
    }

    pub async fn decrement(&self, product_id: u64) {
        let quantity = self.quantity_of(product_id).await;
        self.set_quantity(product_id, quantity.saturating_sub(1)).await;
    }

    pub async fn remove(&self, product_id: u64) {
        self.set_quantity(product_id, 0).await;
    }

    pub async fn clear(&self) {
        self.items.write().await.clear();
    }

    pub async fn quantity_of(&self, product_id: u64) -> u32 {
        self.items
            .read()
            .await
            .iter()
            .find(|i| i.product.id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    pub async fn product_id_at(&self, index: usize) -> Option<u64> {
        self.items.read().await.get(index).map(|i| i.product.id)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn summary(&self) -> CartSummary {
        let items = self.items.read().await.clone();
        let item_count = items.iter().map(|i| i.quantity).sum();
        let total_price = items.iter().map(CartItem::subtotal).sum();
        CartSummary {
            items,
            item_count,
            total_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Rating;
    use pretty_assertions::assert_eq;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id,
            title: format!("Item {id}"),
            price,
            description: String::new(),
            category: "book".to_string(),
            image: String::new(),
            rating: Rating { rate: 4.0, count: 3 },
        }
    }

    #[tokio::test]
    async fn test_adding_twice_increments_quantity() {
        let cart = CartStore::new("unused.json");
        cart.add(product(1, 10.0)).await;
        cart.add(product(1, 10.0)).await;
        cart.add(product(2, 2.5)).await;

        let summary = cart.summary().await;
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total_price, 22.5);
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_item() {
        let cart = CartStore::new("unused.json");
        cart.add(product(1, 10.0)).await;
        cart.set_quantity(1, 4).await;
        assert_eq!(cart.quantity_of(1).await, 4);

        cart.decrement(1).await;
        assert_eq!(cart.quantity_of(1).await, 3);

        cart.set_quantity(1, 0).await;
        assert_eq!(cart.len().await, 0);
    }

    #[tokio::test]
    async fn test_increment_ignores_missing_items() {
        let cart = CartStore::new("unused.json");
        cart.increment(42).await;
        assert_eq!(cart.len().await, 0);
    }

    #[tokio::test]
    async fn test_cart_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.json");

        let cart = CartStore::new(&path);
        cart.add(product(3, 1.25)).await;
        cart.add(product(3, 1.25)).await;
        cart.save_to_disk().await.unwrap();

        let reloaded = CartStore::new(&path);
        reloaded.load_from_disk().await.unwrap();
        let summary = reloaded.summary().await;
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.items[0].product.title, "Item 3");
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let cart = CartStore::new(dir.path().join("absent.json"));
        cart.load_from_disk().await.unwrap();
        assert_eq!(cart.len().await, 0);
    }
}
