//! Product catalog wire types and the REST client that fetches them

use std::time::Duration;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Filters, PageState, SortDirection};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A product as served by the catalog backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

/// One page of listing results
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_pages: u32,
    pub current_page: u32,
    pub total_products: u64,
}

/// The outgoing query tuple: applied filters plus the page to fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: String,
    pub category: String,
    pub sort_by: String,
    pub sort_order: SortDirection,
    pub page: u32,
    pub page_size: u32,
}

impl ProductQuery {
    pub fn new(filters: &Filters, page: PageState) -> Self {
        Self {
            search: filters.search_text.clone(),
            category: filters.category.clone(),
            sort_by: filters.sort_field.clone(),
            sort_order: filters.sort_direction,
            page: page.current_page,
            page_size: page.page_size,
        }
    }

    /// URL query pairs. Empty text filters are left out; paging is always sent.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        if !self.sort_by.is_empty() {
            pairs.push(("sortBy", self.sort_by.clone()));
        }
        pairs.push(("sortOrder", self.sort_order.as_str().to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));
        pairs
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid catalog base url '{0}'")]
    InvalidBaseUrl(String),
}

/// Anything that can serve a page of products for a query
pub trait ProductSource: Send + Sync {
    fn fetch_products<'a>(
        &'a self,
        query: &'a ProductQuery,
    ) -> BoxFuture<'a, Result<ProductPage, CatalogError>>;
}

/// REST client for the catalog backend
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|_| CatalogError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    pub async fn get_products(&self, query: &ProductQuery) -> Result<ProductPage, CatalogError> {
        crate::log_api_request!(
            "get_products",
            page = query.page,
            page_size = query.page_size,
            search = %query.search,
            category = %query.category
        );

        let response = self
            .http
            .get(self.products_url())
            .query(&query.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page = response.json::<ProductPage>().await?;
        tracing::debug!(
            products = page.products.len(),
            total_pages = page.total_pages,
            total_products = page.total_products,
            "Catalog page received"
        );
        Ok(page)
    }
}

impl ProductSource for CatalogClient {
    fn fetch_products<'a>(
        &'a self,
        query: &'a ProductQuery,
    ) -> BoxFuture<'a, Result<ProductPage, CatalogError>> {
        Box::pin(self.get_products(query))
    }
}
