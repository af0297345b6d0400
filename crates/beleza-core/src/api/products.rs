//! Product catalog endpoints.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in cents
    pub price_cents: i64,
    #[serde(default)]
    pub stock: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub stock: u32,
}

/// Lists the store's products.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list(client: &ApiClient) -> Result<Vec<Product>> {
    Ok(client.get("/products").await?)
}

/// Adds a product to the catalog.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn create(client: &ApiClient, product: &NewProduct) -> Result<Product> {
    Ok(client.post("/products", product).await?)
}

/// Updates a catalog product.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn update(client: &ApiClient, id: &str, product: &NewProduct) -> Result<Product> {
    Ok(client.put(&format!("/products/{id}"), product).await?)
}

/// Removes a product from the catalog.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    Ok(client.delete(&format!("/products/{id}")).await?)
}
