//! Service catalog endpoints.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Price in cents
    pub price_cents: i64,
    /// Duration in minutes
    pub duration_min: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub price_cents: i64,
    pub duration_min: u32,
}

/// Lists the store's services.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list(client: &ApiClient) -> Result<Vec<Service>> {
    Ok(client.get("/services").await?)
}

/// Adds a service to the catalog.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn create(client: &ApiClient, service: &NewService) -> Result<Service> {
    Ok(client.post("/services", service).await?)
}

/// Updates a catalog service.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn update(client: &ApiClient, id: &str, service: &NewService) -> Result<Service> {
    Ok(client.put(&format!("/services/{id}"), service).await?)
}

/// Removes a service from the catalog.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    Ok(client.delete(&format!("/services/{id}")).await?)
}
