//! Loyalty points endpoints and the earning rule.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

/// What was purchased; services earn double points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseKind {
    Service,
    Product,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalance {
    pub client_id: String,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsEntry {
    pub id: String,
    pub points: i64,
    pub kind: PurchaseKind,
    pub earned_at: DateTime<Utc>,
}

/// Points earned for a purchase: one point per 10 currency units spent,
/// doubled for services. Prices are in cents; fractions truncate.
pub fn earned_points(price_cents: i64, kind: PurchaseKind) -> i64 {
    let base = price_cents / 1_000;
    match kind {
        PurchaseKind::Service => base * 2,
        PurchaseKind::Product => base,
    }
}

/// Fetches the caller's points balance.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn balance(client: &ApiClient) -> Result<PointsBalance> {
    Ok(client.get("/points/balance").await?)
}

/// Fetches the caller's points history, most recent first.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn history(client: &ApiClient) -> Result<Vec<PointsEntry>> {
    Ok(client.get("/points/history").await?)
}
