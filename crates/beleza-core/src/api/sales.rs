//! Sales recording and reporting endpoints.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::points::PurchaseKind;
use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub kind: PurchaseKind,
    /// The sold service or product
    pub item_id: String,
    pub employee_id: String,
    pub amount_cents: i64,
    pub sold_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub kind: PurchaseKind,
    pub item_id: String,
    pub employee_id: String,
    pub amount_cents: i64,
}

/// Records a sale.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn record(client: &ApiClient, sale: &NewSale) -> Result<Sale> {
    Ok(client.post("/sales", sale).await?)
}

/// Lists sales within a period (inclusive bounds).
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list_between(
    client: &ApiClient,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Sale>> {
    Ok(client
        .get_with_query(
            "/sales",
            &[("from", from.to_rfc3339()), ("to", to.to_rfc3339())],
        )
        .await?)
}
