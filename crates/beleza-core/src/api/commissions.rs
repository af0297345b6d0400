//! Commission endpoints.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionEntry {
    pub id: String,
    pub employee_id: String,
    pub sale_id: String,
    pub amount_cents: i64,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRate {
    pub employee_id: String,
    /// Percentage of the sale amount, 0..=100
    pub rate_percent: u8,
}

/// Lists an employee's commission entries.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list_for_employee(
    client: &ApiClient,
    employee_id: &str,
) -> Result<Vec<CommissionEntry>> {
    Ok(client
        .get(&format!("/commissions/{employee_id}"))
        .await?)
}

/// Sets an employee's commission rate.
///
/// # Errors
/// Returns an error if the rate is out of range or the request fails.
pub async fn set_rate(
    client: &ApiClient,
    employee_id: &str,
    rate_percent: u8,
) -> Result<CommissionRate> {
    if rate_percent > 100 {
        anyhow::bail!("Commission rate must be between 0 and 100, got {rate_percent}");
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct SetRate {
        rate_percent: u8,
    }

    Ok(client
        .put(
            &format!("/commissions/{employee_id}/rate"),
            &SetRate { rate_percent },
        )
        .await?)
}
