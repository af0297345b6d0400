//! Employee rating endpoints.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub employee_id: String,
    /// 1..=5 stars
    pub score: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Rates an employee.
///
/// # Errors
/// Returns an error if the score is out of range or the request fails.
pub async fn rate(
    client: &ApiClient,
    employee_id: &str,
    score: u8,
    comment: Option<&str>,
) -> Result<Rating> {
    if !(1..=5).contains(&score) {
        anyhow::bail!("Rating must be between 1 and 5 stars, got {score}");
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct NewRating<'a> {
        score: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<&'a str>,
    }

    Ok(client
        .post(
            &format!("/employees/{employee_id}/ratings"),
            &NewRating { score, comment },
        )
        .await?)
}

/// Lists an employee's ratings.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list_for_employee(client: &ApiClient, employee_id: &str) -> Result<Vec<Rating>> {
    Ok(client
        .get(&format!("/employees/{employee_id}/ratings"))
        .await?)
}

/// Mean score of a rating list; None when empty.
pub fn average(ratings: &[Rating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let total: u64 = ratings.iter().map(|r| u64::from(r.score)).sum();
    Some(total as f64 / ratings.len() as f64)
}
