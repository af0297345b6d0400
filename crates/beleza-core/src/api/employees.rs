//! Employee endpoints and list shaping helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Average rating across reviews, absent until first rated
    #[serde(default)]
    pub average_rating: Option<f64>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
}

/// Lists the store's employees.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list(client: &ApiClient) -> Result<Vec<Employee>> {
    Ok(client.get("/employees").await?)
}

/// Registers a new employee.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn create(client: &ApiClient, employee: &NewEmployee) -> Result<Employee> {
    Ok(client.post("/employees", employee).await?)
}

/// Updates an employee's name/role.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn update(client: &ApiClient, id: &str, employee: &NewEmployee) -> Result<Employee> {
    Ok(client.put(&format!("/employees/{id}"), employee).await?)
}

/// Deactivates an employee (kept for history, hidden from booking).
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn deactivate(client: &ApiClient, id: &str) -> Result<Employee> {
    Ok(client
        .put(&format!("/employees/{id}/deactivate"), &serde_json::json!({}))
        .await?)
}

/// Employees currently accepting bookings.
pub fn active(employees: &[Employee]) -> Vec<Employee> {
    employees.iter().filter(|e| e.active).cloned().collect()
}

/// Employees best-rated first; unrated sink to the end, names break ties.
pub fn sorted_by_rating(employees: &[Employee]) -> Vec<Employee> {
    let mut sorted = employees.to_vec();
    sorted.sort_by(|a, b| {
        let ra = a.average_rating.unwrap_or(f64::NEG_INFINITY);
        let rb = b.average_rating.unwrap_or(f64::NEG_INFINITY);
        rb.total_cmp(&ra).then_with(|| a.name.cmp(&b.name))
    });
    sorted
}
