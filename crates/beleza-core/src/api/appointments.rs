//! Appointment endpoints and list shaping helpers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

/// Appointment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub employee_id: String,
    pub service_id: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub employee_id: String,
    pub service_id: String,
    pub starts_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Lists the caller's appointments.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list(client: &ApiClient) -> Result<Vec<Appointment>> {
    Ok(client.get("/appointments").await?)
}

/// Books a new appointment.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn book(client: &ApiClient, appointment: &NewAppointment) -> Result<Appointment> {
    Ok(client.post("/appointments", appointment).await?)
}

/// Cancels an appointment.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn cancel(client: &ApiClient, id: &str) -> Result<()> {
    Ok(client.delete(&format!("/appointments/{id}")).await?)
}

/// Moves an appointment to a new start time.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn reschedule(
    client: &ApiClient,
    id: &str,
    starts_at: DateTime<Utc>,
) -> Result<Appointment> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Reschedule {
        starts_at: DateTime<Utc>,
    }

    Ok(client
        .put(&format!("/appointments/{id}"), &Reschedule { starts_at })
        .await?)
}

/// Scheduled appointments starting at or after `now`, soonest first.
pub fn upcoming(appointments: &[Appointment], now: DateTime<Utc>) -> Vec<Appointment> {
    let mut upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled && a.starts_at >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|a| a.starts_at);
    upcoming
}

/// Appointments assigned to one employee, soonest first.
pub fn for_employee(appointments: &[Appointment], employee_id: &str) -> Vec<Appointment> {
    let mut matches: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.employee_id == employee_id)
        .cloned()
        .collect();
    matches.sort_by_key(|a| a.starts_at);
    matches
}
