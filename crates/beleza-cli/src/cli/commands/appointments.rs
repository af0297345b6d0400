//! Appointment commands.

use anyhow::{Context, Result};
use beleza_core::api::appointments::{self, Appointment, NewAppointment};
use beleza_core::http::ApiClient;
use chrono::{DateTime, Utc};

pub async fn list(client: &ApiClient, upcoming: bool, employee: Option<&str>) -> Result<()> {
    let mut all = appointments::list(client).await?;

    if let Some(employee) = employee {
        all = appointments::for_employee(&all, employee);
    }
    if upcoming {
        all = appointments::upcoming(&all, Utc::now());
    }

    if all.is_empty() {
        println!("No appointments found.");
        return Ok(());
    }

    for appointment in &all {
        print_line(appointment);
    }
    Ok(())
}

pub async fn book(
    client: &ApiClient,
    employee: &str,
    service: &str,
    at: &str,
    notes: Option<String>,
) -> Result<()> {
    let starts_at = parse_when(at)?;

    let booked = appointments::book(
        client,
        &NewAppointment {
            employee_id: employee.to_string(),
            service_id: service.to_string(),
            starts_at,
            notes,
        },
    )
    .await?;

    println!("Booked appointment {}:", booked.id);
    print_line(&booked);
    Ok(())
}

pub async fn cancel(client: &ApiClient, id: &str) -> Result<()> {
    appointments::cancel(client, id).await?;
    println!("Cancelled appointment {id}.");
    Ok(())
}

fn parse_when(at: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(at)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid start time '{at}', expected RFC 3339"))
}

fn print_line(appointment: &Appointment) {
    println!(
        "{}  {}  employee={} service={} ({:?})",
        appointment.id,
        appointment.starts_at.to_rfc3339(),
        appointment.employee_id,
        appointment.service_id,
        appointment.status,
    );
}
