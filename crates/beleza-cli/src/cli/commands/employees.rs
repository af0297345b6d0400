//! Employee commands.

use anyhow::Result;
use beleza_core::api::employees;
use beleza_core::http::ApiClient;

pub async fn list(client: &ApiClient, all: bool) -> Result<()> {
    let fetched = employees::list(client).await?;
    let visible = if all {
        fetched
    } else {
        employees::active(&fetched)
    };

    if visible.is_empty() {
        println!("No employees found.");
        return Ok(());
    }

    for employee in employees::sorted_by_rating(&visible) {
        let rating = employee
            .average_rating
            .map_or_else(|| "unrated".to_string(), |r| format!("{r:.1}"));
        let suffix = if employee.active { "" } else { "  [inactive]" };
        println!(
            "{}  {}  {}  {rating}{suffix}",
            employee.id, employee.name, employee.role,
        );
    }
    Ok(())
}
