//! Service catalog commands.

use anyhow::Result;
use beleza_core::api::services;
use beleza_core::http::ApiClient;

pub async fn list(client: &ApiClient) -> Result<()> {
    let services = services::list(client).await?;

    if services.is_empty() {
        println!("No services found.");
        return Ok(());
    }

    for service in &services {
        println!(
            "{}  {}  {}  {} min",
            service.id,
            service.name,
            format_price(service.price_cents),
            service.duration_min,
        );
    }
    Ok(())
}

fn format_price(cents: i64) -> String {
    format!("R${}.{:02}", cents / 100, (cents % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: cents render as currency with two decimal places.
    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12_000), "R$120.00");
        assert_eq!(format_price(4_905), "R$49.05");
        assert_eq!(format_price(99), "R$0.99");
    }
}
