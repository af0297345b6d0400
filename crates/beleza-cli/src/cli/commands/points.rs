//! Loyalty points commands.

use anyhow::Result;
use beleza_core::api::points;
use beleza_core::http::ApiClient;

pub async fn balance(client: &ApiClient) -> Result<()> {
    let balance = points::balance(client).await?;
    println!("{} points", balance.balance);
    Ok(())
}

pub async fn history(client: &ApiClient) -> Result<()> {
    let entries = points::history(client).await?;

    if entries.is_empty() {
        println!("No points earned yet.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{}  {:+}  ({:?})",
            entry.earned_at.to_rfc3339(),
            entry.points,
            entry.kind,
        );
    }
    Ok(())
}
