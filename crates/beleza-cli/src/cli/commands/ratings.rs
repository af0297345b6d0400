//! Employee rating commands.

use anyhow::Result;
use beleza_core::api::ratings;
use beleza_core::http::ApiClient;

pub async fn rate(
    client: &ApiClient,
    employee_id: &str,
    score: u8,
    comment: Option<&str>,
) -> Result<()> {
    let rating = ratings::rate(client, employee_id, score, comment).await?;
    println!("Rated employee {} with {} star(s).", rating.employee_id, rating.score);
    Ok(())
}
