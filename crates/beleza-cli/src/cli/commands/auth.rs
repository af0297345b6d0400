//! Sign-in, sign-out, and identity commands.

use anyhow::Result;
use beleza_core::api::auth;
use beleza_core::http::ApiClient;

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    let user = auth::login(client, email, password).await?;
    println!("Signed in as {} <{}>", user.name, user.email);

    if let Some(store) = client.session().await.store_id {
        println!("Store: {store}");
    }
    Ok(())
}

pub async fn logout(client: &ApiClient) -> Result<()> {
    auth::logout(client).await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(client: &ApiClient) -> Result<()> {
    let user = auth::profile(client).await?;
    let role = if user.admin { "admin" } else { "client" };
    println!("{} <{}> ({role})", user.name, user.email);
    Ok(())
}
