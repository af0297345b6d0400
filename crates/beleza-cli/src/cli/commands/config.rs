//! Configuration commands.

use anyhow::Result;
use beleza_core::config::{Config, paths};

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let path = paths::config_path();
    Config::init_at(&path)?;
    println!("Created config at {}", path.display());
    Ok(())
}

pub fn set_store(id: &str) -> Result<()> {
    Config::save_store_id(id)?;
    println!("Default store set to {id}.");
    Ok(())
}
