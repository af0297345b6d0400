//! Core beleza library (HTTP client, session store, domain API wrappers, config).

pub mod api;
pub mod config;
pub mod http;
pub mod session;
