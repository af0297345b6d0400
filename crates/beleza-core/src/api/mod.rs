//! Typed wrappers over the booking platform's REST endpoints.
//!
//! Each module owns its wire types and exposes free functions taking an
//! [`ApiClient`](crate::http::ApiClient). There is no shared logic here
//! beyond the client itself.

pub mod appointments;
pub mod auth;
pub mod commissions;
pub mod employees;
pub mod points;
pub mod products;
pub mod ratings;
pub mod sales;
pub mod services;
