//! orders-hex: application service over the `OrderRepository` port plus the
//! axum HTTP adapter that exposes it.
//!
//! Repository outcomes are translated here: an absent order becomes
//! [`errors::AppError::NotFound`] (404), a store failure becomes
//! [`errors::AppError::ServiceUnavailable`] (503).

pub mod config;
pub mod errors;

pub mod application;

pub use orders_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
