//! orders-types: the Order record shape and the repository port adapters implement.

pub mod domain;
pub mod ports;
