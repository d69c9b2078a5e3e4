//! Bearer-token admission gate for an HTTP gateway.
//!
//! Each request is decided independently by [`gate::AdmissionGate`] from three signals:
//! the `Authorization: Bearer` header, a revocation list, and token validity. Denials
//! are answered with 401 JSON; admitted requests are forwarded upstream untouched.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
mod testing;
