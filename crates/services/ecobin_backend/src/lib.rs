//! Router assembly for the EcoBin backend.
//!
//! Kept as a library so the integration tests can drive the full HTTP
//! surface without binding a socket.

pub mod app;

pub use app::{build_app, init_schemas};
