//! Shared surface of the EcoBin backend.
//!
//! This crate holds what every feature crate needs: the domain models, the
//! error taxonomy and response envelope, logging initialization, and the
//! abstraction over external avatar storage.

pub mod error;
pub mod logging;
pub mod models;
pub mod response;
pub mod services;
pub mod storage;

pub use error::ApiError;
pub use response::ApiResponse;
