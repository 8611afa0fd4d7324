//! Bin endpoints: the owned-bin lookup and the hardware telemetry push.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use routes::routes;
