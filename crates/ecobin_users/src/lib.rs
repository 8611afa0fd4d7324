//! Identity endpoints: registration with avatar upload, cookie-based login
//! and logout, and the current-user lookup.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use routes::routes;
