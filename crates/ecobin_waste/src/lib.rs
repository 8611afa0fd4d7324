//! Waste ledger endpoints: deposit logging with coin credit, per-category
//! analytics, and paginated history.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use routes::routes;
