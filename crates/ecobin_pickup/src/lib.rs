//! Pickup dispatch endpoints: nearby full bins for waste pickers, and the
//! conflict-guarded pickup request.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use routes::routes;
