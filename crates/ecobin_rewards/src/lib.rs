//! Reward endpoints: admin catalog management, the public catalog, and the
//! transactional redemption.

pub mod doc;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use routes::routes;
