//! Access-control gate for the EcoBin backend.
//!
//! Token minting/verification, bcrypt password hashing, the session-cookie
//! helpers, and the axum middleware chain (authenticate, then authorize
//! against a role allow-list).

pub mod cookies;
pub mod error;
pub mod middleware;
pub mod passwords;
pub mod tokens;

pub use error::AuthError;
pub use middleware::{require_admin, require_user, require_waste_picker, AuthState, CurrentUser};
