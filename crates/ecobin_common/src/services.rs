//! Service abstractions for external collaborators.
//!
//! The object-storage provider that keeps avatar images is modeled as a
//! trait so the identity handlers stay decoupled from any specific vendor
//! and tests can swap in an in-memory implementation.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for
/// Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl From<String> for BoxedError {
    fn from(message: String) -> Self {
        BoxedError(message.into())
    }
}

/// A trait for avatar image storage.
///
/// Registration uploads the avatar through this trait and persists only the
/// resulting public URL.
pub trait AvatarStorage: Send + Sync {
    /// Store the image bytes and return the public URL they are served from.
    fn store(&self, file_name: &str, bytes: Vec<u8>) -> BoxFuture<'_, String, BoxedError>;
}
