//! Avatar storage implementations.

use crate::services::{AvatarStorage, BoxFuture, BoxedError};
use ecobin_config::StorageConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

/// Uploads avatars to an HTTP object-storage endpoint.
///
/// The endpoint is expected to accept a multipart `file` field and answer
/// with `{"url": "..."}` the way the hosted image providers do.
pub struct HttpAvatarStorage {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpAvatarStorage {
    pub fn new(upload_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
        }
    }
}

impl AvatarStorage for HttpAvatarStorage {
    fn store(&self, file_name: &str, bytes: Vec<u8>) -> BoxFuture<'_, String, BoxedError> {
        let file_name = file_name.to_string();
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
            let form = reqwest::multipart::Form::new().part("file", part);

            let response = self
                .client
                .post(&self.upload_url)
                .multipart(form)
                .send()
                .await
                .map_err(|e| BoxedError::from(format!("avatar upload failed: {e}")))?;

            if !response.status().is_success() {
                error!("Avatar upload rejected with status {}", response.status());
                return Err(BoxedError::from(format!(
                    "avatar upload rejected: {}",
                    response.status()
                )));
            }

            let body: serde_json::Value = response
                .json()
                .await
                .map_err(|e| BoxedError::from(format!("avatar upload response: {e}")))?;

            body.get("url")
                .and_then(|u| u.as_str())
                .map(|u| u.to_string())
                .ok_or_else(|| BoxedError::from("avatar upload response missing url".to_string()))
        })
    }
}

/// Writes avatars to a local directory. Intended for development and tests.
pub struct LocalAvatarStorage {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalAvatarStorage {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

impl AvatarStorage for LocalAvatarStorage {
    fn store(&self, file_name: &str, bytes: Vec<u8>) -> BoxFuture<'_, String, BoxedError> {
        // Stored under a random name so uploads cannot collide or traverse paths.
        let ext = std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("png")
            .to_string();
        Box::pin(async move {
            let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), ext);
            let path = self.dir.join(&stored_name);

            write_file(&path, bytes).map_err(|e| {
                BoxedError::from(format!("failed to write avatar {}: {e}", path.display()))
            })?;

            debug!("Stored avatar at {}", path.display());
            Ok(format!(
                "{}/{}",
                self.public_base_url.trim_end_matches('/'),
                stored_name
            ))
        })
    }
}

// Avatar files are a few kilobytes; the synchronous write keeps this crate
// free of a tokio dependency.
fn write_file(path: &std::path::Path, bytes: Vec<u8>) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

/// Build the avatar storage configured for this deployment.
///
/// An HTTP endpoint wins over a local directory when both are configured.
pub fn avatar_storage_from_config(config: &StorageConfig) -> Arc<dyn AvatarStorage> {
    if let Some(url) = &config.upload_url {
        Arc::new(HttpAvatarStorage::new(url.clone()))
    } else {
        let dir = config.local_dir.clone().unwrap_or_else(|| "uploads".to_string());
        let base = config
            .public_base_url
            .clone()
            .unwrap_or_else(|| "/static/avatars".to_string());
        Arc::new(LocalAvatarStorage::new(dir, base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn local_storage_returns_public_url() {
        let dir = std::env::temp_dir().join(format!("ecobin-avatars-{}", uuid::Uuid::new_v4()));
        let storage = LocalAvatarStorage::new(&dir, "http://localhost:8080/static/avatars/");

        let url = storage
            .store("me.png", vec![0x89, 0x50, 0x4e, 0x47])
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:8080/static/avatars/"));
        assert!(url.ends_with(".png"));
        let stored: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(stored.len(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
