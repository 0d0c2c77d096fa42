use std::path::Path;
use std::sync::OnceLock;

use log::{info, warn};
use rocket::tokio::fs;

use crate::errors::*;

/// Holds the shared signing secret. Written at most once, at startup, and
/// read lock-free for the rest of the process lifetime.
#[derive(Debug, Default)]
pub struct SecretStore {
    secret: OnceLock<String>,
}

impl SecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret<S: Into<String>>(secret: S) -> Self {
        let store = Self::new();
        let _ = store.secret.set(secret.into());
        store
    }

    /// Read the secret file. A failed read leaves the store empty, so
    /// authenticated routes fail closed while the rest keep serving.
    pub async fn load_from(&self, path: &Path) -> Result<()> {
        let data = fs::read_to_string(path)
            .await
            .chain_err(|| format!("failed to read signing secret from {}", path.display()))?;

        if data.trim().is_empty() {
            warn!("signing secret file {} is empty", path.display());
        }

        self.secret
            .set(data)
            .map_err(|_| Error::from("signing secret already loaded"))?;

        info!(
            "loaded signing secret from {} ({} bytes)",
            path.display(),
            self.current_secret().trim().len()
        );

        Ok(())
    }

    /// The loaded secret, or `""` when nothing was loaded.
    pub fn current_secret(&self) -> &str {
        self.secret.get().map(String::as_str).unwrap_or("")
    }

    pub fn is_loaded(&self) -> bool {
        !self.current_secret().trim().is_empty()
    }
}
