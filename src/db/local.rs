// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local key-value document store.
//!
//! Each key holds one JSON document. Two backends are provided:
//! - a directory with one `<key>.json` file per key
//! - an in-memory map (tests and ephemeral runs)
//!
//! Plain reads treat a missing or unparsable document as absent; loads for
//! a read-modify-write cycle report the unparsable case as an error. Writes replace the whole document. There
//! is no locking across a read-modify-write cycle, so two writers racing on
//! the same key can lose an update.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Key-value store for JSON documents.
#[derive(Clone)]
pub struct LocalStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Directory(Arc<PathBuf>),
    Memory(Arc<DashMap<String, String>>),
}

impl LocalStore {
    /// Open (and create if needed) a directory-backed store.
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        tracing::info!(path = %dir.display(), "Opened local store");
        Ok(Self {
            backend: Backend::Directory(Arc::new(dir)),
        })
    }

    /// Create an in-memory store. Contents are lost on drop.
    pub fn new_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    fn document_path(dir: &Path, key: &str) -> PathBuf {
        dir.join(format!("{}.json", key))
    }

    /// Read the raw document stored under `key`.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        match &self.backend {
            Backend::Memory(map) => Ok(map.get(key).map(|v| v.value().clone())),
            Backend::Directory(dir) => {
                match tokio::fs::read_to_string(Self::document_path(dir, key)).await {
                    Ok(contents) => Ok(Some(contents)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(AppError::Storage(format!("Failed to read {}: {}", key, e))),
                }
            }
        }
    }

    /// Replace the raw document stored under `key`.
    pub async fn set_raw(&self, key: &str, value: String) -> Result<(), AppError> {
        match &self.backend {
            Backend::Memory(map) => {
                map.insert(key.to_string(), value);
                Ok(())
            }
            Backend::Directory(dir) => tokio::fs::write(Self::document_path(dir, key), value)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", key, e))),
        }
    }

    /// Read and deserialize a document for a read-modify-write cycle.
    ///
    /// Unlike [`read_json`](Self::read_json), a document that exists but
    /// cannot be read or parsed is an error, so callers never write a fresh
    /// document over one they failed to load.
    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("Stored document {} is corrupt: {}", key, e)))
    }

    /// Read and deserialize a document; any failure is logged and reported as absent.
    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load_json(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored document unreadable, ignoring");
                None
            }
        }
    }

    /// Like [`read_json`](Self::read_json), substituting `T::default()` when absent.
    pub async fn read_json_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read_json(key).await.unwrap_or_default()
    }

    /// Serialize and store a document.
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
        self.set_raw(key, raw).await
    }
}
