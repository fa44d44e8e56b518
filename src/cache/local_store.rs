//! Almacenamiento local clave-valor
//! 
//! Equivalente al almacenamiento persistente del dispositivo: valores string
//! bajo claves string. `FileStore` guarda todo en un único archivo JSON y
//! `MemoryStore` se usa en tests y en el backend simulado.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Operaciones del almacenamiento local
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Leer y deserializar un valor JSON
pub async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get_item(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serializar y guardar un valor JSON
pub async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, raw).await
}

/// Almacenamiento en memoria
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// Almacenamiento en un archivo JSON (`{ "clave": "valor", ... }`)
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializa las escrituras read-modify-write
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn save(&self, items: &HashMap<String, String>) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }

        let raw = serde_json::to_string_pretty(items)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, raw).await.map_err(io_error)?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(io_error)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        let items = self.load().await?;
        debug!("📥 Storage GET {} ({})", key, if items.contains_key(key) { "hit" } else { "miss" });
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        items.insert(key.to_string(), value);
        self.save(&items).await?;
        debug!("💾 Storage SET {}", key);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        if items.remove(key).is_none() {
            warn!("⚠️ Storage REMOVE de clave inexistente: {}", key);
            return Ok(());
        }
        self.save(&items).await?;
        debug!("🗑️ Storage REMOVE {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic_operations() {
        let store = MemoryStore::new();
        assert!(store.get_item("user").await.unwrap().is_none());

        store.set_item("user", "{}".to_string()).await.unwrap();
        assert_eq!(store.get_item("user").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len().await, 1);

        store.remove_item("user").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::new(&path);
        store.set_item("auth_token", "abc".to_string()).await.unwrap();
        store.set_item("user", "{\"id\":1}".to_string()).await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get_item("auth_token").await.unwrap().as_deref(), Some("abc"));

        reopened.remove_item("auth_token").await.unwrap();
        assert!(store.get_item("auth_token").await.unwrap().is_none());
        assert!(store.get_item("user").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert!(store.get_item("user").await.unwrap().is_none());
        store.remove_item("user").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get_item("user").await,
            Err(StorageError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let store = MemoryStore::new();
        write_json(&store, "numbers", &vec![1, 2, 3]).await.unwrap();
        let numbers: Option<Vec<i32>> = read_json(&store, "numbers").await.unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<i32>> = read_json(&store, "missing").await.unwrap();
        assert!(missing.is_none());
    }
}
