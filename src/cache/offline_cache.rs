//! Cache offline con expiración sobre el almacenamiento local

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::cache_config::{CacheConfig, OFFLINE_PREFIX};
use super::local_store::{read_json, write_json, KeyValueStore};

/// Entrada del cache offline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineEntry {
    pub data: serde_json::Value,
    /// Momento del guardado en milisegundos Unix
    pub timestamp: i64,
}

/// Cache offline con expiración (24 horas por defecto).
///
/// Los fallos de almacenamiento se registran y se tratan como "sin datos".
#[derive(Clone)]
pub struct OfflineCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl OfflineCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &CacheConfig) -> Self {
        Self::new(store, Duration::hours(config.offline_ttl_hours))
    }

    fn key(key: &str) -> String {
        format!("{}{}", OFFLINE_PREFIX, key)
    }

    pub async fn save<T: Serialize>(&self, key: &str, data: &T) {
        self.save_at(key, data, Utc::now()).await
    }

    pub async fn save_at<T: Serialize>(&self, key: &str, data: &T, now: DateTime<Utc>) {
        let data = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                error!("❌ Error serializando datos offline para {}: {}", key, e);
                return;
            }
        };
        let entry = OfflineEntry {
            data,
            timestamp: now.timestamp_millis(),
        };
        if let Err(e) = write_json(self.store.as_ref(), &Self::key(key), &entry).await {
            error!("❌ Error guardando datos offline para {}: {}", key, e);
        } else {
            debug!("💾 Datos offline guardados para {}", key);
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now()).await
    }

    pub async fn get_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        let entry: OfflineEntry = match read_json(self.store.as_ref(), &Self::key(key)).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!("❌ Cache offline MISS para {}", key);
                return None;
            }
            Err(e) => {
                error!("❌ Error leyendo datos offline para {}: {}", key, e);
                return None;
            }
        };

        let age_ms = now.timestamp_millis() - entry.timestamp;
        if age_ms >= self.ttl.num_milliseconds() {
            debug!("⏰ Cache offline EXPIRADO para {}", key);
            return None;
        }

        match serde_json::from_value(entry.data) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("⚠️ Datos offline con formato inesperado para {}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::local_store::MemoryStore;

    fn cache() -> (Arc<MemoryStore>, OfflineCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = OfflineCache::new(store.clone(), Duration::hours(24));
        (store, cache)
    }

    #[tokio::test]
    async fn test_entries_are_prefixed() {
        let (store, cache) = cache();
        cache.save("routes", &vec![1, 2]).await;
        assert!(store.get_item("offline_routes").await.unwrap().is_some());
        assert_eq!(cache.get::<Vec<i32>>("routes").await, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_entries_expire_after_ttl() {
        let (_store, cache) = cache();
        let saved_at = Utc::now() - Duration::hours(30);
        cache.save_at("routes", &"old", saved_at).await;

        assert_eq!(cache.get_at::<String>("routes", saved_at + Duration::hours(23)).await.as_deref(), Some("old"));
        assert!(cache.get_at::<String>("routes", saved_at + Duration::hours(24)).await.is_none());
        assert!(cache.get::<String>("routes").await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_entries_read_as_no_data() {
        let (store, cache) = cache();
        store.set_item("offline_routes", "garbage".to_string()).await.unwrap();
        assert!(cache.get::<Vec<i32>>("routes").await.is_none());

        cache.save("routes", &"text").await;
        assert!(cache.get::<Vec<i32>>("routes").await.is_none());
    }
}
