//! Preferencias de notificación guardadas en el almacenamiento local.

use tracing::warn;

use crate::cache::{read_json, write_json, KeyValueStore, StorageError, NOTIFICATION_SETTINGS_KEY};
use crate::models::{NotificationSettings, NotificationToggle};

/// Preferencias guardadas o las de por defecto si no hay (o no se pueden leer)
pub async fn load_notification_settings(store: &dyn KeyValueStore) -> NotificationSettings {
    match read_json(store, NOTIFICATION_SETTINGS_KEY).await {
        Ok(Some(settings)) => settings,
        Ok(None) => NotificationSettings::default(),
        Err(e) => {
            warn!("⚠️ Preferencias de notificación ilegibles: {}", e);
            NotificationSettings::default()
        }
    }
}

/// Cambia un interruptor y guarda el resultado
pub async fn update_notification_setting(
    store: &dyn KeyValueStore,
    toggle: NotificationToggle,
    value: bool,
) -> Result<NotificationSettings, StorageError> {
    let mut settings = load_notification_settings(store).await;
    settings.set(toggle, value);
    write_json(store, NOTIFICATION_SETTINGS_KEY, &settings).await?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    #[tokio::test]
    async fn test_defaults_then_persisted_update() {
        let store = MemoryStore::new();
        assert_eq!(load_notification_settings(&store).await, NotificationSettings::default());

        let updated = update_notification_setting(&store, NotificationToggle::NewRoutes, false)
            .await
            .unwrap();
        assert!(!updated.new_routes);
        assert_eq!(load_notification_settings(&store).await, updated);
    }
}
