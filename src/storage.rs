// Local persistent key/value storage, one JSON file under the user's home.
// Writes save best-effort and bump a watch channel so screens can react.

use crate::state::AppError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::warn;

pub const KEY_APP_LANGUAGE: &str = "app_language";
pub const KEY_PROGRAM_ACTIVITY_STATUS: &str = "program_activity_status";
pub const KEY_DESKTOP_NOTIFICATIONS: &str = "desktop_notifications_enabled";

pub struct LocalStorage {
    path: PathBuf,
    values: Map<String, Value>,
    revision: u64,
    revision_tx: watch::Sender<u64>,
}

impl LocalStorage {
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".meridian_client.json")
    }

    pub fn load(path: PathBuf) -> Self {
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default();
        let (revision_tx, _) = watch::channel(0);
        Self {
            path,
            values,
            revision: 0,
            revision_tx,
        }
    }

    /// Receiver that ticks on every write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(|s| s.to_string())
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), Value::String(value.into()));
        self.commit();
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), Value::Bool(value));
        self.commit();
    }

    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn set_object<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.values.insert(key.to_string(), v);
                self.commit();
            }
            Err(e) => warn!("{}", AppError::Storage(format!("{}: {}", key, e))),
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        let _ = self.revision_tx.send(self.revision);
        if let Ok(data) = serde_json::to_string_pretty(&Value::Object(self.values.clone())) {
            if let Err(e) = fs::write(&self.path, data) {
                warn!("failed to save {:?}: {}", self.path, AppError::IO(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::TrackedProgram;

    fn temp_storage(name: &str) -> LocalStorage {
        let path = std::env::temp_dir().join(format!("meridian_storage_test_{}.json", name));
        let _ = fs::remove_file(&path);
        LocalStorage::load(path)
    }

    #[test]
    fn string_round_trip_survives_reload() {
        let mut storage = temp_storage("strings");
        storage.set_string(KEY_APP_LANGUAGE, "en_gb");

        let reloaded = LocalStorage::load(storage.path.clone());
        assert_eq!(
            reloaded.get_string(KEY_APP_LANGUAGE),
            Some("en_gb".to_string())
        );
    }

    #[test]
    fn object_round_trip() {
        let mut storage = temp_storage("objects");
        let tracked = vec![TrackedProgram {
            filename: "osu.exe".to_string(),
            name: "osu!".to_string(),
            action: "Playing".to_string(),
        }];
        storage.set_object(KEY_PROGRAM_ACTIVITY_STATUS, &tracked);

        let loaded: Vec<TrackedProgram> = storage.get_object(KEY_PROGRAM_ACTIVITY_STATUS).unwrap();
        assert_eq!(loaded, tracked);
    }

    #[test]
    fn writes_tick_the_watch_channel() {
        let mut storage = temp_storage("watch");
        let rx = storage.subscribe();
        assert_eq!(*rx.borrow(), 0);

        storage.set_bool(KEY_DESKTOP_NOTIFICATIONS, true);
        assert_eq!(*rx.borrow(), 1);
        storage.set_string(KEY_APP_LANGUAGE, "de_de");
        assert_eq!(*rx.borrow(), 2);
    }

    #[test]
    fn missing_keys_yield_defaults() {
        let storage = temp_storage("defaults");
        assert_eq!(storage.get_string("nope"), None);
        assert!(storage.get_bool(KEY_DESKTOP_NOTIFICATIONS, true));
        assert!(!storage.get_bool(KEY_DESKTOP_NOTIFICATIONS, false));
    }
}
