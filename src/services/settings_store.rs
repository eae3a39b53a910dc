//! JSON file holding the persisted settings records, one key per record

use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

pub const GAME_SETTINGS_KEY: &str = "game-settings";
pub const USER_SETTINGS_KEY: &str = "user-settings";

/// Key/value store backed by a single JSON object on disk
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> anyhow::Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };

        match serde_json::from_str::<Value>(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => bail!("{} does not hold a JSON object", self.path.display()),
        }
    }

    /// Read one record; `Ok(None)` when the key has never been written
    pub async fn try_load<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let mut all = self.read_all().await?;
        match all.remove(key) {
            Some(value) => {
                let record = serde_json::from_value(value)
                    .with_context(|| format!("Invalid record under key {}", key))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Read one record, falling back to its default when missing or unreadable
    pub async fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.try_load(key).await {
            Ok(Some(record)) => {
                debug!("Loaded {} from {}", key, self.path.display());
                record
            }
            Ok(None) => T::default(),
            Err(e) => {
                warn!("Using default {}: {:#}", key, e);
                T::default()
            }
        }
    }

    /// Write one record, leaving the other keys untouched
    pub async fn save<T: Serialize>(&self, key: &str, record: &T) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut all = match self.read_all().await {
            Ok(all) => all,
            Err(e) => {
                warn!("Overwriting unreadable settings file: {:#}", e);
                Map::new()
            }
        };
        all.insert(key.to_string(), serde_json::to_value(record)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(&Value::Object(all))?;
        fs::write(&tmp, body)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved {} to {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameConfig, UserSettings};

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir()
            .join(format!("tournament-timer-{}-{}-{}", name, std::process::id(), nanos))
            .join("settings.json")
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let store = SettingsStore::new(scratch_path("missing"));
        let config: GameConfig = store.load_or_default(GAME_SETTINGS_KEY).await;
        assert_eq!(config, GameConfig::default());
        assert!(store.try_load::<UserSettings>(USER_SETTINGS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn records_are_saved_under_independent_keys() {
        let store = SettingsStore::new(scratch_path("keys"));
        let config = GameConfig {
            round_count: 7,
            ..GameConfig::default()
        };
        let mut user = UserSettings::default();
        user.close_settings();

        store.save(GAME_SETTINGS_KEY, &config).await.unwrap();
        store.save(USER_SETTINGS_KEY, &user).await.unwrap();

        let loaded: GameConfig = store.load_or_default(GAME_SETTINGS_KEY).await;
        let loaded_user: UserSettings = store.load_or_default(USER_SETTINGS_KEY).await;
        assert_eq!(loaded, config);
        assert_eq!(loaded_user, user);
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_and_is_replaced() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, "{ not json").await.unwrap();

        let store = SettingsStore::new(&path);
        assert!(store.try_load::<GameConfig>(GAME_SETTINGS_KEY).await.is_err());
        let config: GameConfig = store.load_or_default(GAME_SETTINGS_KEY).await;
        assert_eq!(config, GameConfig::default());

        store.save(USER_SETTINGS_KEY, &UserSettings::default()).await.unwrap();
        assert!(store.try_load::<UserSettings>(USER_SETTINGS_KEY).await.unwrap().is_some());
    }
}
