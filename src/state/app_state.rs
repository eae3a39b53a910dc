//! Shared application state around the running game

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::{
    engine::{Game, GameSnapshot, Round},
    services::{SettingsStore, GAME_SETTINGS_KEY, USER_SETTINGS_KEY},
};
use super::{ConfigField, GameConfig, Notification, UserSettings};

/// Signal to the tick task. Every start, pause or new deadline bumps the
/// generation so the previous tick schedule is dropped, never stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub running: bool,
    pub generation: u64,
}

/// Main application state shared between the tick task and the front-end
#[derive(Debug)]
pub struct AppState {
    /// The game: settings, timer and round tracking
    pub game: Arc<Mutex<Game>>,
    pub user_settings: Arc<Mutex<UserSettings>>,
    pub tick_interval: Duration,
    pub store: SettingsStore,
    /// Latest snapshot, refreshed after every mutation and tick
    pub snapshot_tx: watch::Sender<GameSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<GameSnapshot>,
    pub notification_tx: broadcast::Sender<Notification>,
    pub schedule_tx: watch::Sender<TickSchedule>,
    pub _schedule_rx: watch::Receiver<TickSchedule>,
}

impl AppState {
    /// Create the state from stored records; the game starts `Configured`
    pub fn new(
        config: GameConfig,
        user_settings: UserSettings,
        tick_interval: Duration,
        store: SettingsStore,
    ) -> Self {
        let game = Game::new(config, tick_interval, Utc::now());
        let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());
        let (notification_tx, _) = broadcast::channel(100);
        let (schedule_tx, schedule_rx) = watch::channel(TickSchedule {
            running: false,
            generation: 0,
        });

        Self {
            game: Arc::new(Mutex::new(game)),
            user_settings: Arc::new(Mutex::new(user_settings)),
            tick_interval,
            store,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            notification_tx,
            schedule_tx,
            _schedule_rx: schedule_rx,
        }
    }

    /// Load both records from `store` and build the state.
    ///
    /// With `fresh` set the stored game settings are ignored.
    pub async fn load(store: SettingsStore, tick_interval: Duration, fresh: bool) -> Self {
        let config = if fresh {
            info!("Ignoring stored game settings");
            GameConfig::default()
        } else {
            store.load_or_default(GAME_SETTINGS_KEY).await
        };
        let user_settings = store.load_or_default(USER_SETTINGS_KEY).await;
        Self::new(config, user_settings, tick_interval, store)
    }

    /// Load the state and write back the re-armed settings.
    ///
    /// With `fresh` set nothing is written, so the stored game settings
    /// survive until a setting changes or the program exits.
    pub async fn open(store: SettingsStore, tick_interval: Duration, fresh: bool) -> Self {
        let state = Self::load(store, tick_interval, fresh).await;
        if !fresh {
            state.persist_or_log().await;
        }
        state
    }

    fn lock_game(&self) -> Result<MutexGuard<'_, Game>, String> {
        self.game
            .lock()
            .map_err(|e| format!("Failed to lock game state: {}", e))
    }

    /// Apply `updater` to the game, then publish the new snapshot and
    /// reschedule ticking if the timer changed
    pub fn update_game<F, R>(&self, action: &str, updater: F) -> Result<R, String>
    where
        F: FnOnce(&mut Game) -> R,
    {
        let mut game = self.lock_game()?;
        let was_running = game.timer().is_running();
        let deadline_before = game.timer().deadline();

        let result = updater(&mut *game);

        let is_running = game.timer().is_running();
        let rescheduled = was_running != is_running || deadline_before != game.timer().deadline();
        let snapshot = game.snapshot();
        drop(game); // Release the lock early

        if rescheduled {
            debug!("{} rescheduled ticking (running={})", action, is_running);
            self.schedule_tx.send_modify(|schedule| {
                schedule.running = is_running;
                schedule.generation += 1;
            });
        }

        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish snapshot after {}: {}", action, e);
        }

        Ok(result)
    }

    /// Start or resume the game
    pub fn start_game(&self) -> Result<bool, String> {
        self.update_game("start", |game| game.start_game(Utc::now()))
    }

    pub fn pause(&self) -> Result<bool, String> {
        self.update_game("pause", |game| game.pause())
    }

    /// Re-arm with the current settings
    pub fn restart(&self) -> Result<(), String> {
        self.update_game("restart", |game| game.restart(Utc::now()))
    }

    /// Restore default settings and re-arm
    pub fn reset(&self) -> Result<(), String> {
        let notification = self.update_game("reset", |game| game.reset(Utc::now()))?;
        self.notify(notification);
        Ok(())
    }

    /// Set one setting. `Ok(true)` when the game was restarted for it.
    pub fn set_config(&self, field: ConfigField, value: u64) -> Result<bool, String> {
        info!("Setting {} to {}", field.name(), value);
        self.update_game("set", |game| {
            let mut candidate = game.config().clone();
            field.apply(&mut candidate, value)?;
            game.update_config(Utc::now(), |config| config.adopt_settings(&candidate))
        })?
    }

    /// One timer tick; notifications are broadcast and also returned
    pub fn tick(&self) -> Result<Vec<Notification>, String> {
        let notifications = self.update_game("tick", |game| game.tick())?;
        for notification in &notifications {
            self.notify(notification.clone());
        }
        Ok(notifications)
    }

    pub fn notify(&self, notification: Notification) {
        info!("{}", notification);
        if self.notification_tx.send(notification).is_err() {
            debug!("No notification listeners");
        }
    }

    pub fn get_snapshot(&self) -> Result<GameSnapshot, String> {
        self.lock_game().map(|game| game.snapshot())
    }

    /// Round list plus the current round number, read under one lock
    pub fn get_rounds(&self) -> Result<(Vec<Round>, u32), String> {
        self.lock_game()
            .map(|game| (game.rounds(), game.current_round().number))
    }

    pub fn get_user_settings(&self) -> Result<UserSettings, String> {
        self.user_settings
            .lock()
            .map(|settings| settings.clone())
            .map_err(|e| format!("Failed to lock user settings: {}", e))
    }

    /// Open or close the settings panel
    pub fn set_changing_settings(&self, open: bool) -> Result<UserSettings, String> {
        let mut settings = self.user_settings
            .lock()
            .map_err(|e| format!("Failed to lock user settings: {}", e))?;
        if open {
            settings.open_settings();
        } else {
            settings.close_settings();
        }
        Ok(settings.clone())
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notification_tx.subscribe()
    }

    /// Write both settings records to the store
    pub async fn persist(&self) -> anyhow::Result<()> {
        let config = self.get_snapshot().map_err(anyhow::Error::msg)?.config;
        let user_settings = self.get_user_settings().map_err(anyhow::Error::msg)?;
        self.store.save(GAME_SETTINGS_KEY, &config).await?;
        self.store.save(USER_SETTINGS_KEY, &user_settings).await?;
        Ok(())
    }

    /// Persist, logging a failure instead of returning it. Returns whether
    /// both records were written.
    pub async fn persist_or_log(&self) -> bool {
        match self.persist().await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save settings to {}: {:#}", self.store.path().display(), e);
                false
            }
        }
    }
}
