//! Tick timer background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, Notification};

/// Background task that ticks the game while its timer runs.
///
/// The task idles on the schedule channel while paused. Each schedule change
/// drops the current interval and builds a new one, so only one tick source
/// exists at a time. Missed ticks are replayed in a burst, which keeps the
/// countdown within one tick of the wall clock.
pub async fn tick_timer_task(state: Arc<AppState>) {
    info!("Starting tick timer task, interval {:?}", state.tick_interval);

    let mut schedule_rx = state.schedule_tx.subscribe();
    let period = state.tick_interval;

    loop {
        let schedule = *schedule_rx.borrow_and_update();
        if !schedule.running {
            debug!("Timer paused, waiting for schedule change");
            if schedule_rx.changed().await.is_err() {
                break;
            }
            continue;
        }

        debug!("Ticking schedule generation {}", schedule.generation);
        // First tick lands one full period after the start
        let mut interval = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(notifications) => {
                            if notifications.contains(&Notification::GameOver) {
                                state.persist_or_log().await;
                            }
                        }
                        Err(e) => error!("Failed to tick game: {}", e),
                    }
                }

                changed = schedule_rx.changed() => {
                    if changed.is_err() {
                        info!("Schedule channel closed, stopping tick timer task");
                        return;
                    }
                    debug!("Tick schedule superseded");
                    break;
                }
            }
        }
    }

    info!("Tick timer task stopped");
}
