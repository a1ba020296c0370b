// ── Status watcher ──
//
// Polls `Site::status_record()` on a fixed interval and reports arming
// state changes over an mpsc channel. The first observed state is only
// remembered, never reported. Poll failures are logged and skipped.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::model::Status;
use crate::site::Site;

const CHANGE_CHANNEL_SIZE: usize = 16;

/// The armed status moved from `previous` to `current.armed_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub previous: String,
    pub current: Status,
}

/// Spawn the watcher. It stops when `cancel` fires or the receiver is
/// dropped.
pub fn watch_status(
    site: Site,
    interval: Duration,
    cancel: CancellationToken,
) -> (mpsc::Receiver<StatusChange>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(CHANGE_CHANNEL_SIZE);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen: Option<String> = None;

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tx.closed() => break,
                _ = ticker.tick() => {}
            }

            let status = match site.status_record().await {
                Ok(status) => status,
                Err(e) => {
                    warn!(error = %e, kind = %e.kind(), "status poll failed");
                    continue;
                }
            };

            match last_seen.replace(status.armed_status.clone()) {
                None => debug!(armed_status = %status.armed_status, "initial status recorded"),
                Some(previous) if previous != status.armed_status => {
                    info!(from = %previous, to = %status.armed_status, "armed status changed");
                    let change = StatusChange {
                        previous,
                        current: status,
                    };
                    if tx.send(change).await.is_err() {
                        break;
                    }
                }
                Some(_) => {}
            }
        }

        debug!("status watcher stopped");
    });

    (rx, handle)
}
