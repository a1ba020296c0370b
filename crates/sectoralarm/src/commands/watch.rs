//! `watch`: print arming state changes until interrupted.

use std::time::Duration;

use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sectoralarm_core::{Formatted, Site, StatusChange, output::format, watch_status};

use crate::error::CliError;
use crate::output;

pub async fn handle(site: &Site, interval_secs: u64) -> Result<(), CliError> {
    let cancel = CancellationToken::new();
    let (mut changes, handle) = watch_status(
        site.clone(),
        Duration::from_secs(interval_secs),
        cancel.clone(),
    );

    let json_output = site.settings().json_output;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted, stopping watcher");
                break;
            }
            change = changes.recv() => match change {
                Some(change) => output::print_output(&render(change, json_output)?)?,
                None => break,
            },
        }
    }

    cancel.cancel();
    watcher_outcome(handle.await)
}

/// A watcher that panicked is an error; one that was aborted is not.
fn watcher_outcome(joined: Result<(), JoinError>) -> Result<(), CliError> {
    match joined {
        Ok(()) => Ok(()),
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => {
            warn!(error = %e, "status watcher task failed");
            Err(CliError::Watcher {
                message: e.to_string(),
            })
        }
    }
}

fn render(change: StatusChange, json_output: bool) -> Result<String, CliError> {
    Ok(match format(change, json_output)? {
        Formatted::Json(json) => json,
        Formatted::Structured(change) => format!(
            "{}  {} -> {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            change.previous,
            change.current.armed_status,
        ),
    })
}
