//! Mutating handlers: panel arming and smart locks.

use sectoralarm_core::{ActionResult, LockActionResult, PanelCommand, Site};

use crate::cli::LockArgs;
use crate::error::CliError;
use crate::output::{self, or_dash};

fn action_detail(r: &ActionResult) -> Vec<(&'static str, String)> {
    vec![
        ("Result", r.status.clone()),
        ("Name", r.name.clone()),
        ("Armed status", r.armed_status.clone()),
        ("Annex status", or_dash(r.annex_armed_status.as_deref())),
    ]
}

fn lock_detail(r: &LockActionResult) -> Vec<(&'static str, String)> {
    vec![("Result", r.status.clone())]
}

pub async fn panel(site: &Site, command: PanelCommand, code: &str) -> Result<(), CliError> {
    let result = match command {
        PanelCommand::Total => site.arm(code).await?,
        PanelCommand::Partial => site.partial_arm(code).await?,
        PanelCommand::ArmAnnex => site.annex_arm(code).await?,
        PanelCommand::Disarm => site.disarm(code).await?,
        PanelCommand::DisarmAnnex => site.annex_disarm(code).await?,
    };
    output::print_output(&output::render_single(result, action_detail))?;
    Ok(())
}

pub async fn act(site: &Site, command: &str, code: &str) -> Result<(), CliError> {
    let result = site.act(command, code).await?;
    output::print_output(&output::render_single(result, action_detail))?;
    Ok(())
}

pub async fn lock(site: &Site, args: &LockArgs, lock: bool) -> Result<(), CliError> {
    let LockArgs { lock_id, code } = args;
    let result = if lock {
        site.lock(lock_id, &code.code).await?
    } else {
        site.unlock(lock_id, &code.code).await?
    };
    output::print_output(&output::render_single(result, lock_detail))?;
    Ok(())
}
