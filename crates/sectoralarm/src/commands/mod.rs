//! Command dispatch: bridges CLI args -> `Site` calls -> output rendering.

pub mod actions;
pub mod devices;
pub mod panel;
pub mod watch;

use sectoralarm_core::{PanelCommand, Site, validate};

use crate::cli::Command;
use crate::error::CliError;

/// Checks that need neither credentials nor the network.
pub fn preflight(cmd: &Command) -> Result<(), CliError> {
    if let Command::Act { command, .. } = cmd {
        validate::<PanelCommand>(command)?;
    }
    Ok(())
}

/// Dispatch a site-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, site: &Site) -> Result<(), CliError> {
    match cmd {
        Command::Info => panel::info(site).await,
        Command::Status => panel::status(site).await,
        Command::History { top } => panel::history(site, top).await,
        Command::Temperatures { id } => devices::temperatures(site, id.as_deref()).await,
        Command::Locks { id } => devices::locks(site, id.as_deref()).await,
        Command::Arm(args) => actions::panel(site, PanelCommand::Total, &args.code).await,
        Command::PartialArm(args) => actions::panel(site, PanelCommand::Partial, &args.code).await,
        Command::AnnexArm(args) => actions::panel(site, PanelCommand::ArmAnnex, &args.code).await,
        Command::Disarm(args) => actions::panel(site, PanelCommand::Disarm, &args.code).await,
        Command::AnnexDisarm(args) => {
            actions::panel(site, PanelCommand::DisarmAnnex, &args.code).await
        }
        Command::Act { command, code } => actions::act(site, &command, &code.code).await,
        Command::Lock(args) => actions::lock(site, &args, true).await,
        Command::Unlock(args) => actions::lock(site, &args, false).await,
        Command::Watch { interval_secs } => watch::handle(site, interval_secs).await,
        // Completions are handled before dispatch
        Command::Completions(_) => Ok(()),
    }
}
