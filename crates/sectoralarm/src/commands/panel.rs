//! Panel read handlers: info, status, history.

use tabled::Tabled;

use sectoralarm_core::{HistoryEvent, Info, Site, Status};

use crate::error::CliError;
use crate::output::{self, or_dash, yes_no};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "User")]
    user: String,
}

impl From<&HistoryEvent> for EventRow {
    fn from(e: &HistoryEvent) -> Self {
        Self {
            time: or_dash(e.time.as_deref()),
            action: or_dash(e.action.as_deref()),
            user: or_dash(e.user.as_deref()),
        }
    }
}

fn info_detail(i: &Info) -> Vec<(&'static str, String)> {
    vec![
        ("Site", i.site_id.clone()),
        ("Name", i.name.clone()),
        ("Partial arming", yes_no(i.partial_arming_available)),
        ("Annex arming", yes_no(i.annex_arming_available)),
        ("Locks", yes_no(i.locks_available)),
        ("Temperatures", yes_no(i.temperatures_available)),
        ("Cameras", yes_no(i.cameras_available)),
        ("Smart plugs", yes_no(i.smart_plugs_available)),
    ]
}

fn status_detail(s: &Status) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Site", s.site_id.clone()),
        ("Name", s.name.clone()),
        ("Armed status", s.armed_status.clone()),
        ("Annex status", or_dash(s.annex_armed_status.as_deref())),
        ("Last interaction by", or_dash(s.last_interaction_by.as_deref())),
        ("Last interaction at", or_dash(s.last_interaction_time.as_deref())),
    ];
    rows.extend(
        s.locks
            .iter()
            .map(|l| {
                let state = or_dash(l.status.as_deref());
                ("Lock", format!("{} ({}): {state}", l.name, l.lock_id))
            }),
    );
    rows
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn info(site: &Site) -> Result<(), CliError> {
    let out = output::render_single(site.info().await?, info_detail);
    output::print_output(&out)?;
    Ok(())
}

pub async fn status(site: &Site) -> Result<(), CliError> {
    let out = output::render_single(site.status().await?, status_detail);
    output::print_output(&out)?;
    Ok(())
}

pub async fn history(site: &Site, top: Option<usize>) -> Result<(), CliError> {
    let out = output::render_list(site.history(top).await?, |e| EventRow::from(e));
    output::print_output(&out)?;
    Ok(())
}
