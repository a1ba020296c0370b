//! Domain layer between `sectoralarm-api` and its consumers (CLI, services).
//!
//! - **[`Site`]**: one handle per alarm panel. Logs in, composes the status
//!   view (overview + latest event + lock details), and exposes one method
//!   per user-facing action. Mutations are validated against the command
//!   whitelist before anything touches the network.
//!
//! - **Field mapper** ([`convert`]): declarative rule tables turning the
//!   vendor's raw JSON into the records in [`model`]. Arming states and
//!   localized "code" users are normalized; timestamps are rendered as
//!   `YYYY-MM-DD HH:mm:ss`.
//!
//! - **Output** ([`output`]): every result comes back as a JSON string or
//!   as the structured record, per [`Settings::json_output`].
//!
//! - **Watcher** ([`notify`]): background polling that reports arming
//!   state changes.

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod notify;
pub mod output;
pub mod site;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{LockCommand, PanelCommand, validate};
pub use config::{Settings, SiteConfig};
pub use convert::{CodeLabel, MapOptions};
pub use error::{CoreError, ErrorKind};
pub use model::{
    ActionResult, HistoryEvent, Info, Lock, LockActionResult, Status, TemperatureSensor,
};
pub use notify::{StatusChange, watch_status};
pub use output::Formatted;
pub use site::{DEFAULT_HISTORY_TOP, Site};
