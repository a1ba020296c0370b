// ── Normalized output records ──
//
// Value objects produced by the field mapper. Keys serialize as camelCase;
// these shapes are the library's stable output schema.

pub mod action;
pub mod device;
pub mod history;
pub mod panel;

pub use action::{ActionResult, LockActionResult};
pub use device::{Lock, TemperatureSensor};
pub use history::HistoryEvent;
pub use panel::{Info, Status};
