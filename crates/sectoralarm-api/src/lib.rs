// sectoralarm-api: async client for the Sector Alarm browser-facing endpoints
//
// Not a documented API. This crate only knows how to talk to it: the
// login dance, the endpoint table, response classification, and the
// bounded retry on session expiry. It never interprets a response body.

pub mod auth;
pub mod client;
pub mod command;
pub mod endpoint;
pub mod error;
pub mod panel;
pub mod session;
pub mod transport;

pub use auth::Metadata;
pub use client::SectorAlarmClient;
pub use command::{LockCommand, PanelCommand};
pub use endpoint::{ApiRequest, Endpoint, Payload, Route};
pub use error::Error;
pub use session::{RawResponse, RetryPolicy, Session};
pub use transport::{DEFAULT_BASE_URL, TransportConfig};
