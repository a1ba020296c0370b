// ── Command validator ──
//
// Whitelist check for mutating keywords. Runs before any session lookup
// or network call, so a rejected keyword never costs a request.

use std::str::FromStr;

use strum::VariantNames;

pub use sectoralarm_api::{LockCommand, PanelCommand};

use crate::error::CoreError;

/// Parse a raw keyword into one of the allowed commands of `C`.
///
/// Matching is exact and case-sensitive: these keywords go on the wire
/// unchanged.
pub fn validate<C>(raw: &str) -> Result<C, CoreError>
where
    C: FromStr + VariantNames,
{
    C::from_str(raw).map_err(|_| CoreError::InvalidCommand {
        command: raw.to_owned(),
        allowed: C::VARIANTS.join(", "),
    })
}
