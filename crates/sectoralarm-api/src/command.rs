// Mutating command keywords, exactly as the vendor expects them on the wire.

use strum::{AsRefStr, Display, EnumString, VariantNames};

/// Panel arming commands (`ArmCmd` in the arm payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, VariantNames)]
pub enum PanelCommand {
    Disarm,
    Total,
    Partial,
    ArmAnnex,
    DisarmAnnex,
}

/// Smart lock commands. Each maps to its own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, VariantNames)]
pub enum LockCommand {
    Lock,
    Unlock,
}
