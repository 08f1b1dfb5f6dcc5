use crate::assets::AssetRef;
use crate::catalog::SlotPath;

use super::scope::Scope;

/// One row of a template's slot list as a replacement panel shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSummary {
    pub path: SlotPath,
    /// Asset the template authored for this slot.
    pub original: Option<AssetRef>,
    /// Asset the slot shows right now.
    pub current: Option<AssetRef>,
    /// Scope of the replacement governing the slot.
    pub scope: Option<Scope>,
    pub probability: u8,
    pub base_probability: u8,
}

impl SlotSummary {
    pub fn is_replaced(&self) -> bool {
        self.scope.is_some()
    }
}
