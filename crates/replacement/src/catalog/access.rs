//! The capability interface the replacement layers use to reach template slots.

use crate::assets::{AssetKind, AssetRef};

use super::types::{PropSlot, SlotPath, TemplateId, TemplateKind};

/// Read/write access to loaded templates and their slots.
///
/// Lookups against a template that is no longer loaded return `None` (or an
/// empty list); the replacement layers treat that as "already reverted".
pub trait TemplateCatalog {
    /// Loaded templates of one kind, in load order.
    fn templates(&self, kind: TemplateKind) -> Vec<TemplateId>;

    fn template_kind(&self, template: TemplateId) -> Option<TemplateKind>;

    fn template_name(&self, template: TemplateId) -> Option<&str>;

    /// First loaded template of `kind` with this name.
    fn find_template(&self, kind: TemplateKind, name: &str) -> Option<TemplateId>;

    /// Every slot address in the template, lane-major for networks.
    fn slot_paths(&self, template: TemplateId) -> Vec<SlotPath>;

    fn slot(&self, template: TemplateId, path: SlotPath) -> Option<&PropSlot>;

    fn slot_mut(&mut self, template: TemplateId, path: SlotPath) -> Option<&mut PropSlot>;

    /// Resolve a persisted asset name back into a reference.
    fn find_asset(&self, kind: AssetKind, name: &str) -> Option<AssetRef>;

    /// Notification sink: the template's slots changed and any cached render
    /// of it is stale.
    fn mark_dirty(&mut self, _template: TemplateId) {}

    fn is_loaded(&self, template: TemplateId) -> bool {
        self.template_kind(template).is_some()
    }
}
