use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod assets;
pub mod catalog;
pub mod config;
pub mod layers;
pub mod plugin;
pub mod request_log;

#[cfg(test)]
pub mod test_harness;

pub use assets::{AssetKind, AssetRef};
pub use catalog::{
    BuildingTemplate, NetLane, NetworkTemplate, PrefabCatalog, PropSlot, SlotPath,
    TemplateCatalog, TemplateId, TemplateKind,
};
pub use layers::{
    ApplyOutcome, ApplyRequest, EntryKey, LayerSet, OverrideEntry, OverrideLayers,
    OverrideManager, Placement, PlacementRecord, RejectReason, ReleasedSlot, Scope, SlotSummary,
    TransformDelta,
};
pub use plugin::{ReplacementPlugin, ReplacementRequest, ReplacementSet, TemplatesChanged};
pub use request_log::{RequestLog, RequestResult};

// ---------------------------------------------------------------------------
// Save-file sections: resources persisted under their own key
// ---------------------------------------------------------------------------

/// A resource written to its own section of a save file.
///
/// Replacement layers are rebuilt from persisted records, never from raw
/// manager state, so implementors hold by-value data only.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Section name in the save file. Renaming it orphans existing saves.
    const SAVE_KEY: &'static str;

    /// `None` leaves the section out of the save.
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode a bitcode section; a corrupt section loads as `T::default()`.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                "Save section {}: {} byte(s) undecodable, using default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;

/// One registered section.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
}

/// Every section the app writes into a save, filled in by plugins at build time.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Registering the same `SAVE_KEY` twice keeps the first and warns.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!(
                "Save section '{}' already registered; keeping the first",
                key
            );
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                let value = T::load_from_bytes(bytes);
                world.insert_resource(value);
            }),
        });
    }

    /// Collect every non-empty section, keyed by `SAVE_KEY`.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Replace each registered resource that has a section in `extensions`.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }
}
