use std::path::PathBuf;

use bevy::prelude::*;
use replacement::{decode_or_warn, OverrideLayers, PrefabCatalog, ReplacementSet, Saveable};

use crate::load::LoadReport;
use crate::records::ReplacementConfig;
use crate::saveable_ext::SaveableAppExt;

// ---------------------------------------------------------------------------
// Saved configuration resource
// ---------------------------------------------------------------------------

/// The replacement configuration as it rides in a save file.
///
/// Kept in step with the live layers while playing. After a load,
/// `pending_apply` is set and the layers are rebuilt from `config` on the
/// next frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct SavedReplacements {
    pub config: ReplacementConfig,
    pub pending_apply: bool,
    /// Outcome of the most recent rebuild from a save or an imported file.
    pub last_report: Option<LoadReport>,
}

impl Saveable for SavedReplacements {
    const SAVE_KEY: &'static str = "replacements";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.config.is_empty() {
            return None;
        }
        Some(self.config.encode())
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        Self {
            config: decode_or_warn(Self::SAVE_KEY, bytes),
            pending_apply: true,
            last_report: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Write the live configuration to a JSON file.
#[derive(Event, Debug, Clone)]
pub struct ExportReplacementConfig {
    pub path: PathBuf,
}

/// Replace every live replacement with the contents of a JSON file.
#[derive(Event, Debug, Clone)]
pub struct ImportReplacementConfig {
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Rebuild the layers from a freshly loaded [`SavedReplacements`].
pub fn apply_loaded_replacements(
    mut saved: ResMut<SavedReplacements>,
    mut layers: ResMut<OverrideLayers>,
    mut catalog: ResMut<PrefabCatalog>,
) {
    if !saved.pending_apply {
        return;
    }
    saved.pending_apply = false;
    layers.revert_all(&mut *catalog);
    if let Err(e) = saved.config.check_version() {
        warn!("Saved replacements ignored: {e}");
        return;
    }
    let report = saved.config.apply_to(&mut layers, &mut *catalog);
    saved.last_report = Some(report);
}

/// Re-capture the saved configuration whenever the layers change.
pub fn capture_live_replacements(
    mut saved: ResMut<SavedReplacements>,
    layers: Res<OverrideLayers>,
    catalog: Res<PrefabCatalog>,
) {
    if !layers.is_changed() || saved.pending_apply {
        return;
    }
    saved.config = ReplacementConfig::capture(&layers, &*catalog);
}

/// Export writes the live layers; import rebuilds them from the file.
pub fn handle_config_file_events(
    mut exports: EventReader<ExportReplacementConfig>,
    mut imports: EventReader<ImportReplacementConfig>,
    mut saved: ResMut<SavedReplacements>,
    mut layers: ResMut<OverrideLayers>,
    mut catalog: ResMut<PrefabCatalog>,
) {
    for event in exports.read() {
        // Requests handled earlier this frame are not in `saved.config` yet.
        let config = ReplacementConfig::capture(&layers, &*catalog);
        match config.write_file(&event.path) {
            Ok(()) => info!(
                "Exported {} replacement(s) to {}",
                config.len(),
                event.path.display()
            ),
            Err(e) => warn!(
                "Failed to export replacements to {}: {e}",
                event.path.display()
            ),
        }
    }
    for event in imports.read() {
        let config = match ReplacementConfig::read_file(&event.path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to import replacements from {}: {e}",
                    event.path.display()
                );
                continue;
            }
        };
        layers.revert_all(&mut *catalog);
        saved.last_report = Some(config.apply_to(&mut layers, &mut *catalog));
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Persists replacement layers through the save registry and JSON files.
/// Add after `ReplacementPlugin`.
pub struct ReplacementSavePlugin;

impl Plugin for ReplacementSavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ExportReplacementConfig>()
            .add_event::<ImportReplacementConfig>()
            .init_resource::<SavedReplacements>()
            .register_saveable::<SavedReplacements>();

        app.add_systems(
            Update,
            (
                apply_loaded_replacements,
                handle_config_file_events,
                capture_live_replacements,
            )
                .chain()
                .after(ReplacementSet),
        );
    }
}
