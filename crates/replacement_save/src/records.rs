//! Persisted replacement records.
//!
//! Records hold names rather than ids so a configuration survives templates
//! being reloaded in a different order.

use bevy::math::Vec3;
use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use replacement::config::{CONFIG_VERSION, GROUPED_TARGET_INDEX, NO_LANE_INDEX};
use replacement::{AssetKind, OverrideEntry, TransformDelta};

/// One replacement, by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ReplacementRecord {
    #[serde(default)]
    pub is_tree: bool,
    /// Slot index for individual replacements, `-1` otherwise.
    #[serde(default = "default_index")]
    pub target_index: i32,
    /// Lane for individual network replacements, `-1` otherwise.
    #[serde(default = "default_lane")]
    pub lane_index: i32,
    pub target_name: String,
    pub replace_name: String,
    /// `None` keeps the slot's probability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    #[serde(default)]
    pub offset_z: f32,
}

fn default_index() -> i32 {
    GROUPED_TARGET_INDEX
}

fn default_lane() -> i32 {
    NO_LANE_INDEX
}

impl ReplacementRecord {
    /// Record for an entry; slot indices are filled in by the caller for
    /// individual replacements.
    pub fn from_entry(entry: &OverrideEntry) -> Self {
        Self {
            is_tree: entry.target.kind.is_tree(),
            target_index: GROUPED_TARGET_INDEX,
            lane_index: NO_LANE_INDEX,
            target_name: entry.target.name.clone(),
            replace_name: entry.replacement.name.clone(),
            probability: entry.delta.probability,
            angle: entry.delta.rotation,
            offset_x: entry.delta.offset.x,
            offset_y: entry.delta.offset.y,
            offset_z: entry.delta.offset.z,
        }
    }

    pub fn asset_kind(&self) -> AssetKind {
        AssetKind::from_is_tree(self.is_tree)
    }

    pub fn delta(&self) -> TransformDelta {
        TransformDelta {
            rotation: self.angle,
            offset: Vec3::new(self.offset_x, self.offset_y, self.offset_z),
            probability: self.probability,
        }
    }
}

/// Every record for one template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct TemplateReplacements {
    pub template_name: String,
    #[serde(default)]
    pub replacements: Vec<ReplacementRecord>,
}

/// The whole persisted configuration, one list per kind and scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ReplacementConfig {
    pub version: u32,
    #[serde(default)]
    pub all_buildings: Vec<ReplacementRecord>,
    #[serde(default)]
    pub buildings: Vec<TemplateReplacements>,
    #[serde(default)]
    pub individual_buildings: Vec<TemplateReplacements>,
    #[serde(default)]
    pub all_networks: Vec<ReplacementRecord>,
    #[serde(default)]
    pub networks: Vec<TemplateReplacements>,
    #[serde(default)]
    pub individual_networks: Vec<TemplateReplacements>,
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            all_buildings: Vec::new(),
            buildings: Vec::new(),
            individual_buildings: Vec::new(),
            all_networks: Vec::new(),
            networks: Vec::new(),
            individual_networks: Vec::new(),
        }
    }
}

impl ReplacementConfig {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of records across every list.
    pub fn len(&self) -> usize {
        let grouped = |lists: &[TemplateReplacements]| -> usize {
            lists.iter().map(|t| t.replacements.len()).sum()
        };
        self.all_buildings.len()
            + grouped(&self.buildings)
            + grouped(&self.individual_buildings)
            + self.all_networks.len()
            + grouped(&self.networks)
            + grouped(&self.individual_networks)
    }
}

/// Append `record` to the list for `template_name`, creating it on first use.
pub(crate) fn push_grouped(
    lists: &mut Vec<TemplateReplacements>,
    template_name: &str,
    record: ReplacementRecord,
) {
    match lists.iter_mut().find(|t| t.template_name == template_name) {
        Some(list) => list.replacements.push(record),
        None => lists.push(TemplateReplacements {
            template_name: template_name.to_string(),
            replacements: vec![record],
        }),
    }
}
