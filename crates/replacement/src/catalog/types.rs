//! Identifiers and slot data shared by the catalog and the replacement layers.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::assets::AssetRef;
use crate::config::DEFAULT_PROBABILITY;

/// Opaque handle of a loaded template. Handles are never reused after unload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateKind {
    Building,
    Network,
}

impl TemplateKind {
    pub fn label(self) -> &'static str {
        match self {
            TemplateKind::Building => "building",
            TemplateKind::Network => "network",
        }
    }
}

/// Address of one slot inside one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotPath {
    Building { index: usize },
    Network { lane: usize, index: usize },
}

impl SlotPath {
    pub fn building(index: usize) -> Self {
        SlotPath::Building { index }
    }

    pub fn network(lane: usize, index: usize) -> Self {
        SlotPath::Network { lane, index }
    }

    /// Slot index within its building, or within its lane for networks.
    pub fn index(self) -> usize {
        match self {
            SlotPath::Building { index } | SlotPath::Network { index, .. } => index,
        }
    }

    pub fn lane(self) -> Option<usize> {
        match self {
            SlotPath::Building { .. } => None,
            SlotPath::Network { lane, .. } => Some(lane),
        }
    }

    pub fn template_kind(self) -> TemplateKind {
        match self {
            SlotPath::Building { .. } => TemplateKind::Building,
            SlotPath::Network { .. } => TemplateKind::Network,
        }
    }
}

/// One placement position in a template.
///
/// `rotation` is in degrees. `base_probability` is the template's authored
/// value and is never written by the replacement layers.
#[derive(Debug, Clone, PartialEq)]
pub struct PropSlot {
    pub asset: Option<AssetRef>,
    pub rotation: f32,
    pub offset: Vec3,
    pub probability: u8,
    pub base_probability: u8,
}

impl PropSlot {
    pub fn new(asset: AssetRef) -> Self {
        Self {
            asset: Some(asset),
            rotation: 0.0,
            offset: Vec3::ZERO,
            probability: DEFAULT_PROBABILITY,
            base_probability: DEFAULT_PROBABILITY,
        }
    }

    /// A slot with no asset assigned (a broken or stripped template entry).
    pub fn empty() -> Self {
        Self {
            asset: None,
            rotation: 0.0,
            offset: Vec3::ZERO,
            probability: DEFAULT_PROBABILITY,
            base_probability: DEFAULT_PROBABILITY,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Sets both the live and the authored probability.
    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = probability;
        self.base_probability = probability;
        self
    }

    pub fn shows(&self, asset: &AssetRef) -> bool {
        self.asset.as_ref() == Some(asset)
    }
}
