//! Per-slot snapshots and the transform delta a replacement applies.

use bevy::math::Vec3;

use crate::catalog::{PropSlot, SlotPath, TemplateId};

/// Adjustment a replacement applies on top of a slot's original transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformDelta {
    /// Degrees added to the original rotation.
    pub rotation: f32,
    /// Added to the original offset.
    pub offset: Vec3,
    /// Spawn probability written to the slot. Ignored by global scope.
    pub probability: Option<u8>,
}

impl TransformDelta {
    pub fn new(rotation: f32, offset: Vec3) -> Self {
        Self {
            rotation,
            offset,
            probability: None,
        }
    }

    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }
}

/// What one governed slot looked like before the replacement touched it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    pub template: TemplateId,
    pub path: SlotPath,
    pub original_rotation: f32,
    pub original_offset: Vec3,
    pub original_probability: u8,
}

impl PlacementRecord {
    pub fn snapshot(template: TemplateId, path: SlotPath, slot: &PropSlot) -> Self {
        Self {
            template,
            path,
            original_rotation: slot.rotation,
            original_offset: slot.offset,
            original_probability: slot.probability,
        }
    }

    pub fn addresses(&self, template: TemplateId, path: SlotPath) -> bool {
        self.template == template && self.path == path
    }
}
