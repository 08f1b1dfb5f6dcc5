/// Spawn probability (percent) a slot reports when nothing has overridden it.
pub const DEFAULT_PROBABILITY: u8 = 100;

/// Upper bound for any spawn probability written into a slot.
pub const MAX_PROBABILITY: u8 = 100;

/// Persisted `target_index` for replacements that cover more than one slot.
pub const GROUPED_TARGET_INDEX: i32 = -1;

/// Persisted `lane_index` for building slots and non-individual network records.
pub const NO_LANE_INDEX: i32 = -1;

/// Current layout of the persisted replacement configuration.
pub const CONFIG_VERSION: u32 = 1;
