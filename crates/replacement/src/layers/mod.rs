//! Replacement layers.
//!
//! Each template kind has three [`OverrideManager`]s, one per [`Scope`]:
//! individual slot, whole template (grouped), and every loaded template
//! (global). A manager remembers, for every slot it rewrote, what the slot
//! looked like before, so any replacement can be reverted exactly.
//!
//! A slot is governed by at most one manager at a time. Priority is
//! individual > grouped > global and is encoded as the manager order inside a
//! [`LayerSet`]. When a higher scope claims a slot held by a lower scope, the
//! lower manager hands over its snapshot and forgets the slot. When the higher
//! scope later reverts, the slot goes back to its original asset; putting a
//! shadowed lower-scope replacement back on it is a separate `restore` call the
//! caller makes (see [`OverrideLayers::restore_shadowed`]).

pub mod entry;
pub mod manager;
pub mod overrides;
pub mod record;
pub mod resolver;
pub mod scope;
pub mod summary;


pub use entry::{ApplyRequest, EntryKey, OverrideEntry, Placement};
pub use manager::{ApplyOutcome, OverrideManager, RejectReason, ReleasedSlot};
pub use overrides::OverrideLayers;
pub use record::{PlacementRecord, TransformDelta};
pub use resolver::LayerSet;
pub use scope::Scope;
pub use summary::SlotSummary;
