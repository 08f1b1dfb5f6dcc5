//! Template catalog: the loaded building and network templates whose slots the
//! replacement layers rewrite.
//!
//! The engine never holds references into template storage. It addresses a
//! slot by `(TemplateId, SlotPath)` and goes through the [`TemplateCatalog`]
//! trait for every read and write, so the only code that touches template
//! storage directly is the adapter that implements the trait.

pub mod access;
pub mod prefabs;
pub mod types;


pub use access::TemplateCatalog;
pub use prefabs::{BuildingTemplate, NetLane, NetworkTemplate, PrefabCatalog};
pub use types::{PropSlot, SlotPath, TemplateId, TemplateKind};
