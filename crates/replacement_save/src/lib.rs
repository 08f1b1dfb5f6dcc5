//! Persisted replacement configuration: by-value records, JSON and bitcode
//! codecs, re-apply on load, and save-file integration.

pub mod capture;
pub mod codec;
pub mod config_error;
pub mod load;
pub mod records;
pub mod save_plugin;
pub mod saveable_ext;


pub use config_error::ConfigError;
pub use load::LoadReport;
pub use records::{ReplacementConfig, ReplacementRecord, TemplateReplacements};
pub use save_plugin::{
    ExportReplacementConfig, ImportReplacementConfig, ReplacementSavePlugin, SavedReplacements,
};
pub use saveable_ext::SaveableAppExt;
