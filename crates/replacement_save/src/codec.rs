// ---------------------------------------------------------------------------
// Encode / decode for ReplacementConfig (JSON file + bitcode payload)
// ---------------------------------------------------------------------------

use std::path::Path;

use replacement::config::CONFIG_VERSION;

use crate::config_error::ConfigError;
use crate::records::ReplacementConfig;

impl ReplacementConfig {
    /// Reject configurations written by a newer build.
    pub fn check_version(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch {
                expected_max: CONFIG_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }

    /// Pretty-printed JSON, for the hand-editable config file.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ReplacementConfig = serde_json::from_str(text)?;
        config.check_version()?;
        Ok(config)
    }

    /// Compact binary form used inside save files.
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: ReplacementConfig = bitcode::decode(bytes)?;
        config.check_version()?;
        Ok(config)
    }

    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn write_file(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
