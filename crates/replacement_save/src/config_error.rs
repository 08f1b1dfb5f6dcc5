// ---------------------------------------------------------------------------
// ConfigError: error type for replacement config encode/decode
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur reading or writing a replacement configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading or writing the config file.
    Io(std::io::Error),
    /// The JSON text is malformed or does not match the record layout.
    Json(serde_json::Error),
    /// Bitcode decoding failed (corrupt or truncated payload).
    Decode(String),
    /// The config was written by a newer build.
    VersionMismatch { expected_max: u32, found: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            ConfigError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: config is v{found}, but this build only supports up to v{expected_max}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<bitcode::Error> for ConfigError {
    fn from(e: bitcode::Error) -> Self {
        ConfigError::Decode(e.to_string())
    }
}
