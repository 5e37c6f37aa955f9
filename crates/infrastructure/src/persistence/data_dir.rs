//! Default location of persisted documents.

use std::path::PathBuf;

/// Returns the platform data directory for the application:
/// - Linux: `~/.local/share/courier`
/// - macOS: `~/Library/Application Support/courier`
/// - Windows: `%APPDATA%\courier`
///
/// Falls back to `./data` when the platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("data"), |p| p.join("courier"))
}
