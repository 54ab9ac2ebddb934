//! Path component checks for clip names

use std::path::{Path, PathBuf};

/// Characters that cannot appear in a file name on at least one supported platform
const INVALID_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names reserved on Windows regardless of extension
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// Check that `name` can be used as a single path component.
    ///
    /// Returns a human-readable reason on rejection.
    pub fn validate_component(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("name is empty".to_string());
        }
        if name == "." || name == ".." {
            return Err(format!("'{}' is not a valid file name", name));
        }
        if let Some(ch) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(format!("invalid character '{}'", ch));
        }
        if name.chars().any(char::is_control) {
            return Err("control characters are not allowed".to_string());
        }

        let stem = name.split('.').next().unwrap_or(name).to_uppercase();
        if RESERVED_NAMES.contains(&stem.as_str()) {
            return Err(format!("reserved name '{}' not allowed", stem));
        }

        Ok(())
    }

    /// Build `<dir>/<name>.<extension>`
    pub fn clip_destination(dir: &Path, name: &str, extension: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, extension))
    }
}
