//! Platform-specific preset directories.
//!
//! User presets live under the platform config directory
//! (`~/.config/bajo/presets/` on Linux, `~/Library/Application Support/bajo/presets/`
//! on macOS, `%APPDATA%\bajo\presets\` on Windows); system presets under a
//! read-only shared directory. [`find_preset`] searches both after trying the
//! name as a literal path.
//!
//! # Example
//!
//! ```rust,no_run
//! use bajo_config::paths;
//!
//! let dir = paths::user_presets_dir();
//! println!("user presets: {:?}", dir);
//!
//! if let Some(path) = paths::find_preset("dub_echo") {
//!     println!("found preset file at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "bajo";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Returns the system-wide presets directory.
///
/// This directory is typically read-only and holds presets installed by a
/// package rather than saved by the user.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by name or path.
///
/// The name can be an absolute or relative path to a TOML file, or a bare
/// preset name with or without the `.toml` extension. Bare names are looked
/// up in the user presets directory, then the system presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    let user_path = user_presets_dir().join(&filename);
    if user_path.is_file() {
        return Some(user_path);
    }

    let system_path = system_presets_dir().join(&filename);
    if system_path.is_file() {
        return Some(system_path);
    }

    None
}

/// Ensure the user presets directory exists, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Helper to list preset files in a directory.
fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "toml").unwrap_or(false)
        })
        .collect()
}

/// Get the preset name from a file path.
///
/// # Example
///
/// ```rust
/// use bajo_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/presets/dub_echo.toml"));
/// assert_eq!(name, Some("dub_echo".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn user_presets_dir_names_the_app() {
        let dir = user_presets_dir();
        let dir_str = dir.to_string_lossy();
        assert!(dir_str.contains("bajo") || dir_str.contains("presets"));
    }

    #[test]
    fn system_presets_dir_names_the_app() {
        let dir = system_presets_dir();
        assert!(dir.to_string_lossy().contains("bajo"));
    }

    #[test]
    fn find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        let found = find_preset(preset_path.to_str().unwrap());
        assert_eq!(found, Some(preset_path));
    }

    #[test]
    fn find_preset_not_found() {
        assert!(find_preset("nonexistent_preset_12345").is_none());
    }

    #[test]
    fn list_presets_keeps_only_toml_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("patch_a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("patch_b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        assert_eq!(presets.len(), 2);
        assert!(presets.iter().all(|p| p.extension().unwrap() == "toml"));
    }

    #[test]
    fn list_presets_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert!(list_presets_in_dir(temp_dir.path()).is_empty());
    }

    #[test]
    fn list_presets_nonexistent_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn preset_name_strips_extension() {
        let path = Path::new("/presets/dub_echo.toml");
        assert_eq!(preset_name_from_path(path), Some("dub_echo".to_string()));

        let path = Path::new("simple.toml");
        assert_eq!(preset_name_from_path(path), Some("simple".to_string()));
    }

    #[test]
    fn ensure_user_presets_dir_does_not_panic() {
        // Whether creation succeeds depends on the environment; the call
        // itself must not panic either way.
        let _ = ensure_user_presets_dir();
    }
}
