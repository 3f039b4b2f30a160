//! Persisted editor preferences.
//!
//! A single preference today: the editor font (family + point size). The
//! store is a small commented `key = value` file at the platform config
//! path, read once at startup and written only when a value changes. The
//! loaded [`Settings`] value is passed explicitly into the app — there is no
//! global settings object.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Smallest usable editor font size in points.
pub const MIN_FONT_SIZE: u16 = 6;
/// Largest usable editor font size in points.
pub const MAX_FONT_SIZE: u16 = 72;

const DEFAULT_FONT_FAMILY: &str = "monospace";
const DEFAULT_FONT_SIZE: u16 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub font_family: String,
    pub font_size: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Settings {
    /// Parse a font spec like `"JetBrains Mono 14"`; a bare number changes
    /// only the size, a bare name only the family. Sizes are clamped to the
    /// usable range. Returns `None` for blank input.
    pub fn with_font_spec(&self, spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }
        let mut next = self.clone();
        match spec.rsplit_once(char::is_whitespace) {
            Some((family, size)) if size.parse::<u16>().is_ok() => {
                next.font_family = family.trim().to_string();
                next.font_size = clamp_size(size.parse().unwrap_or(DEFAULT_FONT_SIZE));
            }
            _ => {
                if let Ok(size) = spec.parse::<u16>() {
                    next.font_size = clamp_size(size);
                } else {
                    next.font_family = spec.to_string();
                }
            }
        }
        Some(next)
    }

    /// The font rendered as a single editable spec string.
    pub fn font_spec(&self) -> String {
        format!("{} {}", self.font_family, self.font_size)
    }
}

fn clamp_size(size: u16) -> u16 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// Platform-appropriate path of the settings file.
pub fn settings_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("jot").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("jot")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("jot").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("jot").join("config");
        }
    }

    PathBuf::from(".jotrc")
}

/// Load settings from `path`; a missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings {}", path.display()))?;

    let mut settings = Settings::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match (key.trim(), value.trim()) {
            ("font-family", family) if !family.is_empty() => {
                settings.font_family = family.to_string();
            }
            ("font-size", size) => {
                if let Ok(size) = size.parse::<u16>() {
                    settings.font_size = clamp_size(size);
                }
            }
            // Unknown keys are ignored so newer files still load.
            _ => {}
        }
    }
    Ok(settings)
}

/// Write settings to `path`, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let content = format!(
        "# jot settings\nfont-family = {}\nfont-size = {}\n",
        settings.font_family, settings.font_size
    );
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create settings dir {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write settings {}", path.display()))
}
