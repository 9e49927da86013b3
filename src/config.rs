use crate::Result;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "apod-settings.conf";

/// Autorun lifecycle. Only `PendingEnable -> Configured` happens
/// automatically (after a successful scheduler install); every other
/// transition requires an explicit `set autorun` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutorunState {
    #[default]
    Disabled,
    PendingEnable,
    Configured,
}

impl AutorunState {
    fn from_config(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Self::Disabled),
            "1" => Some(Self::PendingEnable),
            "2" => Some(Self::Configured),
            _ => None,
        }
    }

    fn as_config(self) -> &'static str {
        match self {
            Self::Disabled => "0",
            Self::PendingEnable => "1",
            Self::Configured => "2",
        }
    }
}

/// Preference key addressable through the `set` command.
#[derive(Debug, Clone, Copy)]
pub enum PrefKey {
    Save,
    Autorun,
}

/// The two durable user preferences, stored as `key=value` lines next to
/// the executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub save: bool,
    pub autorun: AutorunState,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            save: true,
            autorun: AutorunState::Disabled,
        }
    }
}

impl Preferences {
    /// Reads preferences from `path`. A missing or unreadable file, as well
    /// as missing or unrecognized keys, fall back to defaults; loading never
    /// fails the run.
    pub fn load(path: &Path) -> Self {
        let mut prefs = Self::default();

        let Ok(content) = fs::read_to_string(path) else {
            return prefs;
        };

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match (key.trim(), value.trim()) {
                ("save", "0") => prefs.save = false,
                ("save", "1") => prefs.save = true,
                ("autorun", value) => {
                    if let Some(state) = AutorunState::from_config(value) {
                        prefs.autorun = state;
                    }
                }
                _ => {}
            }
        }

        prefs
    }

    /// Rewrites the whole config file from the canonical template. Keys and
    /// comments outside the two-field schema are intentionally dropped so the
    /// file on disk always matches a known-good layout.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let content = format!(
            "# NASA APOD Settings Configuration\n\
             \n\
             # Save downloaded images to an archive folder (0 = disabled, 1 = enabled)\n\
             save={}\n\
             \n\
             # Auto-run daily (0 = disabled, 1 = enabled, 2 = already configured - ignore)\n\
             autorun={}\n",
            if self.save { "1" } else { "0" },
            self.autorun.as_config(),
        );
        fs::write(path, content)?;
        Ok(())
    }

    /// Load-modify-persist for a single key; backs the `set` CLI command.
    pub fn update(path: &Path, key: PrefKey, enabled: bool) -> Result<Self> {
        let mut prefs = Self::load(path);
        match key {
            PrefKey::Save => prefs.save = enabled,
            PrefKey::Autorun => {
                prefs.autorun = if enabled {
                    AutorunState::PendingEnable
                } else {
                    AutorunState::Disabled
                };
            }
        }
        prefs.persist(path)?;
        Ok(prefs)
    }
}
