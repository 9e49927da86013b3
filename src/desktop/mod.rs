use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

pub mod linux;
pub mod macos;
pub mod windows;

/// Sets the desktop background. One implementation per host platform,
/// selected once at startup; a failed apply is a terminal pipeline failure.
pub trait WallpaperSetter {
    fn apply(&self, image: &Path) -> Result<()>;
}

/// Picks the wallpaper variant for the detected host OS. There is no
/// runtime re-detection after this point.
pub fn detect(runner: Box<dyn CommandRunner>) -> Result<Box<dyn WallpaperSetter>> {
    match std::env::consts::OS {
        "macos" => Ok(Box::new(macos::MacosWallpaper::new(runner))),
        "linux" => Ok(Box::new(linux::LinuxWallpaper::new(runner))),
        "windows" => Ok(Box::new(windows::WindowsWallpaper::new(runner))),
        other => Err(Error::PlatformUnsupported(other.to_string())),
    }
}
