use super::WallpaperSetter;
use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

pub struct MacosWallpaper {
    runner: Box<dyn CommandRunner>,
}

impl MacosWallpaper {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl WallpaperSetter for MacosWallpaper {
    fn apply(&self, image: &Path) -> Result<()> {
        let script = format!(
            "tell application \"Finder\" to set desktop picture to POSIX file \"{}\"",
            image.display()
        );

        let output = self.runner.run("osascript", &["-e", &script])?;
        if !output.status.success() {
            return Err(Error::DesktopEnv(format!(
                "Failed to set wallpaper: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}
