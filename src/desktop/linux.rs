use super::WallpaperSetter;
use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

const PLASMA_SCRIPT: &str = r#"
var allDesktops = desktops();
for (i=0;i<allDesktops.length;i++) {
    d = allDesktops[i];
    d.wallpaperPlugin = "org.kde.image";
    d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
    d.writeConfig("Image", "file://IMAGE_PATH");
}
"#;

/// Two-step fallback chain: GNOME's gsettings first, the KDE Plasma shell
/// script only if GNOME reports failure.
pub struct LinuxWallpaper {
    runner: Box<dyn CommandRunner>,
}

impl LinuxWallpaper {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    // A missing binary counts as failure, so a KDE host without gsettings
    // still reaches the Plasma fallback.
    fn try_gnome(&self, image: &Path) -> bool {
        let uri = format!("file://{}", image.display());
        self.runner
            .run(
                "gsettings",
                &["set", "org.gnome.desktop.background", "picture-uri", &uri],
            )
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn try_kde(&self, image: &Path) -> bool {
        let script = PLASMA_SCRIPT.replace("IMAGE_PATH", &image.display().to_string());
        self.runner
            .run(
                "qdbus",
                &[
                    "org.kde.plasmashell",
                    "/PlasmaShell",
                    "org.kde.PlasmaShell.evaluateScript",
                    &script,
                ],
            )
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl WallpaperSetter for LinuxWallpaper {
    fn apply(&self, image: &Path) -> Result<()> {
        if self.try_gnome(image) {
            return Ok(());
        }
        if self.try_kde(image) {
            return Ok(());
        }
        Err(Error::DesktopEnv(
            "Failed to set wallpaper: neither GNOME (gsettings) nor KDE Plasma (qdbus) succeeded"
                .to_string(),
        ))
    }
}
