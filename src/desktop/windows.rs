use super::WallpaperSetter;
use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

// SPI_SETDESKWALLPAPER with SPIF_UPDATEINIFILE | SPIF_SENDCHANGE.
const SET_WALLPAPER_TYPE: &str = r#"using System.Runtime.InteropServices;
public class Wallpaper {
    [DllImport("user32.dll", CharSet = CharSet.Auto)]
    public static extern int SystemParametersInfo(int uAction, int uParam, string lpvParam, int fuWinIni);
}"#;

pub struct WindowsWallpaper {
    runner: Box<dyn CommandRunner>,
}

impl WindowsWallpaper {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl WallpaperSetter for WindowsWallpaper {
    fn apply(&self, image: &Path) -> Result<()> {
        let script = format!(
            "Add-Type -TypeDefinition '{}'; [Wallpaper]::SystemParametersInfo(20, 0, '{}', 3)",
            SET_WALLPAPER_TYPE,
            image.display()
        );

        let output = self
            .runner
            .run("powershell", &["-NoProfile", "-Command", &script])?;
        if !output.status.success() {
            return Err(Error::DesktopEnv(format!(
                "Failed to set wallpaper: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}
