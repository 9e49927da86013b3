use super::AutorunInstaller;
use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

/// Daily crontab entry at 09:00 for Linux and macOS.
pub struct CronInstaller {
    runner: Box<dyn CommandRunner>,
}

impl CronInstaller {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl AutorunInstaller for CronInstaller {
    fn is_installed(&self, program: &Path) -> Result<bool> {
        // `crontab -l` fails when the user has no crontab yet; that simply
        // means no entry is installed.
        let output = self.runner.run("crontab", &["-l"])?;
        if !output.status.success() {
            return Ok(false);
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let needle = program.display().to_string();
        Ok(listing.lines().any(|line| line.contains(&needle)))
    }

    fn install(&self, program: &Path) -> Result<()> {
        if self.is_installed(program)? {
            println!("Cron job already exists");
            return Ok(());
        }

        let entry = format!("0 9 * * * {}", program.display());
        let script = format!("(crontab -l 2>/dev/null; echo '{}') | crontab -", entry);
        let output = self.runner.run("sh", &["-c", &script])?;
        if !output.status.success() {
            return Err(Error::DesktopEnv(format!(
                "Failed to install cron job: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}
