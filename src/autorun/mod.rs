use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

pub mod cron;
pub mod task_scheduler;

/// Registers a recurring daily invocation of the program with the host
/// scheduler. Installation is idempotent: an entry that already references
/// the program path is left alone and counts as success.
pub trait AutorunInstaller {
    fn is_installed(&self, program: &Path) -> Result<bool>;
    fn install(&self, program: &Path) -> Result<()>;
}

/// Picks the scheduler variant for the detected host OS.
pub fn detect(runner: Box<dyn CommandRunner>) -> Result<Box<dyn AutorunInstaller>> {
    match std::env::consts::OS {
        "linux" | "macos" => Ok(Box::new(cron::CronInstaller::new(runner))),
        "windows" => Ok(Box::new(task_scheduler::TaskSchedulerInstaller::new(runner))),
        other => Err(Error::PlatformUnsupported(other.to_string())),
    }
}
