use super::AutorunInstaller;
use crate::runner::CommandRunner;
use crate::{Error, Result};
use std::path::Path;

const TASK_NAME: &str = "apod-bg-daily";

/// Daily Task Scheduler entry at 09:00 for Windows.
pub struct TaskSchedulerInstaller {
    runner: Box<dyn CommandRunner>,
}

impl TaskSchedulerInstaller {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl AutorunInstaller for TaskSchedulerInstaller {
    fn is_installed(&self, program: &Path) -> Result<bool> {
        // Query fails when the task does not exist. When it does, verify the
        // registered action still references this program path, in case the
        // persisted state is out of sync with the scheduler.
        let output = self
            .runner
            .run("schtasks", &["/Query", "/TN", TASK_NAME, "/V", "/FO", "LIST"])?;
        if !output.status.success() {
            return Ok(false);
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let needle = program.display().to_string();
        Ok(listing.contains(&needle))
    }

    fn install(&self, program: &Path) -> Result<()> {
        if self.is_installed(program)? {
            println!("Scheduled task already exists");
            return Ok(());
        }

        let program = program.display().to_string();
        let output = self.runner.run(
            "schtasks",
            &[
                "/Create", "/F", "/SC", "DAILY", "/ST", "09:00", "/TN", TASK_NAME, "/TR", &program,
            ],
        )?;
        if !output.status.success() {
            return Err(Error::DesktopEnv(format!(
                "Failed to create scheduled task: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::{FakeResponse, FakeRunner};
    use std::rc::Rc;

    #[test]
    fn existing_task_short_circuits_install() {
        let runner = Rc::new(FakeRunner::new(vec![FakeResponse::ok_with(
            "TaskName: \\apod-bg-daily\nTask To Run: C:\\tools\\apod-bg.exe\n",
        )]));
        let installer = TaskSchedulerInstaller::new(Box::new(runner.clone()));

        installer
            .install(Path::new("C:\\tools\\apod-bg.exe"))
            .unwrap();

        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn missing_task_is_created() {
        let runner = Rc::new(FakeRunner::new(vec![
            FakeResponse::fail(),
            FakeResponse::ok(),
        ]));
        let installer = TaskSchedulerInstaller::new(Box::new(runner.clone()));

        installer
            .install(Path::new("C:\\tools\\apod-bg.exe"))
            .unwrap();

        assert_eq!(runner.call_count(), 2);
        let create = runner.call(1);
        assert_eq!(create[0], "schtasks");
        assert!(create.contains(&"/Create".to_string()));
        assert!(create.contains(&"C:\\tools\\apod-bg.exe".to_string()));
    }

    #[test]
    fn stale_task_for_other_program_is_reinstalled() {
        let runner = Rc::new(FakeRunner::new(vec![
            FakeResponse::ok_with("Task To Run: C:\\somewhere\\else.exe\n"),
            FakeResponse::ok(),
        ]));
        let installer = TaskSchedulerInstaller::new(Box::new(runner.clone()));

        installer
            .install(Path::new("C:\\tools\\apod-bg.exe"))
            .unwrap();

        assert_eq!(runner.call_count(), 2);
    }
}
