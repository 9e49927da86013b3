use std::process::{Command, Output};

/// Executes external commands on behalf of the platform capabilities.
/// Injectable so tests can substitute a recording stub for real OS calls.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<Output>;
}

/// Runs commands through `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<Output> {
        Command::new(program).args(args).output()
    }
}
