use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use apod_bg::config::{CONFIG_FILE_NAME, PrefKey, Preferences};
use apod_bg::runner::SystemRunner;
use apod_bg::{ApodClient, Error, Pipeline, autorun, desktop};

#[derive(Debug, Parser)]
#[command(name = "apod-bg")]
#[command(
    version,
    about = "Downloads today's NASA APOD image and sets it as the desktop wallpaper."
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Update a stored preference without running the pipeline")]
    Set {
        #[arg(value_enum, help = "Preference to change")]
        key: SetKey,
        #[arg(help = "0 to disable, 1 to enable")]
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SetKey {
    #[value(help = "Archive downloaded images")]
    Save,
    #[value(help = "Run daily via the host scheduler")]
    Autorun,
}

// The config file lives next to the executable, not in a search path.
fn config_path() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir.join(CONFIG_FILE_NAME))
}

// Help and version are successful outcomes; every other parse problem
// (unknown command, bad `set` arguments) exits 1 like any pipeline failure.
fn exit_code_for(err: &clap::Error) -> i32 {
    use clap::error::ErrorKind;
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn main() -> anyhow::Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(exit_code_for(&err));
        }
    };
    let config_path = config_path()?;

    match args.command {
        Some(Commands::Set { key, value }) => {
            let enabled = match value.as_str() {
                "0" => false,
                "1" => true,
                _ => {
                    return Err(Error::InvalidArgument(format!(
                        "value for 'set' must be 0 or 1, got '{value}'"
                    ))
                    .into());
                }
            };
            let key = match key {
                SetKey::Save => PrefKey::Save,
                SetKey::Autorun => PrefKey::Autorun,
            };
            Preferences::update(&config_path, key, enabled)?;
            println!(
                "Configuration updated: {}={}",
                match key {
                    PrefKey::Save => "save",
                    PrefKey::Autorun => "autorun",
                },
                value
            );
            Ok(())
        }
        None => {
            let home = dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
            let program_path = std::env::current_exe()?;

            let wallpaper = desktop::detect(Box::new(SystemRunner))?;
            let autorun = autorun::detect(Box::new(SystemRunner))?;
            let pipeline = Pipeline::new(
                config_path,
                program_path,
                home.clone(),
                home.join("apod_archive"),
                wallpaper,
                autorun,
            );

            let client = ApodClient::new();
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(pipeline.run(&client))?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_exits_one() {
        let err = Args::try_parse_from(["apod-bg", "frobnicate"]).unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn invalid_set_key_exits_one() {
        let err = Args::try_parse_from(["apod-bg", "set", "color", "1"]).unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        for flag in ["--help", "-h", "--version"] {
            let err = Args::try_parse_from(["apod-bg", flag]).unwrap_err();
            assert_eq!(exit_code_for(&err), 0, "flag {flag}");
        }
    }

    #[test]
    fn bare_invocation_parses_as_pipeline_run() {
        let args = Args::try_parse_from(["apod-bg"]).unwrap();
        assert!(args.command.is_none());
    }
}
