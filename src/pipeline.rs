use crate::apod::{ApodClient, MediaDescriptor, image_extension};
use crate::archive::archive_image;
use crate::autorun::AutorunInstaller;
use crate::config::{AutorunState, Preferences};
use crate::desktop::WallpaperSetter;
use crate::Result;
use std::path::{Path, PathBuf};

/// Sequences the daily run: fetch, download, apply, then the best-effort
/// archive and autorun extensions. Preferences are loaded once up front and
/// threaded through explicitly; the only mid-run write-back is the
/// `PendingEnable -> Configured` transition after a successful install.
pub struct Pipeline {
    config_path: PathBuf,
    program_path: PathBuf,
    output_dir: PathBuf,
    archive_dir: PathBuf,
    wallpaper: Box<dyn WallpaperSetter>,
    autorun: Box<dyn AutorunInstaller>,
}

impl Pipeline {
    pub fn new(
        config_path: PathBuf,
        program_path: PathBuf,
        output_dir: PathBuf,
        archive_dir: PathBuf,
        wallpaper: Box<dyn WallpaperSetter>,
        autorun: Box<dyn AutorunInstaller>,
    ) -> Self {
        Self {
            config_path,
            program_path,
            output_dir,
            archive_dir,
            wallpaper,
            autorun,
        }
    }

    /// Any failure up to and including the wallpaper apply aborts the run.
    pub async fn run(&self, client: &ApodClient) -> Result<()> {
        let prefs = Preferences::load(&self.config_path);

        println!("Fetching NASA APOD...");
        let descriptor = client.fetch().await?;
        println!("Title: {}", descriptor.title);

        let url = descriptor.download_url().to_string();
        println!("Image URL: {}", url);

        let output_path = self
            .output_dir
            .join(format!("apod_wallpaper.{}", image_extension(&url)));
        println!("Downloading image to: {}", output_path.display());
        client.download_image(&url, &output_path).await?;
        println!("Image downloaded successfully!");

        println!("Setting as wallpaper...");
        self.wallpaper.apply(&output_path)?;
        println!("Wallpaper set successfully!");

        self.finish(prefs, &descriptor, &output_path)
    }

    /// Archive and autorun run after the wallpaper is set, so their failures
    /// are logged without affecting the exit code. Persisting the advanced
    /// autorun state is still fatal: silently staying in `PendingEnable`
    /// would re-register the schedule on every run.
    fn finish(
        &self,
        prefs: Preferences,
        descriptor: &MediaDescriptor,
        image: &Path,
    ) -> Result<()> {
        if prefs.save {
            println!("Archiving image...");
            if let Err(e) = archive_image(&self.archive_dir, image, &descriptor.title) {
                eprintln!("Failed to archive image: {e}");
            }
        }

        match prefs.autorun {
            AutorunState::PendingEnable => {
                println!("Setting up daily auto-run...");
                match self.autorun.install(&self.program_path) {
                    Ok(()) => {
                        let updated = Preferences {
                            autorun: AutorunState::Configured,
                            ..prefs
                        };
                        updated.persist(&self.config_path)?;
                        println!("Auto-run configured successfully!");
                    }
                    Err(e) => eprintln!("Failed to set up auto-run: {e}"),
                }
            }
            AutorunState::Configured => {
                println!("Auto-run already configured");
            }
            AutorunState::Disabled => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct NoopSetter;

    impl WallpaperSetter for NoopSetter {
        fn apply(&self, _image: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Clone)]
    struct FakeInstaller {
        installs: Rc<Cell<usize>>,
        fail: bool,
    }

    impl FakeInstaller {
        fn new(fail: bool) -> Self {
            Self {
                installs: Rc::new(Cell::new(0)),
                fail,
            }
        }
    }

    impl AutorunInstaller for FakeInstaller {
        fn is_installed(&self, _program: &Path) -> Result<bool> {
            Ok(false)
        }

        fn install(&self, _program: &Path) -> Result<()> {
            self.installs.set(self.installs.get() + 1);
            if self.fail {
                Err(Error::DesktopEnv("scheduler unavailable".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn descriptor(title: &str) -> MediaDescriptor {
        serde_json::from_str(&format!(
            r#"{{"media_type":"image","url":"http://x/y/pic.png","title":"{title}"}}"#
        ))
        .unwrap()
    }

    fn pipeline(dir: &TempDir, installer: FakeInstaller) -> Pipeline {
        Pipeline::new(
            dir.path().join("apod-settings.conf"),
            PathBuf::from("/usr/local/bin/apod-bg"),
            dir.path().to_path_buf(),
            dir.path().join("apod_archive"),
            Box::new(NoopSetter),
            Box::new(installer),
        )
    }

    fn image_at(dir: &TempDir) -> PathBuf {
        let image = dir.path().join("apod_wallpaper.png");
        fs::write(&image, b"pixels").unwrap();
        image
    }

    #[test]
    fn pending_enable_becomes_configured_after_install() {
        let dir = TempDir::new().unwrap();
        let installer = FakeInstaller::new(false);
        let installs = installer.installs.clone();
        let pipeline = pipeline(&dir, installer);
        let image = image_at(&dir);

        let prefs = Preferences {
            save: false,
            autorun: AutorunState::PendingEnable,
        };
        pipeline.finish(prefs, &descriptor("T"), &image).unwrap();

        assert_eq!(installs.get(), 1);
        let persisted = Preferences::load(&dir.path().join("apod-settings.conf"));
        assert_eq!(persisted.autorun, AutorunState::Configured);
        assert!(!persisted.save);
    }

    #[test]
    fn configured_state_skips_install_entirely() {
        let dir = TempDir::new().unwrap();
        let installer = FakeInstaller::new(false);
        let installs = installer.installs.clone();
        let pipeline = pipeline(&dir, installer);
        let image = image_at(&dir);

        let prefs = Preferences {
            save: false,
            autorun: AutorunState::Configured,
        };
        pipeline.finish(prefs, &descriptor("T"), &image).unwrap();

        assert_eq!(installs.get(), 0);
    }

    #[test]
    fn failed_install_leaves_state_pending_and_run_successful() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir, FakeInstaller::new(true));
        let image = image_at(&dir);

        let prefs = Preferences {
            save: false,
            autorun: AutorunState::PendingEnable,
        };
        pipeline.finish(prefs, &descriptor("T"), &image).unwrap();

        // No write-back on failure: the next run retries the install.
        assert!(!dir.path().join("apod-settings.conf").exists());
    }

    #[test]
    fn save_enabled_archives_under_sanitized_title() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir, FakeInstaller::new(false));
        let image = image_at(&dir);

        let prefs = Preferences {
            save: true,
            autorun: AutorunState::Disabled,
        };
        pipeline
            .finish(prefs, &descriptor("Hi There!"), &image)
            .unwrap();

        assert!(dir.path().join("apod_archive").join("Hi_There_.png").exists());
    }

    #[test]
    fn save_disabled_archives_nothing() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir, FakeInstaller::new(false));
        let image = image_at(&dir);

        let prefs = Preferences {
            save: false,
            autorun: AutorunState::Disabled,
        };
        pipeline.finish(prefs, &descriptor("T"), &image).unwrap();

        assert!(!dir.path().join("apod_archive").exists());
    }

    #[test]
    fn archive_failure_does_not_fail_the_run() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline(&dir, FakeInstaller::new(false));

        let prefs = Preferences {
            save: true,
            autorun: AutorunState::Disabled,
        };
        let missing = dir.path().join("never_downloaded.png");
        pipeline.finish(prefs, &descriptor("T"), &missing).unwrap();
    }
}
