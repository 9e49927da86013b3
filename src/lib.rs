pub mod apod;
pub mod archive;
pub mod autorun;
pub mod config;
pub mod desktop;
pub mod pipeline;
pub mod runner;

pub use apod::{ApodClient, MediaDescriptor};
pub use config::{AutorunState, Preferences};
pub use pipeline::Pipeline;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse APOD response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Today's APOD is not an image (media type: {0})")]
    UnsupportedMediaType(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Unsupported platform: {0}")]
    PlatformUnsupported(String),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Desktop environment error: {0}")]
    DesktopEnv(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
