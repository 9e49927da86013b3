use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Maps every non-alphanumeric character to `_`, preserving length, so any
/// APOD title becomes a portable filename stem.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Copies `source` into `archive_dir` under a title-derived name, creating
/// the directory if needed. A file already present at the destination counts
/// as archived; the copy is skipped and the call succeeds. Dedup is purely
/// name-based, so two different images with the same title collide.
pub fn archive_image(archive_dir: &Path, source: &Path, title: &str) -> Result<PathBuf> {
    fs::create_dir_all(archive_dir)?;

    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpg");
    let dest = archive_dir.join(format!("{}.{}", sanitize_title(title), extension));

    if dest.exists() {
        println!("Image already in archive: {}", dest.display());
        return Ok(dest);
    }

    fs::copy(source, &dest)?;
    println!("Image archived to: {}", dest.display());
    Ok(dest)
}
