//! Frame sinks.
//!
//! Sinks receive rendered frames in increasing frame order from
//! [`crate::RenderSession::render_range`].

/// MP4 output through the system `ffmpeg`.
pub mod ffmpeg;
/// Numbered PNG files.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::IntroResult;

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> IntroResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
