//! Content loaders for reading scene data from files.
//!
//! Loaders convert RON/TOML files into validated core types. File formats
//! are private mirror structs kept RON-friendly; the core types themselves
//! never dictate the on-disk shape.

pub mod level;
pub mod tuning;

pub use level::{LevelLoader, LevelWarning, LoadedLevel};
pub use tuning::TuningLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
