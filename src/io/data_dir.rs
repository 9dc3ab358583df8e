use std::path::{Path, PathBuf};

/// Name of the directory holding tasks.json and config.toml
pub const DATA_DIR_NAME: &str = ".jot";

/// Find the data directory by walking up from `start`, looking for a `.jot/`
/// subdirectory. Falls back to `start/.jot` (created on first save).
pub fn discover_data_dir(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return candidate;
        }
        if !current.pop() {
            return start.join(DATA_DIR_NAME);
        }
    }
}
