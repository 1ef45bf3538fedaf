use log::info;
use std::fs;
use std::path::Path;

pub mod security;

/// Makes sure the directory holding the SQLite file exists before the
/// first connection is opened.
pub fn ensure_data_dir(database_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating data directory {}...", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
