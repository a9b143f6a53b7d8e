use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{WorkspaceError, WorkspaceResult};

/// Replace the dataset file at `path` (by default `data/data.json`) with
/// `rendered`.
///
/// The text is staged in a hidden sibling file and renamed over the target, so
/// readers only ever see the previous dataset or the complete new one. Missing
/// parent directories are created.
pub fn write_dataset(path: &Path, rendered: &str) -> WorkspaceResult<()> {
    let staging = staging_path(path)?;
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }

    let mut file = File::create(&staging)?;
    file.write_all(rendered.as_bytes())?;
    file.sync_all()?;
    drop(file);

    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error.into());
    }
    tracing::debug!(path = %path.display(), bytes = rendered.len(), "dataset file replaced");
    Ok(())
}

/// `data/data.json` stages through `data/.data.json.partial`.
fn staging_path(path: &Path) -> WorkspaceResult<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(WorkspaceError::Invalid(format!(
            "dataset path has no file name: {}",
            path.display()
        )));
    };
    Ok(path.with_file_name(format!(".{}.partial", name.to_string_lossy())))
}
