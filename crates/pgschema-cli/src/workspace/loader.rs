use std::fs;
use std::path::{Path, PathBuf};

use pgschema_core::RawDocument;
use tracing::debug;

use super::WorkspaceResult;

/// Recursively collect `.json` files below `root`, sorted by path so the
/// processing order (and first-seen-wins for duplicate tables) is stable.
pub fn discover_schema_files(root: &Path) -> WorkspaceResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_json_files(root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Read and parse every schema document below `root`. Unreadable or
/// unparsable files become failed documents instead of aborting the load.
pub fn load_documents(root: &Path) -> WorkspaceResult<Vec<RawDocument>> {
    let documents: Vec<RawDocument> = discover_schema_files(root)?
        .iter()
        .map(|path| read_document(path))
        .collect();
    debug!(root = %root.display(), documents = documents.len(), "schema documents loaded");
    Ok(documents)
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> WorkspaceResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_json_files(&path, files)?;
        } else if file_type.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(())
}

fn read_document(path: &Path) -> RawDocument {
    let source = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(value) => RawDocument::parsed(source, value),
            Err(err) => RawDocument::failed(source, err.to_string()),
        },
        Err(err) => RawDocument::failed(source, err.to_string()),
    }
}
