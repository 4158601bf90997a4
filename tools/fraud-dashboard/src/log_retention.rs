use crate::errors::DashboardError;
use std::fs;
use std::path::{Path, PathBuf};

/// Deletes the oldest `.jsonl` files in `dir` until the total fits `budget_bytes`.
/// The active log at `keep` is never removed.
pub fn enforce_total_budget(
    dir: &Path,
    budget_bytes: u64,
    keep: &Path,
) -> Result<Vec<PathBuf>, DashboardError> {
    let mut files = fs::read_dir(dir)
        .map_err(|e| DashboardError::Io(e.to_string()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == "jsonl"))
        .collect::<Vec<_>>();

    files.sort_by(|a, b| {
        let ma = fs::metadata(a).ok().and_then(|m| m.modified().ok());
        let mb = fs::metadata(b).ok().and_then(|m| m.modified().ok());
        ma.cmp(&mb)
    });

    let mut total = files
        .iter()
        .filter_map(|path| fs::metadata(path).ok().map(|meta| meta.len()))
        .sum::<u64>();

    let mut deleted = Vec::new();
    for path in files {
        if total <= budget_bytes {
            break;
        }
        if path == keep {
            continue;
        }
        let len = fs::metadata(&path)
            .map_err(|e| DashboardError::Io(e.to_string()))?
            .len();
        fs::remove_file(&path).map_err(|e| DashboardError::Io(e.to_string()))?;
        total = total.saturating_sub(len);
        deleted.push(path);
    }

    Ok(deleted)
}
