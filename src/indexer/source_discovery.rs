use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// File extensions the monitor uses for its request logs
const LOG_EXTENSIONS: [&str; 2] = ["log", "xml"];

/// Expand command-line inputs into the list of monitor log files to read
///
/// Directories are walked recursively and contribute every `*.log` / `*.xml`
/// file they contain, sorted by path. Anything else is passed through untouched
/// (including paths that do not exist, which fail later when read). The order
/// of `inputs` is preserved, since later sources overwrite earlier ones.
pub fn discover_sources(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = walk_log_dir(input);
            debug!("Found {} log files under {}", found.len(), input.display());
            sources.extend(found);
        } else {
            sources.push(input.clone());
        }
    }

    sources
}

fn walk_log_dir(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && has_log_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LOG_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
