//! Resolving user-supplied paths against a project root

use std::path::Path;

use walkdir::WalkDir;

use crate::scanner::WalkFilter;

/// Resolve `input` to a file path.
///
/// Tried in order: an existing absolute path, `root/input`, the first file
/// under `root` whose path ends with `input`. When nothing matches the
/// input is returned unchanged.
#[must_use]
pub fn resolve_path(root: &Path, input: &str, filter: &WalkFilter) -> String {
    let candidate = Path::new(input);
    if candidate.is_absolute() && candidate.exists() {
        return input.to_string();
    }

    let joined = root.join(candidate);
    if joined.exists() {
        return joined.display().to_string();
    }

    let mut relative = candidate;
    for prefix in ["./", "/"] {
        if let Ok(stripped) = relative.strip_prefix(prefix) {
            relative = stripped;
        }
    }
    if relative.as_os_str().is_empty() {
        return input.to_string();
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || filter.should_descend(&entry.file_name().to_string_lossy())
        })
        .filter_map(std::result::Result::ok)
        .find(|entry| entry.file_type().is_file() && entry.path().ends_with(relative))
        .map_or_else(|| input.to_string(), |entry| entry.path().display().to_string())
}
