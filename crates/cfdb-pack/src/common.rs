use cfdb_core::check_relative_path;

use crate::ArchiveError;

/// Turns `\` separators into `/`, strips one leading `./`, and rejects
/// paths that would land outside the folder they are published under.
pub fn normalize_entry_path(raw: &str) -> Result<String, ArchiveError> {
    let separated = raw.replace('\\', "/");
    let path = separated.strip_prefix("./").unwrap_or(&separated);
    check_relative_path(path).map_err(|reason| ArchiveError::UnsafePath {
        path: raw.to_string(),
        reason,
    })?;
    Ok(path.to_string())
}
