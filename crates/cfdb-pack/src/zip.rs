use std::io::{Cursor, Read};

use ::zip::ZipArchive;

use crate::common::normalize_entry_path;
use crate::{ArchiveEntry, ArchiveError};

/// Reads every non-directory entry of an in-memory zip, in the archive's
/// own enumeration order.
///
/// All entry paths are validated before the first entry is returned, so a
/// single unsafe path rejects the whole archive.
pub fn extract_zip(bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|err| ArchiveError::Corrupt(err.to_string()))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|err| ArchiveError::Corrupt(err.to_string()))?;
        let raw_name = file.name().to_string();
        if file.is_dir() || raw_name.ends_with('\\') {
            continue;
        }
        let path = normalize_entry_path(&raw_name)?;
        // The declared size comes from the uploader; grow with the real data.
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|source| ArchiveError::Io {
                path: raw_name.clone(),
                source,
            })?;
        entries.push(ArchiveEntry { path, content });
    }

    log::debug!("extracted {} files from archive", entries.len());
    Ok(entries)
}
