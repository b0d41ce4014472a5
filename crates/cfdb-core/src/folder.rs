use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Unique path prefix for one upload: the display name with every
/// character outside `[A-Za-z0-9]` replaced by `_`, then `_<millis>`.
///
/// Two uploads with the same display name in the same millisecond collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FolderName(String);

impl FolderName {
    pub fn derive(display_name: &str, timestamp_millis: u64) -> Self {
        Self(format!("{}_{}", sanitize(display_name), timestamp_millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn join(&self, relative: &str) -> String {
        format!("{}/{}", self.0, relative)
    }
}

impl std::fmt::Display for FolderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

fn sanitize(display_name: &str) -> String {
    display_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}
