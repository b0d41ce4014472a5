/// Checks that a slash-separated path stays inside the folder it is joined
/// onto. Returns the reason on failure.
pub fn check_relative_path(path: &str) -> Result<(), &'static str> {
    if path.trim().is_empty() {
        return Err("path is required");
    }
    if path.starts_with('/') || has_drive_prefix(path) {
        return Err("path must be relative");
    }
    if path.contains('\\') {
        return Err("path must use '/' separators");
    }
    if path.split('/').any(|segment| segment.is_empty()) {
        return Err("path contains an empty segment");
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err("path contains a parent segment");
    }
    Ok(())
}

fn has_drive_prefix(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}
