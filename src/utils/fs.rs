use std::path::Path;

/// Extract the file name component, falling back to the whole path string.
pub fn extract_filename(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Strip the extension from a file name, keeping the base.
///
/// `bundle.js` → `bundle`; names without a dot are returned unchanged,
/// matching how the original names were derived for download.
pub fn base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}
