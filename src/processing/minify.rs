//! Text minification backend.
//!
//! Delegates the actual minification to the `minifier` crate; this module
//! only routes by kind and derives artifact names.

use crate::utils::{base_name, FileKind, OptimizerError, OptimizerResult};

/// Minifies JS or CSS source text.
///
/// Callers are expected to run this on the blocking thread pool; large
/// bundles can take a while.
pub fn minify_text(source: &str, kind: FileKind) -> OptimizerResult<String> {
    match kind {
        FileKind::Js => Ok(minifier::js::minify(source).to_string()),
        FileKind::Css => minifier::css::minify(source)
            .map(|m| m.to_string())
            .map_err(|e| {
                OptimizerError::minify(format!(
                    "Failed to minify CSS. Ensure the stylesheet is valid: {e}"
                ))
            }),
        FileKind::Image(_) => Err(OptimizerError::minify(
            "Image records cannot be routed to the text backend",
        )),
    }
}

/// Derives the artifact name: `bundle.js` → `bundle.min.js`.
pub fn artifact_name(file_name: &str, kind: FileKind) -> String {
    let extension = match kind {
        FileKind::Css => "min.css",
        _ => "min.js",
    };
    format!("{}.{}", base_name(file_name), extension)
}
