use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::OptimizerError;

/// Classified kind of an intake file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Js,
    Css,
    Image(ImageFormat),
}

impl FileKind {
    /// Classify a path by its lowercase extension.
    ///
    /// Returns `None` for unsupported extensions; unknown files never enter
    /// the registry.
    pub fn classify(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref()
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase();
        match ext.as_str() {
            "js" => Some(Self::Js),
            "css" => Some(Self::Css),
            "jpg" | "jpeg" => Some(Self::Image(ImageFormat::Jpeg)),
            "png" => Some(Self::Image(ImageFormat::Png)),
            _ => None,
        }
    }

    /// Whether this kind is routed to the text minification backend.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Js | Self::Css)
    }

    /// Whether this kind is routed to the image recompression backend.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    /// Human-readable label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Js => "JS",
            Self::Css => "CSS",
            Self::Image(ImageFormat::Jpeg) => "JPEG",
            Self::Image(ImageFormat::Png) => "PNG",
            Self::Image(ImageFormat::WebP) => "WebP",
        }
    }
}

/// Raster image formats the recompression backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::WebP => &["webp"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }
}

impl FromStr for ImageFormat {
    type Err = OptimizerError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(OptimizerError::format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_supported_extensions() {
        assert_eq!(FileKind::classify("app.js"), Some(FileKind::Js));
        assert_eq!(FileKind::classify("style.css"), Some(FileKind::Css));
        assert_eq!(
            FileKind::classify("photo.jpg"),
            Some(FileKind::Image(ImageFormat::Jpeg))
        );
        assert_eq!(
            FileKind::classify("photo.jpeg"),
            Some(FileKind::Image(ImageFormat::Jpeg))
        );
        assert_eq!(
            FileKind::classify("icon.png"),
            Some(FileKind::Image(ImageFormat::Png))
        );
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(FileKind::classify("APP.JS"), Some(FileKind::Js));
        assert_eq!(
            FileKind::classify("PHOTO.Jpeg"),
            Some(FileKind::Image(ImageFormat::Jpeg))
        );
    }

    #[test]
    fn classify_rejects_unknown() {
        assert_eq!(FileKind::classify("readme.txt"), None);
        assert_eq!(FileKind::classify("vector.svg"), None);
        assert_eq!(FileKind::classify("noextension"), None);
    }

    #[test]
    fn image_format_from_str() {
        assert_eq!("jpeg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert!("gif".parse::<ImageFormat>().is_err());
    }
}
