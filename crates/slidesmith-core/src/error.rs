//! Error types for deck building.

use thiserror::Error;

use crate::probe::ProbeError;

/// Result type for deck building operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors that abort a deck build
///
/// Most representation problems degrade to [`crate::diagnostics`]
/// warnings. Image references are the exception since a slide with a
/// missing picture is worse than no deck at all.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Image reference that is neither absolute nor resolvable
    #[error("Unsupported image location: {url}")]
    UnsupportedImageLocation { url: String },

    /// Image could not be fetched or measured
    #[error("Failed to fetch image {url}: {cause}")]
    ImageFetch {
        url: String,
        #[source]
        cause: ProbeError,
    },
}

impl DeckError {
    /// Create an unsupported image location error
    pub fn unsupported_image_location(url: impl Into<String>) -> Self {
        Self::UnsupportedImageLocation { url: url.into() }
    }

    /// Create an image fetch error
    pub fn image_fetch(url: impl Into<String>, cause: ProbeError) -> Self {
        Self::ImageFetch {
            url: url.into(),
            cause,
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedImageLocation { .. } => "SLD001",
            Self::ImageFetch { .. } => "SLD002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DeckError::unsupported_image_location("relative/pic.png");
        assert_eq!(err.code(), "SLD001");
        assert!(err.to_string().contains("relative/pic.png"));

        let err = DeckError::image_fetch(
            "https://example.com/a.png",
            ProbeError::new("connection refused"),
        );
        assert_eq!(err.code(), "SLD002");
        assert!(err.to_string().contains("https://example.com/a.png"));
        assert!(err.to_string().contains("connection refused"));
    }
}
