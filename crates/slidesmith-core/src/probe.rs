//! Image probing seam.
//!
//! Deck building needs the pixel dimensions of every referenced image
//! to lay pictures out on a slide. Fetching is abstracted behind
//! [`ImageProber`] so builds can run against HTTP, a local cache, or a
//! fixture table in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pixel dimensions of a probed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create a new image size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Failure to fetch or decode a referenced image
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ProbeError {
    reason: String,
}

impl ProbeError {
    /// Create a new probe error
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable failure reason
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Measures images referenced by a document
///
/// Implementations fetch the bytes behind `url` and report the decoded
/// pixel dimensions. The deck builder treats any failure as fatal for
/// the build.
pub trait ImageProber {
    /// Probe the image at `url`
    fn probe(&self, url: &str) -> Result<ImageSize, ProbeError>;
}
