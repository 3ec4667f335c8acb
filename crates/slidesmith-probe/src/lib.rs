//! Image dimension probing for slidesmith
//!
//! Deck building needs the pixel dimensions of every referenced image
//! before layout can run. This crate supplies the [`ImageProber`]
//! implementations:
//!
//! - [`HttpProber`]: fetches an image over HTTP(S) and reads its
//!   dimensions from the format header, without decoding pixel data
//! - [`FixedProber`]: serves dimensions from a fixed table, for tests
//!   and offline builds
//!
//! [`probe_all`] fans a batch of URLs out across a thread pool while
//! keeping results in input order.
//!
//! # Example
//!
//! ```no_run
//! use slidesmith_probe::{HttpProber, ImageProber};
//!
//! let prober = HttpProber::new();
//! let size = prober.probe("https://example.com/logo.png")?;
//! println!("{}x{}", size.width, size.height);
//! # Ok::<(), slidesmith_probe::ProbeError>(())
//! ```

use std::collections::HashMap;
use std::io::Cursor;
use std::time::Duration;

use rayon::prelude::*;
use reqwest::blocking::Client;

pub use slidesmith_core::{ImageProber, ImageSize, ProbeError};

/// Default timeout for a single image fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Probes image dimensions over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpProber {
    /// Create a prober with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a prober with an explicit request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl ImageProber for HttpProber {
    fn probe(&self, url: &str) -> Result<ImageSize, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProbeError::new(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::new(format!("server returned {status}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ProbeError::new(format!("body read failed: {e}")))?;

        let reader = image::ImageReader::new(Cursor::new(bytes.as_ref()))
            .with_guessed_format()
            .map_err(|e| ProbeError::new(format!("format detection failed: {e}")))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ProbeError::new(format!("dimension read failed: {e}")))?;

        Ok(ImageSize::new(width, height))
    }
}

/// Serves image dimensions from a fixed table
///
/// Unknown URLs fall back to the configured default size, or fail when
/// none is set.
#[derive(Debug, Clone, Default)]
pub struct FixedProber {
    sizes: HashMap<String, ImageSize>,
    fallback: Option<ImageSize>,
}

impl FixedProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the dimensions returned for `url`
    pub fn with_size(mut self, url: impl Into<String>, size: ImageSize) -> Self {
        self.sizes.insert(url.into(), size);
        self
    }

    /// Set the size returned for URLs without a registered entry
    pub fn with_fallback(mut self, size: ImageSize) -> Self {
        self.fallback = Some(size);
        self
    }
}

impl ImageProber for FixedProber {
    fn probe(&self, url: &str) -> Result<ImageSize, ProbeError> {
        self.sizes
            .get(url)
            .copied()
            .or(self.fallback)
            .ok_or_else(|| ProbeError::new(format!("no registered size for {url}")))
    }
}

/// Probe a batch of URLs in parallel
///
/// The result vector matches `urls` index for index, so callers can zip
/// the two regardless of which fetch finished first. Failures are
/// reported per URL rather than aborting the batch.
pub fn probe_all<P>(prober: &P, urls: &[String]) -> Vec<Result<ImageSize, ProbeError>>
where
    P: ImageProber + Sync,
{
    urls.par_iter()
        .map(|url| {
            let result = prober.probe(url);
            if let Err(err) = &result {
                log::warn!("Failed to probe {url}: {err}");
            }
            result
        })
        .collect()
}
