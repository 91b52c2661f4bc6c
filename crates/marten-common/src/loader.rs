//! Document loading for the marten parser.
//!
//! The tokenizer and tree builder only ever see a complete in-memory string;
//! this module is the thin collaborator that produces one from a local file
//! or an HTTP(S) URL. Every call constructs its own client and owns its own
//! state, so loaders can be created and dropped freely.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Request timeout for URL loads.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Where a document should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A local filesystem path.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl Source {
    /// Classify a raw command-line argument as a URL or a file path.
    ///
    /// Anything that does not start with an HTTP(S) scheme is treated as a
    /// file path.
    #[must_use]
    pub fn detect(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a local file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The HTTP request could not be built or sent.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),
}

/// Load the complete markup text from `source`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read, the HTTP request fails,
/// or the server responds with a non-success status.
pub fn load(source: &Source) -> Result<String, LoadError> {
    match source {
        Source::File(path) => fs::read_to_string(path).map_err(|error| LoadError::Io {
            path: path.display().to_string(),
            source: error,
        }),
        Source::Url(url) => {
            let client = reqwest::blocking::Client::builder()
                .timeout(TIMEOUT)
                .build()?;
            let response = client.get(url).send()?;
            if !response.status().is_success() {
                return Err(LoadError::Status(response.status()));
            }
            Ok(response.text()?)
        }
    }
}
