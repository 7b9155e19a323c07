// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fetching and parsing the site's `index.json`.
//!
//! The controller only sees the [`IndexSource`] trait. Native builds ship an
//! HTTP source and a file source (for a locally built `public/` tree); the
//! WASM binding lets the page's own glue do the fetch and hands over bytes.

use async_trait::async_trait;
use tracing::debug;

use crate::error::IndexError;
use crate::types::{SearchIndex, SearchRecord};

/// Somewhere the search index can be read from.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// URL or path, for logs and errors.
    fn location(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>, IndexError>;
}

/// Parse the generator's output: a bare JSON array of records.
///
/// Records repeating an earlier permalink are dropped; see
/// [`SearchIndex::duplicates_dropped`].
pub fn parse_index(bytes: &[u8]) -> Result<SearchIndex, IndexError> {
    let records: Vec<SearchRecord> = serde_json::from_slice(bytes)?;
    debug!(records = records.len(), bytes = bytes.len(), "parsed search index");
    Ok(SearchIndex::from_records(records))
}

#[cfg(feature = "native")]
pub use native::{source_for, FileIndexSource, HttpIndexSource};

#[cfg(feature = "native")]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use async_trait::async_trait;
    use url::Url;

    use super::IndexSource;
    use crate::error::IndexError;

    /// GET the index over HTTP. Any non-2xx status is an error.
    #[derive(Debug, Clone)]
    pub struct HttpIndexSource {
        url: Url,
        location: String,
        client: reqwest::Client,
        timeout: Option<Duration>,
    }

    impl HttpIndexSource {
        pub fn new(url: Url) -> Self {
            Self {
                location: url.to_string(),
                url,
                client: reqwest::Client::new(),
                timeout: None,
            }
        }

        /// Give up on the request after `timeout`. Without one a hung server
        /// hangs the fetch.
        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }
    }

    #[async_trait]
    impl IndexSource for HttpIndexSource {
        fn location(&self) -> &str {
            &self.location
        }

        async fn fetch(&self) -> Result<Vec<u8>, IndexError> {
            let mut request = self.client.get(self.url.clone());
            if let Some(timeout) = self.timeout {
                request = request.timeout(timeout);
            }

            let response = request
                .send()
                .await
                .map_err(|err| IndexError::fetch(&self.location, err))?;

            let status = response.status();
            if !status.is_success() {
                return Err(IndexError::Status {
                    location: self.location.clone(),
                    status: status.as_u16(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|err| IndexError::fetch(&self.location, err))?;
            Ok(body.to_vec())
        }
    }

    /// Read the index from disk.
    #[derive(Debug, Clone)]
    pub struct FileIndexSource {
        path: PathBuf,
        location: String,
    }

    impl FileIndexSource {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            Self {
                location: path.display().to_string(),
                path,
            }
        }
    }

    #[async_trait]
    impl IndexSource for FileIndexSource {
        fn location(&self) -> &str {
            &self.location
        }

        async fn fetch(&self) -> Result<Vec<u8>, IndexError> {
            tokio::fs::read(&self.path)
                .await
                .map_err(|err| IndexError::fetch(&self.location, err))
        }
    }

    /// Pick a source for a CLI argument: `http(s)://` URLs go over the
    /// network, anything else is a path. `timeout` bounds HTTP fetches only.
    pub fn source_for(
        location: &str,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn IndexSource>, IndexError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let url =
                Url::parse(location).map_err(|err| IndexError::invalid_location(location, err))?;
            let source = HttpIndexSource::new(url);
            return Ok(Box::new(match timeout {
                Some(timeout) => source.with_timeout(timeout),
                None => source,
            }));
        }
        if location.trim().is_empty() {
            return Err(IndexError::invalid_location(location, "empty location"));
        }
        Ok(Box::new(FileIndexSource::new(location)))
    }
}
