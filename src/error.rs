use std::fmt::Display;

use thiserror::Error;

use crate::controller::SearchStatus;

/// Why the search index could not be obtained.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to fetch search index from {location}: {message}")]
    Fetch { location: String, message: String },
    #[error("search index request to {location} returned HTTP {status}")]
    Status { location: String, status: u16 },
    #[error("search index location `{location}` is invalid: {message}")]
    InvalidLocation { location: String, message: String },
    #[error("search index is not a JSON array of records: {0}")]
    Parse(#[from] serde_json::Error),
}

impl IndexError {
    pub fn fetch(location: impl Into<String>, err: impl Display) -> Self {
        Self::Fetch {
            location: location.into(),
            message: err.to_string(),
        }
    }

    pub fn invalid_location(location: impl Into<String>, err: impl Display) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            message: err.to_string(),
        }
    }
}

/// Problems with the site configuration or the search options it carries.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load site configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid search option `{option}`: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },
    #[error("invalid base URL `{value}`: {source}")]
    BaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid log setting `{value}`: {message}")]
    Logging { value: String, message: String },
}

impl ConfigError {
    pub fn invalid_option(option: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            message: message.into(),
        }
    }
}

/// Misuse of the controller lifecycle, or a failed index load.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("search controller cannot start loading from state `{state}`")]
    AlreadyStarted { state: SearchStatus },
    #[error("search controller is not loading (state `{state}`)")]
    NotLoading { state: SearchStatus },
    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Failure turning a result list into markup.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render results list: {0}")]
    Template(#[from] askama::Error),
}
