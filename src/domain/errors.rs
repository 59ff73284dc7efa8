//! Fetch error taxonomy and transport failure classification.
//!
//! Outbound calls report what went wrong as a [`TransportFailure`]. The
//! [`classify`] function turns that into a [`FetchError`] tagged with the
//! animal being fetched. Neither step can panic: every outcome of a fetch
//! is a value.

use crate::domain::entities::AnimalKind;
use std::time::Duration;

/// Tag identifying which failure mode a [`FetchError`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkTimeout,
    RateLimited,
    ConnectionFailed,
    HttpError,
    ParseError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NetworkTimeout => "network_timeout",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::ConnectionFailed => "connection_failed",
            ErrorKind::HttpError => "http_error",
            ErrorKind::ParseError => "parse_error",
        }
    }
}

/// Why a single fetch failed.
///
/// `animal` is the requested name rather than an [`AnimalKind`] so the
/// dispatcher can report unknown names through the same type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("{animal} API timed out after {timeout_seconds}s")]
    NetworkTimeout { animal: String, timeout_seconds: f64 },

    #[error("{animal} API rate limited (retry after: {})", .retry_after.as_deref().unwrap_or("unspecified"))]
    RateLimited {
        animal: String,
        retry_after: Option<String>,
    },

    #[error("could not connect to {animal} API: {reason}")]
    ConnectionFailed { animal: String, reason: String },

    #[error("{animal} API returned HTTP {status_code}")]
    HttpError { animal: String, status_code: u16 },

    #[error("unexpected response from {animal} API: {details}")]
    ParseError { animal: String, details: String },
}

impl FetchError {
    pub fn parse(animal: impl Into<String>, details: impl Into<String>) -> Self {
        FetchError::ParseError {
            animal: animal.into(),
            details: details.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::NetworkTimeout { .. } => ErrorKind::NetworkTimeout,
            FetchError::RateLimited { .. } => ErrorKind::RateLimited,
            FetchError::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            FetchError::HttpError { .. } => ErrorKind::HttpError,
            FetchError::ParseError { .. } => ErrorKind::ParseError,
        }
    }

    pub fn animal(&self) -> &str {
        match self {
            FetchError::NetworkTimeout { animal, .. }
            | FetchError::RateLimited { animal, .. }
            | FetchError::ConnectionFailed { animal, .. }
            | FetchError::HttpError { animal, .. }
            | FetchError::ParseError { animal, .. } => animal,
        }
    }

    /// Short, non-technical sentence suitable for end users.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::RateLimited { animal, .. } => {
                format!("The {animal} API is busy right now. Please try again in a moment.")
            }
            FetchError::NetworkTimeout { animal, .. } => {
                format!("The {animal}s are being shy and taking their time. Please try again!")
            }
            FetchError::HttpError {
                animal,
                status_code,
            } if *status_code >= 500 => {
                format!("The {animal} API is temporarily unavailable. Please try again later.")
            }
            FetchError::HttpError { animal, .. } => {
                format!("The {animal} API is having issues. Please try again later.")
            }
            FetchError::ConnectionFailed { animal, .. } => {
                format!("Unable to connect to the {animal} API. Please check your connection.")
            }
            FetchError::ParseError { animal, .. } => {
                format!("Got an unexpected response from the {animal} API. Please try again.")
            }
        }
    }
}

/// What an outbound GET reported when it did not yield a usable body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {code}")]
    Status {
        code: u16,
        retry_after: Option<String>,
    },

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Maps a transport failure to the fetch error taxonomy.
pub fn classify(failure: TransportFailure, animal: &str, timeout: Duration) -> FetchError {
    let animal = animal.to_string();
    match failure {
        TransportFailure::Timeout => FetchError::NetworkTimeout {
            animal,
            timeout_seconds: timeout.as_secs_f64(),
        },
        TransportFailure::Connect(reason) => FetchError::ConnectionFailed { animal, reason },
        TransportFailure::Status {
            code: 429,
            retry_after,
        } => FetchError::RateLimited {
            animal,
            retry_after,
        },
        TransportFailure::Status { code, .. } => FetchError::HttpError {
            animal,
            status_code: code,
        },
        TransportFailure::Decode(details) => FetchError::ParseError { animal, details },
    }
}

/// Static image served by callers that prefer resilience over reporting errors.
pub fn fallback_image(animal: AnimalKind) -> &'static str {
    match animal {
        AnimalKind::Duck => {
            "https://i.pinimg.com/736x/c2/16/df/c216df7a2af5dc737c9b2041ef295835.jpg"
        }
        AnimalKind::Dog => "https://images.dog.ceo/breeds/retriever-golden/n02099601_1004.jpg",
        AnimalKind::Cat => "https://cdn2.thecatapi.com/images/MTY3ODIyMQ.jpg",
    }
}
