use std::{fmt::Display, io, sync};

#[derive(Debug)]
pub enum Error {
    IoError(io::Error),
    FixtureParseError {
        path: String,
        source: serde_json::Error,
    },
    FixtureError(Box<dyn std::error::Error + Send + Sync>),
    InvalidUrlPattern(String),
    RequestMismatch(String),
    UnconsumedInteractions {
        expected: usize,
        consumed: usize,
    },
    JsonError(serde_json::Error),
    PoisonedLock,
    InvalidMethod(String),
    InvalidHeaderName,
    InvalidHeaderValue,
    HttpError(reqwest::Error),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::FixtureParseError { path, source } => {
                write!(f, "Couldn't parse fixture file {}: {}", path, source)
            }
            Error::FixtureError(e) => write!(f, "Fixture store error: {}", e),
            Error::InvalidUrlPattern(pattern) => {
                write!(f, "Invalid url pattern \"{}\"", pattern)
            }
            Error::RequestMismatch(message) => {
                write!(f, "Request didn't match the expected interaction: {}", message)
            }
            Error::UnconsumedInteractions { expected, consumed } => write!(
                f,
                "Not all expected interactions were consumed: {} of {}",
                consumed, expected
            ),
            Error::JsonError(e) => write!(f, "Json error: {}", e),
            Error::PoisonedLock => write!(f, "The lock was poisoned"),
            Error::InvalidMethod(method) => write!(f, "Invalid http method \"{}\"", method),
            Error::InvalidHeaderName => write!(f, "Invalid header name"),
            Error::InvalidHeaderValue => write!(f, "Invalid header value"),
            Error::HttpError(e) => write!(f, "Http error: {}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl<T> From<sync::PoisonError<T>> for Error {
    fn from(_: sync::PoisonError<T>) -> Self {
        Error::PoisonedLock
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonError(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::HttpError(e)
    }
}

impl From<reqwest::header::InvalidHeaderName> for Error {
    fn from(_: reqwest::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(_: reqwest::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}
