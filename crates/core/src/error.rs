//! Error taxonomy shared by the attribute layer, the mapper and the pagination protocol.

use crate::attribute::AttributeKind;
use crate::transport::Method;

/// Errors produced by the core library.
///
/// Every variant is surfaced to the direct caller; nothing in the core retries or
/// swallows an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Attribute '{0}' is write-protected: a value has already been set")]
    WriteProtected(String),

    #[error("No value set for attribute '{0}'")]
    Uninitialized(String),

    #[error("No such attribute '{0}'")]
    NoSuchAttribute(String),

    #[error("Attribute '{name}' is already declared as {existing}, cannot redeclare it as {requested}")]
    ConflictingDeclaration {
        name: String,
        existing: AttributeKind,
        requested: AttributeKind,
    },

    #[error("Attribute '{name}' does not hold {expected}")]
    UnexpectedType { name: String, expected: &'static str },

    #[error("Bad input: {0}")]
    BadInput(String),

    #[error("Invalid timestamp '{0}': expected YYYY-MM-DDTHH:MM:SS.ffffffZ")]
    InvalidTimestamp(String),

    #[error("Malformed page from {url}: {reason}")]
    MalformedPage { url: String, reason: String },

    #[error("{method} {url} returned HTTP {status} (expected {expected}): {body}")]
    Transport {
        method: Method,
        url: String,
        status: u16,
        expected: u16,
        body: String,
    },

    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to serialize JSON: {0}")]
    Serialization(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
