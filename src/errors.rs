//! Unified error type for every cask-keeper operation.
//!
//! Errors fall into a few classes that callers treat differently:
//! validation failures are shown next to the offending field, network-class
//! failures are shown as a dismissible message with the form still populated,
//! and `NotFound` in read paths is converted into an empty state before it
//! ever reaches the user.

use thiserror::Error;

/// Every failure a cask-keeper operation can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// User input failed a local precondition. The network was not contacted.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the form field the message belongs to
        field: &'static str,
        /// Text shown next to the field
        message: String,
    },

    /// The API did not answer within the configured timeout.
    #[error("Request to {endpoint} timed out after {seconds}s")]
    Timeout {
        /// Endpoint path that timed out
        endpoint: String,
        /// Configured timeout
        seconds: u64,
    },

    /// The API answered 404.
    #[error("Not found: {endpoint}")]
    NotFound {
        /// Endpoint path that answered 404
        endpoint: String,
    },

    /// The API answered with any other non-2xx status.
    #[error("API error {status} from {endpoint}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Endpoint path that failed
        endpoint: String,
        /// Server-supplied error text, or the status reason
        message: String,
    },

    /// The response body did not match the expected schema.
    #[error("Malformed response from {endpoint}: {message}")]
    Decode {
        /// Endpoint path whose body failed to decode
        endpoint: String,
        /// Decoder error
        message: String,
    },

    /// Connectivity or transport failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The same location id appeared more than once in a list.
    #[error("Duplicate storage location id '{id}'")]
    DuplicateLocation {
        /// The repeated id
        id: String,
    },

    /// Following parent links from a location led back to it.
    #[error("Storage location '{id}' is its own ancestor")]
    LocationCycle {
        /// A location on the cycle
        id: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for failures of the remote call itself (status, timeout, transport).
    /// These leave the triggering form populated so the user can retry.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Api { .. } | Self::Network(_) | Self::Decode { .. }
        )
    }

    /// True when the API answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for local input validation failures.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let timeout = Error::Timeout {
            endpoint: "/v1/storage-locations".to_string(),
            seconds: 15,
        };
        assert!(timeout.is_network());
        assert!(!timeout.is_not_found());

        let missing = Error::NotFound {
            endpoint: "/v1/pricing/bottles/7".to_string(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_network());

        let invalid = Error::validation("name", "Location name cannot be empty");
        assert!(invalid.is_validation());
        assert!(!invalid.is_network());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            status: 500,
            endpoint: "/v1/inventory".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error 500 from /v1/inventory: boom");

        let err = Error::validation("name", "Location name cannot be empty");
        assert_eq!(err.to_string(), "Invalid name: Location name cannot be empty");
    }
}
