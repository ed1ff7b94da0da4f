use crate::core::domain::{diff::DiffResult, value_object::NodeId};
use thiserror::Error;

/// The main error type for SMD harness operations.
///
/// This enum represents every failure the harness can surface: transport
/// problems, non-success responses on required calls, unparseable bodies,
/// validation failures, discovery that never converged, and component
/// state that differs between the two services.
#[derive(Error, Debug)]
pub enum SmdError {
    /// Represents errors that occur while building a client or sending a request
    ///
    /// # Fields
    /// * `0` - A description of what went wrong
    #[error("Connection error: {0}")]
    Connection(String),

    /// A required call returned a non-success status
    ///
    /// # Fields
    /// * `url` - The URL that was requested
    /// * `status` - The HTTP status code returned
    /// * `body` - The raw response body, for diagnosis
    #[error("API error from {url} ({status}): {body}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },

    /// A response body could not be parsed as the expected JSON document
    #[error("Failed to parse response from {url}: {message}; body: {body}")]
    Decode {
        url: String,
        message: String,
        body: String,
    },

    /// Represents validation failures of inputs or value objects
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The attempt budget ran out before every node reported discovery success
    #[error("Discovery did not converge; undiscovered nodes: {}", join_ids(.0))]
    DiscoveryIncomplete(Vec<NodeId>),

    /// The two component collections differ
    #[error("Component state mismatch: {0}")]
    StateMismatch(DiffResult),
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a SmdError
pub type SmdResult<T> = Result<T, SmdError>;
