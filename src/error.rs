//! Errors for body type definition and body creation and manipulation.

use thiserror::Error;

/// Errors that can occur when defining body types or when creating and
/// manipulating bodies.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BodyError {
    /// The resolved configuration for a body violates a required invariant.
    #[error("Invalid body configuration: {0}")]
    InvalidConfiguration(String),
    /// No body type with the given name has been defined.
    #[error("No body type named `{0}` has been defined")]
    UnknownBodyType(String),
    /// A body type with the given name has already been defined.
    #[error("A body type named `{0}` already exists")]
    DuplicateBodyType(String),
    /// An input to a body operation is not well-formed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
