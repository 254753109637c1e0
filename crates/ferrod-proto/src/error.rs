//! Parse errors.

use thiserror::Error;

/// Errors produced when parsing a raw IRC line into a [`Message`].
///
/// [`Message`]: crate::Message
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MessageParseError {
    /// The line was empty (or whitespace only).
    #[error("empty message")]
    Empty,

    /// Tags or a prefix were present but no command followed.
    #[error("missing command")]
    MissingCommand,
}
