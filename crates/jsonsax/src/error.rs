use thiserror::Error;

/// Classification of a scan failure reported through
/// [`Handler::on_error`](crate::Handler::on_error).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A container was opened while the nesting stack was full.
    #[error("nesting exceeds the maximum depth")]
    TooDeep,
    /// A structural token appeared without enough open containers, or the
    /// input ended with containers still open.
    #[error("malformed structure")]
    Malformed,
    /// A keyword or number literal was not followed by a separator.
    #[error("unexpected character")]
    UnexpectedCharacter,
    /// The byte does not start any token.
    #[error("unrecognized byte")]
    Unspecified,
}

/// A scan failure at a byte offset of the input.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    /// Offset of the offending byte. For end-of-input errors this is the
    /// offset of the terminator.
    pub offset: usize,
    pub kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(offset: usize, kind: ErrorKind) -> Self {
        Self { offset, kind }
    }
}
