//! Error types
//!
//! Frame decoding and chain installation can fail; both failures are
//! recoverable by design. A `FrameError` means "forward the frame unmodified
//! and skip the tracking update", an `InstallError` means the whole subsystem
//! degrades to doing no interception on that connection.

/// Error type for frame decoding
///
/// Raised only for truncated or malformed byte layouts. Unexpected but
/// well-formed values (unknown dimension ids, foreign tags) never produce
/// an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Buffer ended before the layout was complete
    UnexpectedEof,
    /// A text field was not valid UTF-8
    InvalidUtf8,
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::UnexpectedEof => write!(f, "Unexpected end of frame data"),
            FrameError::InvalidUtf8 => write!(f, "Invalid UTF-8 in frame text field"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Error type for frame-chain installation
///
/// Produced by a host's [`FrameChain`](crate::intercept::FrameChain) when the
/// tap cannot be inserted into a connection's frame-processing chain.
#[derive(Debug, Clone)]
pub enum InstallError {
    /// The host cannot insert taps into this connection
    Unsupported(String),
    /// The connection is already closed
    ConnectionClosed,
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallError::Unsupported(reason) => {
                write!(f, "Frame chain does not support taps: {}", reason)
            }
            InstallError::ConnectionClosed => write!(f, "Connection already closed"),
        }
    }
}

impl std::error::Error for InstallError {}
