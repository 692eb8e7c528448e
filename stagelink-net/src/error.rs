//! Error types for the protocol engine.
//!
//! Transport errors are fatal to session start. Everything else is
//! per-message: the transport loop logs it, drops the message, and keeps
//! running.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Channel bind/connect or socket I/O failure.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    /// Update message shorter than the fixed header.
    #[error("malformed message: {len} bytes, header needs {min}")]
    MalformedMessage { len: usize, min: usize },

    /// Payload field read past the end of the message.
    #[error("field at offset {offset} out of range for {len}-byte message")]
    OutOfRange { offset: usize, len: usize },

    /// Type index not in the parameter enumeration.
    #[error("unknown parameter type index {0}")]
    UnknownParameterType(u8),

    /// Node index outside the session node table.
    #[error("node index {index} outside table of {count} nodes")]
    UnknownNode { index: u32, count: usize },

    /// Session start requested before the snapshot buffers were built.
    #[error("snapshot buffers not populated, cannot start session")]
    NotReady,
}
