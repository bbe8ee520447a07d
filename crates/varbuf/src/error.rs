use thiserror::Error;

/// Result alias used by every fallible buffer operation.
pub type Result<T, E = BufferError> = core::result::Result<T, E>;

/// A fault raised while encoding into or decoding from a
/// [`GrowableBuffer`](crate::GrowableBuffer).
///
/// Every variant is fatal for the operation that produced it. The wire format
/// carries no type tags, so reading a different shape than was written is not
/// detected as such: it shows up as wrong values or as one of the faults below.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Growth was requested past the configured maximum capacity, or the
    /// growth recurrence overflowed.
    #[error("capacity overflow: requested {requested} bytes, maximum is {max}")]
    CapacityOverflow {
        /// Total capacity the write needed.
        requested: usize,
        /// Effective capacity ceiling.
        max: usize,
    },

    /// A read asked for more bytes than remain before the limit.
    #[error("buffer underrun: needed {needed} bytes, {remaining} remaining")]
    Underrun {
        /// Bytes the read asked for.
        needed: usize,
        /// Bytes left between the cursor and the limit.
        remaining: usize,
    },

    /// A length prefix that is neither the null sentinel nor a count.
    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    /// A value is too long to be framed by an `int32` length prefix.
    #[error("length {0} does not fit in an int32 prefix")]
    LengthOverflow(usize),

    /// Text payload starting at `position` is not valid UTF-8.
    #[error("invalid UTF-8 in text starting at byte {position}")]
    InvalidUtf8 {
        /// Buffer offset of the first payload byte.
        position: usize,
    },

    /// A null key or value in a text map read into non-null entries.
    #[error("null key or value in map entry {index}")]
    NullMapEntry {
        /// Zero-based entry index.
        index: usize,
    },

    /// A null frame was read where the target type has no null.
    #[error("unexpected null frame")]
    UnexpectedNull,

    /// The buffer was built into read mode and can no longer be written.
    #[error("buffer is in read mode")]
    ReadOnly,
}
