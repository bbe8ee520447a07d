//! A self-growing binary buffer with length-prefixed, null-aware framing.
//!
//! [`GrowableBuffer`] owns a byte sequence and one cursor. Writes append and
//! grow the storage geometrically; [`GrowableBuffer::build`] flips it into read
//! mode, after which values are read back in the order they were written.
//!
//! | Value | Layout |
//! |---|---|
//! | `bool` | 1 byte, non-zero is `true` |
//! | scalars | fixed width, no prefix |
//! | nullable array | `int32 len` (`-1` = null), then `len` elements |
//! | nullable text | `int32 byteLen` (`-1` = null), then UTF-8 |
//! | nullable text array | `int32 count` (`-1` = null), then `count` nullable texts |
//! | nullable text map | `int32 count` (`-1` = null), then `count` × (key text, value text) |
//!
//! There is no header, version or checksum: the schema lives in call order.
//! Use [`record!`] to pin that order down in one shared type.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod array;
mod buffer;
mod error;
mod options;
mod record;
mod scalar;
mod text;
mod trace;

#[cfg(test)]
mod tests;

pub use array::NULL_LENGTH;
pub use buffer::GrowableBuffer;
pub use error::{BufferError, Result};
pub use options::{BufferOptions, ByteOrder, MAX_CAPACITY, Utf8Mode};
pub use record::{Decode, Encode};
pub use scalar::Scalar;
pub use text::{NullableTextMap, TextMap};
