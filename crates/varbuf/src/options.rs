/// Byte order used for every multi-byte scalar, including length prefixes.
///
/// The format carries no byte-order marker. Producer and consumer have to agree
/// on it out of band, the same way they agree on the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
    /// Whatever the producing machine uses.
    ///
    /// Bytes written this way are only portable between machines with the same
    /// native order.
    Native,
}

impl ByteOrder {
    /// Resolves [`ByteOrder::Native`] to the concrete order of this target.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::Big,
            Self::Native => Self::Little,
            other => other,
        }
    }
}

/// How text payloads that are not valid UTF-8 are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Utf8Mode {
    /// Reject the payload with [`BufferError::InvalidUtf8`](crate::BufferError::InvalidUtf8).
    #[default]
    Strict,
    /// Replace malformed sequences with U+FFFD.
    Lossy,
}

/// Configuration options for a [`GrowableBuffer`](crate::GrowableBuffer).
///
/// # Examples
///
/// ```rust
/// use varbuf::{BufferOptions, ByteOrder, GrowableBuffer};
///
/// let options = BufferOptions {
///     initial_capacity: 16,
///     byte_order: ByteOrder::Big,
///     ..Default::default()
/// };
/// let mut buf = GrowableBuffer::with_options(options);
/// buf.put_i32(1).unwrap();
/// assert_eq!(buf.as_slice(), &[0, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferOptions {
    /// Capacity allocated up front.
    ///
    /// # Default
    ///
    /// `64`
    pub initial_capacity: usize,

    /// Upper bound for growth.
    ///
    /// Values above `i32::MAX` are clamped to it, since every frame length is
    /// an `int32`.
    ///
    /// # Default
    ///
    /// `i32::MAX`
    pub max_capacity: usize,

    /// Byte order of multi-byte scalars.
    ///
    /// # Default
    ///
    /// [`ByteOrder::Little`]
    pub byte_order: ByteOrder,

    /// Decoding policy for text payloads.
    ///
    /// # Default
    ///
    /// [`Utf8Mode::Strict`]
    pub utf8: Utf8Mode,
}

/// Hard ceiling on capacity: the largest length an `int32` prefix can carry.
pub const MAX_CAPACITY: usize = i32::MAX as usize;

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            max_capacity: MAX_CAPACITY,
            byte_order: ByteOrder::default(),
            utf8: Utf8Mode::default(),
        }
    }
}

impl BufferOptions {
    pub(crate) fn effective_max_capacity(&self) -> usize {
        self.max_capacity.min(MAX_CAPACITY)
    }
}
