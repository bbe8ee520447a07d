use alloc::{vec, vec::Vec};
use core::fmt;

use bstr::BStr;

use crate::{
    error::{BufferError, Result},
    options::{BufferOptions, ByteOrder},
    trace::{debug, trace},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Write,
    Read,
}

/// An owned, self-growing byte buffer with a single cursor.
///
/// A buffer starts in write mode. Typed `put_*`/`write_*` calls append at the
/// cursor and grow the storage on demand. [`build`](Self::build) flips it into
/// read mode (`limit = position`, `position = 0`), after which the matching
/// `get_*`/`read_*` calls must be issued in the order the values were written.
///
/// Storage is owned by the buffer. Slices handed out by [`as_slice`](Self::as_slice)
/// borrow it, so the borrow checker rejects holding one across a write that
/// could reallocate.
///
/// ```rust
/// use varbuf::GrowableBuffer;
///
/// let mut buf = GrowableBuffer::new(1);
/// buf.write_i32_array(Some(&[1, 2, 3]))?;
/// buf.write_text(Some("hi"))?;
/// buf.build();
///
/// assert_eq!(buf.read_i32_array()?, Some(vec![1, 2, 3]));
/// assert_eq!(buf.read_text()?.as_deref(), Some("hi"));
/// # Ok::<(), varbuf::BufferError>(())
/// ```
pub struct GrowableBuffer {
    // `storage.len()` is the capacity; bytes past `position` in write mode are
    // scratch.
    storage: Vec<u8>,
    position: usize,
    limit: usize,
    mode: Mode,
    order: ByteOrder,
    options: BufferOptions,
}

impl GrowableBuffer {
    /// Creates a write-mode buffer with `initial_capacity` bytes and default
    /// options otherwise.
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_options(BufferOptions {
            initial_capacity,
            ..BufferOptions::default()
        })
    }

    /// Creates a write-mode buffer from `options`.
    ///
    /// An initial capacity above the maximum is clamped to the maximum.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        let capacity = options
            .initial_capacity
            .min(options.effective_max_capacity());
        Self::from_storage(vec![0; capacity], options, Mode::Write)
    }

    /// Adopts `storage` as the initial backing region, in write mode.
    ///
    /// The cursor starts at zero and the capacity is `storage.len()`; existing
    /// contents are overwritten by subsequent writes.
    #[must_use]
    pub fn wrap(storage: Vec<u8>) -> Self {
        Self::wrap_with_options(storage, BufferOptions::default())
    }

    /// Like [`wrap`](Self::wrap), with explicit options.
    #[must_use]
    pub fn wrap_with_options(storage: Vec<u8>, options: BufferOptions) -> Self {
        Self::from_storage(storage, options, Mode::Write)
    }

    /// Adopts `bytes` as an already built buffer, ready to be read from the
    /// start.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_bytes_with_options(bytes, BufferOptions::default())
    }

    /// Like [`from_bytes`](Self::from_bytes), with explicit options.
    #[must_use]
    pub fn from_bytes_with_options(bytes: Vec<u8>, options: BufferOptions) -> Self {
        Self::from_storage(bytes, options, Mode::Read)
    }

    fn from_storage(storage: Vec<u8>, options: BufferOptions, mode: Mode) -> Self {
        let limit = storage.len();
        Self {
            storage,
            position: 0,
            limit,
            mode,
            order: options.byte_order.resolve(),
            options,
        }
    }

    /// Options the buffer was created with.
    #[must_use]
    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    /// Concrete byte order in use; never [`ByteOrder::Native`].
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes the backing storage can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Current cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Upper bound for reads. Equal to the capacity while in write mode, where
    /// reads past the cursor see zeroed scratch bytes.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes between the cursor and the limit.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Whether [`build`](Self::build) has been called since the last
    /// [`clear`](Self::clear).
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.mode == Mode::Read
    }

    /// Encoded bytes: `[0, limit)` in read mode, `[0, position)` in write mode.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        match self.mode {
            Mode::Write => &self.storage[..self.position],
            Mode::Read => &self.storage[..self.limit],
        }
    }

    /// Consumes the buffer and returns the bytes [`as_slice`](Self::as_slice)
    /// would show.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        let len = self.as_slice().len();
        self.storage.truncate(len);
        self.storage
    }

    /// Guarantees the storage holds at least `required` bytes.
    ///
    /// When it does not, the capacity follows `c -> 2c + 1` until it reaches
    /// `required` (clamped to the configured maximum), and the bytes before
    /// the cursor are copied into the new storage.
    ///
    /// # Errors
    ///
    /// [`BufferError::CapacityOverflow`] if `required` exceeds the maximum
    /// capacity. The buffer is left untouched.
    pub fn ensure_capacity(&mut self, required: usize) -> Result<()> {
        let old = self.capacity();
        if required <= old {
            return Ok(());
        }

        let max = self.options.effective_max_capacity();
        if required > max {
            debug!(requested = required, max, "capacity overflow");
            return Err(BufferError::CapacityOverflow {
                requested: required,
                max,
            });
        }

        let mut new_capacity = old;
        while new_capacity < required {
            new_capacity = match new_capacity.checked_mul(2).and_then(|c| c.checked_add(1)) {
                Some(next) => next,
                None => break,
            };
        }
        let new_capacity = new_capacity.max(required).min(max);

        // Write mode keeps `[0, position)`; read mode keeps `[0, limit)`.
        let keep = self.as_slice().len();
        let mut storage = vec![0; new_capacity];
        storage[..keep].copy_from_slice(&self.storage[..keep]);
        self.storage = storage;
        if self.mode == Mode::Write {
            self.limit = new_capacity;
        }
        trace!(
            old_capacity = old,
            new_capacity,
            copied = keep,
            "grew buffer"
        );
        Ok(())
    }

    /// Makes room for `additional` bytes past the cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::CapacityOverflow`] if the total would exceed the
    /// maximum capacity.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self.position.checked_add(additional).ok_or_else(|| {
            BufferError::CapacityOverflow {
                requested: usize::MAX,
                max: self.options.effective_max_capacity(),
            }
        })?;
        self.ensure_capacity(required)
    }

    /// Finishes writing: `limit = position`, `position = 0`.
    ///
    /// Further writes fail with [`BufferError::ReadOnly`] until
    /// [`clear`](Self::clear) is called.
    pub fn build(&mut self) -> &mut Self {
        self.limit = self.position;
        self.position = 0;
        self.mode = Mode::Read;
        debug!(len = self.limit, "built buffer");
        self
    }

    /// Returns to an empty write-mode buffer, keeping the current capacity.
    ///
    /// The storage is zeroed, so nothing of the previous message is visible to
    /// reads issued before the next [`build`](Self::build).
    pub fn clear(&mut self) -> &mut Self {
        self.storage.fill(0);
        self.position = 0;
        self.limit = self.capacity();
        self.mode = Mode::Write;
        self
    }

    /// Moves the cursor back to the start without changing the mode.
    pub fn rewind(&mut self) -> &mut Self {
        self.position = 0;
        self
    }

    /// Appends raw bytes with no length prefix.
    ///
    /// # Errors
    ///
    /// [`BufferError::ReadOnly`] after [`build`](Self::build), or
    /// [`BufferError::CapacityOverflow`].
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.claim_write(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Fills `dst` from the cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underrun`] if fewer than `dst.len()` bytes remain; the
    /// cursor does not move.
    pub fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        dst.copy_from_slice(self.claim_read(dst.len())?);
        Ok(())
    }

    /// Copies up to `dst.len()` bytes from the cursor and returns how many
    /// were copied. Never fails; returns 0 at the limit.
    pub fn read_available(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.remaining());
        dst[..n].copy_from_slice(&self.storage[self.position..self.position + n]);
        self.position += n;
        n
    }

    /// Advances the cursor by `n` bytes without reading them.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underrun`] if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.claim_read(n).map(|_| ())
    }

    /// Reserves `width` bytes at the cursor for writing and advances past them.
    pub(crate) fn claim_write(&mut self, width: usize) -> Result<&mut [u8]> {
        if self.mode == Mode::Read {
            return Err(BufferError::ReadOnly);
        }
        self.reserve(width)?;
        let start = self.position;
        self.position += width;
        Ok(&mut self.storage[start..self.position])
    }

    /// Takes `width` readable bytes at the cursor and advances past them.
    pub(crate) fn claim_read(&mut self, width: usize) -> Result<&[u8]> {
        let remaining = self.remaining();
        if width > remaining {
            debug!(needed = width, remaining, "buffer underrun");
            return Err(BufferError::Underrun {
                needed: width,
                remaining,
            });
        }
        let start = self.position;
        self.position += width;
        Ok(&self.storage[start..self.position])
    }
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::with_options(BufferOptions::default())
    }
}

impl fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("mode", &self.mode)
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity())
            .field("order", &self.order)
            .field("bytes", &BStr::new(self.as_slice()))
            .finish()
    }
}
