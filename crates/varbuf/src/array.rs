//! Length-prefixed arrays.
//!
//! Wire layout: `int32 length` (`-1` for null) followed by `length` elements.
//! Elements are packed in one claim of `length * WIDTH` bytes; byte arrays
//! are a single copy.

use alloc::vec::Vec;

use crate::{
    GrowableBuffer,
    error::{BufferError, Result},
    scalar::Scalar,
};

/// Length prefix that marks an absent value.
pub const NULL_LENGTH: i32 = -1;

impl GrowableBuffer {
    /// Writes a frame prefix: the length, or [`NULL_LENGTH`] for `None`.
    pub(crate) fn write_prefix(&mut self, len: Option<usize>) -> Result<()> {
        let prefix = match len {
            Some(len) => i32::try_from(len).map_err(|_| BufferError::LengthOverflow(len))?,
            None => NULL_LENGTH,
        };
        self.put_i32(prefix)
    }

    /// Reads a frame prefix. `None` is the null sentinel.
    pub(crate) fn read_prefix(&mut self) -> Result<Option<usize>> {
        match self.get_i32()? {
            NULL_LENGTH => Ok(None),
            len => usize::try_from(len)
                .map(Some)
                .map_err(|_| BufferError::InvalidLength(len)),
        }
    }

    /// Fails unless `count` elements of `width` bytes each are still readable.
    ///
    /// Checked before allocating so a corrupt prefix cannot request a huge
    /// container.
    pub(crate) fn check_readable(&self, count: usize, width: usize) -> Result<()> {
        let remaining = self.remaining();
        match count.checked_mul(width) {
            Some(needed) if needed <= remaining => Ok(()),
            needed => Err(BufferError::Underrun {
                needed: needed.unwrap_or(usize::MAX),
                remaining,
            }),
        }
    }

    /// Writes a nullable array of scalars.
    ///
    /// # Errors
    ///
    /// [`BufferError::LengthOverflow`] for more than `i32::MAX` elements, plus
    /// the faults of [`put`](Self::put).
    pub fn write_array<T: Scalar>(&mut self, values: Option<&[T]>) -> Result<()> {
        let Some(values) = values else {
            return self.write_prefix(None);
        };
        let total = values
            .len()
            .checked_mul(T::WIDTH)
            .ok_or(BufferError::LengthOverflow(values.len()))?;
        self.write_prefix(Some(values.len()))?;
        let order = self.byte_order();
        T::encode_slice(values, self.claim_write(total)?, order);
        Ok(())
    }

    /// Reads a nullable array of scalars.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidLength`] for a negative prefix other than `-1`,
    /// [`BufferError::Underrun`] if the elements are truncated.
    pub fn read_array<T: Scalar>(&mut self) -> Result<Option<Vec<T>>> {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };
        self.check_readable(len, T::WIDTH)?;
        let order = self.byte_order();
        let mut values = Vec::with_capacity(len);
        T::decode_slice(self.claim_read(len * T::WIDTH)?, order, &mut values);
        Ok(Some(values))
    }

    /// Writes a nullable byte array as one bulk copy.
    ///
    /// # Errors
    ///
    /// See [`write_array`](Self::write_array).
    pub fn write_byte_array(&mut self, bytes: Option<&[u8]>) -> Result<()> {
        self.write_prefix(bytes.map(<[u8]>::len))?;
        match bytes {
            Some(bytes) => self.put_bytes(bytes),
            None => Ok(()),
        }
    }

    /// Reads a nullable byte array.
    ///
    /// # Errors
    ///
    /// See [`read_array`](Self::read_array).
    pub fn read_byte_array(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };
        Ok(Some(self.claim_read(len)?.to_vec()))
    }

    /// Writes a nullable array of nullable byte arrays.
    ///
    /// Each inner array is framed on its own, so a `None` element is written
    /// as a bare `-1`.
    ///
    /// # Errors
    ///
    /// See [`write_array`](Self::write_array).
    pub fn write_byte_arrays<B: AsRef<[u8]>>(&mut self, arrays: Option<&[Option<B>]>) -> Result<()> {
        let Some(arrays) = arrays else {
            return self.write_prefix(None);
        };
        self.write_prefix(Some(arrays.len()))?;
        for inner in arrays {
            self.write_byte_array(inner.as_ref().map(AsRef::as_ref))?;
        }
        Ok(())
    }

    /// Reads a nullable array of nullable byte arrays.
    ///
    /// # Errors
    ///
    /// See [`read_array`](Self::read_array).
    pub fn read_byte_arrays(&mut self) -> Result<Option<Vec<Option<Vec<u8>>>>> {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };
        // Every inner frame carries at least its own prefix.
        self.check_readable(len, 4)?;
        let mut arrays = Vec::with_capacity(len);
        for _ in 0..len {
            arrays.push(self.read_byte_array()?);
        }
        Ok(Some(arrays))
    }
}

macro_rules! typed_arrays {
    ($($write:ident / $read:ident : $ty:ty, $what:literal;)*) => {
        impl GrowableBuffer {$(
            #[doc = concat!("Writes a nullable array of ", $what, ".")]
            ///
            /// # Errors
            ///
            /// See [`write_array`](Self::write_array).
            pub fn $write(&mut self, values: Option<&[$ty]>) -> Result<()> {
                self.write_array(values)
            }

            #[doc = concat!("Reads a nullable array of ", $what, ".")]
            ///
            /// # Errors
            ///
            /// See [`read_array`](Self::read_array).
            pub fn $read(&mut self) -> Result<Option<Vec<$ty>>> {
                self.read_array()
            }
        )*}
    };
}

typed_arrays! {
    write_i16_array / read_i16_array: i16, "shorts";
    write_char_array / read_char_array: u16, "UTF-16 code units";
    write_i32_array / read_i32_array: i32, "ints";
    write_i64_array / read_i64_array: i64, "longs";
    write_f32_array / read_f32_array: f32, "floats";
    write_f64_array / read_f64_array: f64, "doubles";
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;

    #[test]
    fn null_and_empty_are_distinct() {
        let mut buf = GrowableBuffer::new(0);
        buf.write_i32_array(None).unwrap();
        buf.write_i32_array(Some(&[])).unwrap();
        buf.write_byte_array(None).unwrap();
        buf.write_byte_array(Some(&[])).unwrap();
        assert_eq!(buf.position(), 16);

        buf.build();
        assert_eq!(buf.read_i32_array().unwrap(), None);
        assert_eq!(buf.read_i32_array().unwrap(), Some(vec![]));
        assert_eq!(buf.read_byte_array().unwrap(), None);
        assert_eq!(buf.read_byte_array().unwrap(), Some(vec![]));
    }

    #[test]
    fn typed_arrays_read_back() {
        let mut buf = GrowableBuffer::new(2);
        buf.write_i16_array(Some(&[-1, 0, i16::MAX])).unwrap();
        buf.write_char_array(Some(&[0x0068, 0x0069])).unwrap();
        buf.write_f64_array(Some(&[0.5, -1.0])).unwrap();
        buf.write_i64_array(Some(&[i64::MIN])).unwrap();
        buf.write_f32_array(None).unwrap();
        buf.write_byte_array(Some(b"raw")).unwrap();
        buf.build();

        assert_eq!(buf.read_i16_array().unwrap(), Some(vec![-1, 0, i16::MAX]));
        assert_eq!(buf.read_char_array().unwrap(), Some(vec![0x0068, 0x0069]));
        assert_eq!(buf.read_f64_array().unwrap(), Some(vec![0.5, -1.0]));
        assert_eq!(buf.read_i64_array().unwrap(), Some(vec![i64::MIN]));
        assert_eq!(buf.read_f32_array().unwrap(), None);
        assert_eq!(buf.read_byte_array().unwrap(), Some(b"raw".to_vec()));
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn nested_byte_arrays_frame_each_inner_array() {
        let inner: [Option<&[u8]>; 3] = [Some(b"ab"), None, Some(b"")];
        let mut buf = GrowableBuffer::new(0);
        buf.write_byte_arrays(Some(&inner[..])).unwrap();
        // outer len + (len + "ab") + null + empty
        assert_eq!(buf.position(), 4 + (4 + 2) + 4 + 4);

        buf.build();
        assert_eq!(
            buf.read_byte_arrays().unwrap(),
            Some(vec![Some(b"ab".to_vec()), None, Some(Vec::new())])
        );
    }

    #[test]
    fn null_nested_byte_arrays() {
        let mut buf = GrowableBuffer::new(0);
        buf.write_byte_arrays::<Vec<u8>>(None).unwrap();
        buf.build();
        assert_eq!(buf.read_byte_arrays().unwrap(), None);
    }

    #[test]
    fn negative_prefix_other_than_null_is_rejected() {
        let mut buf = GrowableBuffer::new(0);
        buf.put_i32(-2).unwrap();
        buf.put_i32(i32::MIN).unwrap();
        buf.put_i32(0).unwrap();
        buf.build();
        assert_eq!(buf.read_i32_array(), Err(BufferError::InvalidLength(-2)));
        assert_eq!(
            buf.read_byte_array(),
            Err(BufferError::InvalidLength(i32::MIN))
        );
        assert_eq!(buf.read_byte_array().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn truncated_array_is_underrun_before_allocating() {
        let mut buf = GrowableBuffer::new(0);
        buf.put_i32(i32::MAX).unwrap();
        buf.put_i32(7).unwrap();
        buf.build();
        assert_eq!(
            buf.read_f64_array(),
            Err(BufferError::Underrun {
                needed: (i32::MAX as usize).saturating_mul(8),
                remaining: 4
            })
        );
    }
}
