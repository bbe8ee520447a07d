//! Fixed-width scalars.
//!
//! Scalars carry no prefix and no null representation; the width is implied by
//! the type. A Java-style `char` is a UTF-16 code unit and travels as `u16`.

use alloc::vec::Vec;

use crate::{GrowableBuffer, error::Result, options::ByteOrder};

/// A fixed-width value with a byte-order dependent encoding.
pub trait Scalar: Copy {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Writes `self` into `dst`, which is exactly [`WIDTH`](Self::WIDTH) long.
    fn encode(self, dst: &mut [u8], order: ByteOrder);

    /// Reads a value from `src`, which is exactly [`WIDTH`](Self::WIDTH) long.
    fn decode(src: &[u8], order: ByteOrder) -> Self;

    /// Writes `values` back to back into `dst`, which is exactly
    /// `values.len() * WIDTH` long.
    fn encode_slice(values: &[Self], dst: &mut [u8], order: ByteOrder) {
        for (&value, chunk) in values.iter().zip(dst.chunks_exact_mut(Self::WIDTH)) {
            value.encode(chunk, order);
        }
    }

    /// Appends every value packed in `src` to `out`. `src.len()` is a multiple
    /// of [`WIDTH`](Self::WIDTH).
    fn decode_slice(src: &[u8], order: ByteOrder, out: &mut Vec<Self>) {
        out.extend(src.chunks_exact(Self::WIDTH).map(|chunk| Self::decode(chunk, order)));
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const WIDTH: usize = core::mem::size_of::<$ty>();

            #[inline]
            fn encode(self, dst: &mut [u8], order: ByteOrder) {
                let bytes = match order {
                    ByteOrder::Big => self.to_be_bytes(),
                    ByteOrder::Little => self.to_le_bytes(),
                    ByteOrder::Native => self.to_ne_bytes(),
                };
                dst.copy_from_slice(&bytes);
            }

            #[inline]
            fn decode(src: &[u8], order: ByteOrder) -> Self {
                let mut bytes = [0u8; core::mem::size_of::<$ty>()];
                bytes.copy_from_slice(src);
                match order {
                    ByteOrder::Big => <$ty>::from_be_bytes(bytes),
                    ByteOrder::Little => <$ty>::from_le_bytes(bytes),
                    ByteOrder::Native => <$ty>::from_ne_bytes(bytes),
                }
            }
        }
    )*};
}

impl_scalar!(i8, i16, u16, i32, u32, i64, u64, f32, f64);

// Bytes have no order, so slices are copied as is.
impl Scalar for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn encode(self, dst: &mut [u8], _order: ByteOrder) {
        dst[0] = self;
    }

    #[inline]
    fn decode(src: &[u8], _order: ByteOrder) -> Self {
        src[0]
    }

    fn encode_slice(values: &[Self], dst: &mut [u8], _order: ByteOrder) {
        dst.copy_from_slice(values);
    }

    fn decode_slice(src: &[u8], _order: ByteOrder, out: &mut Vec<Self>) {
        out.extend_from_slice(src);
    }
}

impl Scalar for bool {
    const WIDTH: usize = 1;

    #[inline]
    fn encode(self, dst: &mut [u8], _order: ByteOrder) {
        dst[0] = u8::from(self);
    }

    #[inline]
    fn decode(src: &[u8], _order: ByteOrder) -> Self {
        src[0] != 0
    }
}

impl GrowableBuffer {
    /// Writes any [`Scalar`] at the cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::ReadOnly`](crate::BufferError::ReadOnly) or
    /// [`BufferError::CapacityOverflow`](crate::BufferError::CapacityOverflow).
    #[inline]
    pub fn put<T: Scalar>(&mut self, value: T) -> Result<()> {
        let order = self.byte_order();
        value.encode(self.claim_write(T::WIDTH)?, order);
        Ok(())
    }

    /// Reads any [`Scalar`] at the cursor.
    ///
    /// # Errors
    ///
    /// [`BufferError::Underrun`](crate::BufferError::Underrun) if fewer than
    /// `T::WIDTH` bytes remain.
    #[inline]
    pub fn get<T: Scalar>(&mut self) -> Result<T> {
        let order = self.byte_order();
        Ok(T::decode(self.claim_read(T::WIDTH)?, order))
    }
}

macro_rules! scalar_accessors {
    ($($put:ident / $get:ident : $ty:ty, $what:literal;)*) => {
        impl GrowableBuffer {$(
            #[doc = concat!("Writes ", $what, ".")]
            ///
            /// # Errors
            ///
            /// See [`put`](Self::put).
            #[inline]
            pub fn $put(&mut self, value: $ty) -> Result<()> {
                self.put(value)
            }

            #[doc = concat!("Reads ", $what, ".")]
            ///
            /// # Errors
            ///
            /// See [`get`](Self::get).
            #[inline]
            pub fn $get(&mut self) -> Result<$ty> {
                self.get()
            }
        )*}
    };
}

scalar_accessors! {
    put_u8 / get_u8: u8, "an unsigned byte";
    put_i8 / get_i8: i8, "a signed byte";
    put_i16 / get_i16: i16, "a 2-byte signed short";
    put_u16 / get_u16: u16, "a 2-byte unsigned short";
    put_char / get_char: u16, "a 2-byte UTF-16 code unit";
    put_i32 / get_i32: i32, "a 4-byte signed int";
    put_i64 / get_i64: i64, "an 8-byte signed long";
    put_f32 / get_f32: f32, "a 4-byte IEEE 754 float";
    put_f64 / get_f64: f64, "an 8-byte IEEE 754 double";
    put_bool / get_bool: bool, "a boolean as one byte (non-zero reads as `true`)";
}
