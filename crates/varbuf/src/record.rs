//! Typed encode/decode on top of the buffer.
//!
//! The wire format has no type tags, so a message is only readable by code
//! that knows its field order. [`Encode`] and [`Decode`] tie each Rust type to
//! one frame shape, and [`record!`](crate::record) declares a struct whose
//! field order *is* the wire order, giving producer and consumer a single
//! definition to share.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use crate::{
    GrowableBuffer,
    error::{BufferError, Result},
    scalar::Scalar,
};

/// A value that can be written to a [`GrowableBuffer`].
pub trait Encode {
    /// Appends `self` at the cursor.
    ///
    /// # Errors
    ///
    /// Any write fault of the underlying codec.
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()>;
}

/// A value that can be read back from a [`GrowableBuffer`].
pub trait Decode: Sized {
    /// Reads one value at the cursor.
    ///
    /// # Errors
    ///
    /// Any read fault of the underlying codec.
    fn decode(buf: &mut GrowableBuffer) -> Result<Self>;
}

impl GrowableBuffer {
    /// Encodes `value` at the cursor.
    ///
    /// # Errors
    ///
    /// See [`Encode::encode`].
    pub fn write_value<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Decodes a `T` at the cursor.
    ///
    /// # Errors
    ///
    /// See [`Decode::decode`].
    pub fn read_value<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        (**self).encode(buf)
    }
}

macro_rules! scalar_codec {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
                buf.put(*self)
            }
        }

        impl Decode for $ty {
            fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
                buf.get()
            }
        }
    )*};
}

scalar_codec!(u8, i8, i16, u16, i32, u32, i64, u64, f32, f64, bool);

impl<T: Scalar> Encode for [T] {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_array(Some(self))
    }
}

impl<T: Scalar> Encode for Vec<T> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_array(Some(self.as_slice()))
    }
}

impl<T: Scalar> Decode for Vec<T> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_array()?.ok_or(BufferError::UnexpectedNull)
    }
}

impl<T: Scalar> Encode for Option<Vec<T>> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_array(self.as_deref())
    }
}

impl<T: Scalar> Decode for Option<Vec<T>> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_array()
    }
}

impl Encode for str {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_text(Some(self))
    }
}

impl Encode for String {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_text(Some(self))
    }
}

impl Decode for String {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_text()?.ok_or(BufferError::UnexpectedNull)
    }
}

impl Encode for Option<String> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_text(self.as_deref())
    }
}

impl Decode for Option<String> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_text()
    }
}

impl Encode for Option<Vec<Option<String>>> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_text_array(self.as_deref())
    }
}

impl Decode for Option<Vec<Option<String>>> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_text_array()
    }
}

impl Encode for Option<Vec<Option<Vec<u8>>>> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        buf.write_byte_arrays(self.as_deref())
    }
}

impl Decode for Option<Vec<Option<Vec<u8>>>> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_byte_arrays()
    }
}

impl Encode for Option<BTreeMap<String, String>> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        match self {
            Some(map) => buf.write_text_map(map),
            None => buf.write_null(),
        }
    }
}

impl Decode for Option<BTreeMap<String, String>> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_text_map_into()
    }
}

impl Encode for Option<BTreeMap<Option<String>, Option<String>>> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        match self {
            Some(map) => buf.write_nullable_text_map(
                map.iter().map(|(key, value)| (key.as_deref(), value.as_deref())),
            ),
            None => buf.write_null(),
        }
    }
}

impl Decode for Option<BTreeMap<Option<String>, Option<String>>> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_nullable_text_map_into()
    }
}

#[cfg(feature = "std")]
impl<S: core::hash::BuildHasher + Default> Encode
    for Option<std::collections::HashMap<Option<String>, Option<String>, S>>
{
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        match self {
            Some(map) => buf.write_nullable_text_map(
                map.iter().map(|(key, value)| (key.as_deref(), value.as_deref())),
            ),
            None => buf.write_null(),
        }
    }
}

#[cfg(feature = "std")]
impl<S: core::hash::BuildHasher + Default> Decode
    for Option<std::collections::HashMap<Option<String>, Option<String>, S>>
{
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_nullable_text_map_into()
    }
}

#[cfg(feature = "std")]
impl<S: core::hash::BuildHasher + Default> Encode for Option<std::collections::HashMap<String, String, S>> {
    fn encode(&self, buf: &mut GrowableBuffer) -> Result<()> {
        match self {
            Some(map) => buf.write_text_map(map),
            None => buf.write_null(),
        }
    }
}

#[cfg(feature = "std")]
impl<S: core::hash::BuildHasher + Default> Decode for Option<std::collections::HashMap<String, String, S>> {
    fn decode(buf: &mut GrowableBuffer) -> Result<Self> {
        buf.read_text_map_into()
    }
}

/// Declares a struct whose fields are encoded in declaration order.
///
/// Generates the struct plus [`Encode`] and [`Decode`] impls. Every field type
/// must itself implement both traits.
///
/// ```rust
/// use varbuf::{GrowableBuffer, record};
///
/// record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Greeting {
///         pub counts: Option<Vec<i32>>,
///         pub text: Option<String>,
///         pub missing: Option<String>,
///         pub flag: bool,
///     }
/// }
///
/// let greeting = Greeting {
///     counts: Some(vec![1, 2, 3]),
///     text: Some("hi".into()),
///     missing: None,
///     flag: true,
/// };
/// let mut buf = GrowableBuffer::new(1);
/// buf.write_value(&greeting)?;
/// assert_eq!(buf.position(), 27);
///
/// buf.build();
/// assert_eq!(buf.read_value::<Greeting>()?, greeting);
/// # Ok::<(), varbuf::BufferError>(())
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Encode for $name {
            fn encode(&self, buf: &mut $crate::GrowableBuffer) -> $crate::Result<()> {
                $( $crate::Encode::encode(&self.$field, buf)?; )*
                Ok(())
            }
        }

        impl $crate::Decode for $name {
            fn decode(buf: &mut $crate::GrowableBuffer) -> $crate::Result<Self> {
                // Struct literal fields evaluate in source order.
                Ok(Self {
                    $( $field: <$ty as $crate::Decode>::decode(buf)?, )*
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn non_nullable_targets_reject_null_frames() {
        let mut buf = GrowableBuffer::new(0);
        buf.write_null().unwrap();
        buf.write_null().unwrap();
        buf.build();
        assert_eq!(buf.read_value::<String>(), Err(BufferError::UnexpectedNull));
        assert_eq!(
            buf.read_value::<Vec<i16>>(),
            Err(BufferError::UnexpectedNull)
        );
    }

    #[test]
    fn slices_and_strs_encode_like_owned_values() {
        let mut buf = GrowableBuffer::new(0);
        buf.write_value(&[1i32, 2][..]).unwrap();
        buf.write_value("abc").unwrap();
        buf.build();
        assert_eq!(buf.read_value::<Vec<i32>>().unwrap(), vec![1, 2]);
        assert_eq!(buf.read_value::<String>().unwrap(), "abc".to_string());
    }

    #[test]
    fn maps_with_null_entries_round_trip() {
        let map: BTreeMap<Option<String>, Option<String>> = [
            (Some("present".to_string()), None),
            (None, Some("orphan".to_string())),
        ]
        .into();
        let mut buf = GrowableBuffer::new(0);
        buf.write_value(&Some(map.clone())).unwrap();
        buf.build();
        assert_eq!(
            buf.read_value::<Option<BTreeMap<Option<String>, Option<String>>>>()
                .unwrap(),
            Some(map)
        );
    }

    #[test]
    fn byte_vectors_match_byte_array_frames() {
        let mut typed = GrowableBuffer::new(0);
        typed.write_value(&Some(vec![1u8, 2, 3])).unwrap();
        typed.write_value(&None::<Vec<u8>>).unwrap();

        let mut framed = GrowableBuffer::new(0);
        framed.write_byte_array(Some(&[1, 2, 3])).unwrap();
        framed.write_byte_array(None).unwrap();
        assert_eq!(typed.as_slice(), framed.as_slice());

        typed.build();
        assert_eq!(typed.read_byte_array().unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(typed.read_value::<Option<Vec<u8>>>().unwrap(), None);
    }

    #[test]
    fn btree_map_round_trips() {
        let map: BTreeMap<String, String> = [("x".to_string(), "1".to_string())].into();
        let mut buf = GrowableBuffer::new(0);
        buf.write_value(&Some(map.clone())).unwrap();
        buf.write_value(&None::<BTreeMap<String, String>>).unwrap();
        buf.build();
        assert_eq!(
            buf.read_value::<Option<BTreeMap<String, String>>>().unwrap(),
            Some(map)
        );
        assert_eq!(
            buf.read_value::<Option<BTreeMap<String, String>>>().unwrap(),
            None
        );
    }
}
