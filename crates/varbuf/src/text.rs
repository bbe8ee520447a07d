//! UTF-8 text, arrays of text, and text-to-text maps.
//!
//! Text is framed as `int32 byteLength` (`-1` for null) plus the UTF-8 bytes.
//! Arrays and maps reuse that frame for every element, behind an `int32`
//! count of their own.

use alloc::{string::String, vec::Vec};

use crate::{
    GrowableBuffer,
    error::{BufferError, Result},
    options::Utf8Mode,
};

/// Map container produced by [`GrowableBuffer::read_text_map`].
///
/// Neither choice keeps the writer's entry order.
#[cfg(feature = "std")]
pub type TextMap = std::collections::HashMap<String, String>;

/// Map container produced by [`GrowableBuffer::read_text_map`].
///
/// Neither choice keeps the writer's entry order.
#[cfg(not(feature = "std"))]
pub type TextMap = alloc::collections::BTreeMap<String, String>;

/// Map container produced by [`GrowableBuffer::read_nullable_text_map`], where
/// a null key or value is `None`.
#[cfg(feature = "std")]
pub type NullableTextMap = std::collections::HashMap<Option<String>, Option<String>>;

/// Map container produced by [`GrowableBuffer::read_nullable_text_map`], where
/// a null key or value is `None`.
#[cfg(not(feature = "std"))]
pub type NullableTextMap = alloc::collections::BTreeMap<Option<String>, Option<String>>;

impl GrowableBuffer {
    /// Writes the null sentinel (`int32 -1`).
    ///
    /// Reads back as `None` from any nullable reader.
    ///
    /// # Errors
    ///
    /// See [`put`](Self::put).
    pub fn write_null(&mut self) -> Result<()> {
        self.write_prefix(None)
    }

    /// Writes nullable text as its UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// [`BufferError::LengthOverflow`] for text longer than `i32::MAX` bytes,
    /// plus the faults of [`put`](Self::put).
    pub fn write_text(&mut self, text: Option<&str>) -> Result<()> {
        self.write_byte_array(text.map(str::as_bytes))
    }

    /// Reads nullable text.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidUtf8`] in [`Utf8Mode::Strict`], plus the faults
    /// of [`read_byte_array`](Self::read_byte_array).
    pub fn read_text(&mut self) -> Result<Option<String>> {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };
        let mode = self.options().utf8;
        let position = self.position();
        let bytes = self.claim_read(len)?;
        let text = match mode {
            Utf8Mode::Strict => core::str::from_utf8(bytes)
                .map_err(|_| BufferError::InvalidUtf8 { position })?
                .into(),
            Utf8Mode::Lossy => String::from_utf8_lossy(bytes).into_owned(),
        };
        Ok(Some(text))
    }

    /// Writes a nullable array of nullable text.
    ///
    /// # Errors
    ///
    /// See [`write_text`](Self::write_text).
    pub fn write_text_array<S: AsRef<str>>(&mut self, texts: Option<&[Option<S>]>) -> Result<()> {
        let Some(texts) = texts else {
            return self.write_null();
        };
        self.write_prefix(Some(texts.len()))?;
        for text in texts {
            self.write_text(text.as_ref().map(AsRef::as_ref))?;
        }
        Ok(())
    }

    /// Reads a nullable array of nullable text.
    ///
    /// # Errors
    ///
    /// See [`read_text`](Self::read_text).
    pub fn read_text_array(&mut self) -> Result<Option<Vec<Option<String>>>> {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };
        self.check_readable(len, 4)?;
        let mut texts = Vec::with_capacity(len);
        for _ in 0..len {
            texts.push(self.read_text()?);
        }
        Ok(Some(texts))
    }

    /// Writes a text-to-text map in the iteration order of `entries`.
    ///
    /// Write a null map with [`write_null`](Self::write_null).
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use varbuf::GrowableBuffer;
    ///
    /// let map = BTreeMap::from([("k", "v")]);
    /// let mut buf = GrowableBuffer::default();
    /// buf.write_text_map(&map)?;
    /// buf.build();
    /// assert_eq!(buf.read_text_map()?.unwrap()["k"], "v");
    /// # Ok::<(), varbuf::BufferError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// See [`write_text`](Self::write_text).
    pub fn write_text_map<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.write_nullable_text_map(
            entries
                .into_iter()
                .map(|(key, value)| (Some(key), Some(value))),
        )
    }

    /// Writes a text-to-text map whose keys and values may be null.
    ///
    /// Each `None` is framed as null text, so the entry reads back unchanged
    /// through [`read_nullable_text_map`](Self::read_nullable_text_map).
    ///
    /// ```rust
    /// use varbuf::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::default();
    /// buf.write_nullable_text_map([(Some("k"), None::<&str>)])?;
    /// buf.build();
    /// let map = buf.read_nullable_text_map()?.unwrap();
    /// assert_eq!(map[&Some("k".to_owned())], None);
    /// # Ok::<(), varbuf::BufferError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// See [`write_text`](Self::write_text).
    pub fn write_nullable_text_map<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Option<K>, Option<V>)>,
        I::IntoIter: ExactSizeIterator,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = entries.into_iter();
        self.write_prefix(Some(entries.len()))?;
        for (key, value) in entries {
            self.write_text(key.as_ref().map(AsRef::as_ref))?;
            self.write_text(value.as_ref().map(AsRef::as_ref))?;
        }
        Ok(())
    }

    /// Reads a nullable text map into [`TextMap`].
    ///
    /// # Errors
    ///
    /// See [`read_text_map_into`](Self::read_text_map_into).
    pub fn read_text_map(&mut self) -> Result<Option<TextMap>> {
        self.read_text_map_into()
    }

    /// Reads a nullable text map into any container built from `(key, value)`
    /// pairs. Later duplicates win when the container is a map.
    ///
    /// # Errors
    ///
    /// [`BufferError::NullMapEntry`] if a key or value is null, plus the faults
    /// of [`read_text`](Self::read_text).
    pub fn read_text_map_into<M>(&mut self) -> Result<Option<M>>
    where
        M: FromIterator<(String, String)>,
    {
        self.read_map_entries(|index, key, value| {
            key.zip(value).ok_or(BufferError::NullMapEntry { index })
        })
    }

    /// Reads a nullable text map into [`NullableTextMap`].
    ///
    /// # Errors
    ///
    /// See [`read_nullable_text_map_into`](Self::read_nullable_text_map_into).
    pub fn read_nullable_text_map(&mut self) -> Result<Option<NullableTextMap>> {
        self.read_nullable_text_map_into()
    }

    /// Reads a nullable text map whose keys and values may be null into any
    /// container built from `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// The faults of [`read_text`](Self::read_text).
    pub fn read_nullable_text_map_into<M>(&mut self) -> Result<Option<M>>
    where
        M: FromIterator<(Option<String>, Option<String>)>,
    {
        self.read_map_entries(|_, key, value| Ok((key, value)))
    }

    fn read_map_entries<M, E>(
        &mut self,
        mut entry: impl FnMut(usize, Option<String>, Option<String>) -> Result<E>,
    ) -> Result<Option<M>>
    where
        M: FromIterator<E>,
    {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };
        // Every entry carries at least two prefixes.
        self.check_readable(len, 8)?;
        (0..len)
            .map(|index| {
                let key = self.read_text()?;
                let value = self.read_text()?;
                entry(index, key, value)
            })
            .collect::<Result<M>>()
            .map(Some)
    }
}
