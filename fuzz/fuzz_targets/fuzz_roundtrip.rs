#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use varbuf::{BufferOptions, ByteOrder, GrowableBuffer, Result};

/// One value per supported shape. Floats are kept as bit patterns so NaN
/// payloads compare exactly.
#[derive(Arbitrary, Debug, Clone, PartialEq)]
enum Value {
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    Bool(bool),
    Bytes(Option<Vec<u8>>),
    Shorts(Option<Vec<i16>>),
    Chars(Option<Vec<u16>>),
    Ints(Option<Vec<i32>>),
    Longs(Option<Vec<i64>>),
    NestedBytes(Option<Vec<Option<Vec<u8>>>>),
    Text(Option<String>),
    Texts(Option<Vec<Option<String>>>),
    Map(Option<BTreeMap<String, String>>),
    NullableMap(Option<BTreeMap<Option<String>, Option<String>>>),
}

impl Value {
    fn write(&self, buf: &mut GrowableBuffer) -> Result<()> {
        match self {
            Value::Byte(v) => buf.put_i8(*v),
            Value::Short(v) => buf.put_i16(*v),
            Value::Char(v) => buf.put_char(*v),
            Value::Int(v) => buf.put_i32(*v),
            Value::Long(v) => buf.put_i64(*v),
            Value::Float(bits) => buf.put_f32(f32::from_bits(*bits)),
            Value::Double(bits) => buf.put_f64(f64::from_bits(*bits)),
            Value::Bool(v) => buf.put_bool(*v),
            Value::Bytes(v) => buf.write_byte_array(v.as_deref()),
            Value::Shorts(v) => buf.write_i16_array(v.as_deref()),
            Value::Chars(v) => buf.write_char_array(v.as_deref()),
            Value::Ints(v) => buf.write_i32_array(v.as_deref()),
            Value::Longs(v) => buf.write_i64_array(v.as_deref()),
            Value::NestedBytes(v) => buf.write_byte_arrays(v.as_deref()),
            Value::Text(v) => buf.write_text(v.as_deref()),
            Value::Texts(v) => buf.write_text_array(v.as_deref()),
            Value::Map(Some(map)) => buf.write_text_map(map),
            Value::Map(None) => buf.write_null(),
            Value::NullableMap(v) => buf.write_value(v),
        }
    }

    fn read_like(&self, buf: &mut GrowableBuffer) -> Result<Value> {
        Ok(match self {
            Value::Byte(_) => Value::Byte(buf.get_i8()?),
            Value::Short(_) => Value::Short(buf.get_i16()?),
            Value::Char(_) => Value::Char(buf.get_char()?),
            Value::Int(_) => Value::Int(buf.get_i32()?),
            Value::Long(_) => Value::Long(buf.get_i64()?),
            Value::Float(_) => Value::Float(buf.get_f32()?.to_bits()),
            Value::Double(_) => Value::Double(buf.get_f64()?.to_bits()),
            Value::Bool(_) => Value::Bool(buf.get_bool()?),
            Value::Bytes(_) => Value::Bytes(buf.read_byte_array()?),
            Value::Shorts(_) => Value::Shorts(buf.read_i16_array()?),
            Value::Chars(_) => Value::Chars(buf.read_char_array()?),
            Value::Ints(_) => Value::Ints(buf.read_i32_array()?),
            Value::Longs(_) => Value::Longs(buf.read_i64_array()?),
            Value::NestedBytes(_) => Value::NestedBytes(buf.read_byte_arrays()?),
            Value::Text(_) => Value::Text(buf.read_text()?),
            Value::Texts(_) => Value::Texts(buf.read_text_array()?),
            Value::Map(_) => Value::Map(buf.read_text_map_into()?),
            Value::NullableMap(_) => Value::NullableMap(buf.read_nullable_text_map_into()?),
        })
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    big_endian: bool,
    initial_capacity: u8,
    values: Vec<Value>,
}

fuzz_target!(|input: Input| {
    let options = BufferOptions {
        initial_capacity: usize::from(input.initial_capacity),
        byte_order: if input.big_endian {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        },
        ..Default::default()
    };

    let mut buf = GrowableBuffer::with_options(options);
    for value in &input.values {
        value.write(&mut buf).expect("write within max capacity");
        assert!(buf.capacity() >= buf.position());
    }
    buf.build();

    for value in &input.values {
        let decoded = value.read_like(&mut buf).expect("read what was written");
        assert_eq!(&decoded, value);
    }
    assert_eq!(buf.remaining(), 0);
});
