#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use varbuf::{BufferOptions, ByteOrder, GrowableBuffer, Result, Utf8Mode};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Shape {
    Bool,
    Short,
    Int,
    Long,
    Double,
    Bytes,
    Shorts,
    Ints,
    Doubles,
    NestedBytes,
    Text,
    Texts,
    Map,
    NullableMap,
    Skip(u8),
}

fn read(shape: Shape, buf: &mut GrowableBuffer) -> Result<()> {
    match shape {
        Shape::Bool => buf.get_bool().map(drop),
        Shape::Short => buf.get_i16().map(drop),
        Shape::Int => buf.get_i32().map(drop),
        Shape::Long => buf.get_i64().map(drop),
        Shape::Double => buf.get_f64().map(drop),
        Shape::Bytes => buf.read_byte_array().map(drop),
        Shape::Shorts => buf.read_i16_array().map(drop),
        Shape::Ints => buf.read_i32_array().map(drop),
        Shape::Doubles => buf.read_f64_array().map(drop),
        Shape::NestedBytes => buf.read_byte_arrays().map(drop),
        Shape::Text => buf.read_text().map(drop),
        Shape::Texts => buf.read_text_array().map(drop),
        Shape::Map => buf.read_text_map_into::<BTreeMap<String, String>>().map(drop),
        Shape::NullableMap => buf.read_nullable_text_map().map(drop),
        Shape::Skip(n) => buf.skip(usize::from(n)),
    }
}

#[derive(Arbitrary, Debug)]
struct Input {
    big_endian: bool,
    lossy: bool,
    shapes: Vec<Shape>,
    bytes: Vec<u8>,
}

// Arbitrary bytes decoded as arbitrary shapes: faults are fine, panics and
// cursor escapes are not.
fuzz_target!(|input: Input| {
    let options = BufferOptions {
        byte_order: if input.big_endian {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        },
        utf8: if input.lossy {
            Utf8Mode::Lossy
        } else {
            Utf8Mode::Strict
        },
        ..Default::default()
    };
    let mut buf = GrowableBuffer::from_bytes_with_options(input.bytes, options);
    for shape in input.shapes {
        let before = buf.position();
        if read(shape, &mut buf).is_err() {
            assert!(buf.position() >= before);
            break;
        }
        assert!(buf.position() <= buf.limit());
    }
});
