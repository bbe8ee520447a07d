use alloc::{collections::BTreeMap, string::String, vec, vec::Vec};

use rstest::rstest;

use crate::{BufferError, BufferOptions, ByteOrder, GrowableBuffer, TextMap};

#[test]
fn mixed_message_is_27_bytes() {
    let mut buf = GrowableBuffer::new(1);
    buf.write_i32_array(Some(&[1, 2, 3])).unwrap();
    buf.write_text(Some("hi")).unwrap();
    buf.write_text(None).unwrap();
    buf.put_bool(true).unwrap();
    // 4 + 12 + 4 + 2 + 4 + 1
    assert_eq!(buf.position(), 27);

    buf.build();
    assert_eq!(buf.limit(), 27);
    assert_eq!(buf.read_i32_array().unwrap(), Some(vec![1, 2, 3]));
    assert_eq!(buf.read_text().unwrap().as_deref(), Some("hi"));
    assert_eq!(buf.read_text().unwrap(), None);
    assert!(buf.get_bool().unwrap());
    assert_eq!(buf.remaining(), 0);
}

#[test]
fn ten_single_bytes_from_capacity_one() {
    let mut buf = GrowableBuffer::new(1);
    for b in 0..10u8 {
        buf.put_u8(b * 3).unwrap();
    }
    assert!(buf.capacity() >= 10);
    assert_eq!(
        buf.build().as_slice(),
        &[0, 3, 6, 9, 12, 15, 18, 21, 24, 27]
    );
}

#[test]
fn reading_out_of_order_gives_wrong_values_not_errors() {
    let mut buf = GrowableBuffer::new(8);
    buf.put_i32(1).unwrap();
    buf.put_f32(1.0).unwrap();
    buf.build();

    let first = buf.get_f32().unwrap();
    let second = buf.get_i32().unwrap();
    assert_ne!(first.to_bits(), 1.0f32.to_bits());
    assert_ne!(second, 1);
    assert_eq!(second, i32::from_le_bytes(1.0f32.to_le_bytes()));
}

#[test]
fn shape_mismatch_can_surface_as_underrun() {
    let mut buf = GrowableBuffer::new(8);
    buf.put_i32(100).unwrap();
    buf.build();
    assert_eq!(
        buf.read_text(),
        Err(BufferError::Underrun {
            needed: 100,
            remaining: 0
        })
    );
}

#[test]
fn map_read_back_does_not_keep_insertion_order() {
    let inserted = [("c", "3"), ("a", "1"), ("b", "2")];
    let mut buf = GrowableBuffer::new(0);
    buf.write_text_map(inserted).unwrap();
    buf.write_text_map(inserted).unwrap();
    buf.build();

    // A sorted container on the consumer side reorders the entries.
    let sorted: BTreeMap<String, String> = buf.read_text_map_into().unwrap().unwrap();
    let keys: Vec<&str> = sorted.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b", "c"]);

    // The default container only promises the same entries.
    let map: TextMap = buf.read_text_map().unwrap().unwrap();
    assert_eq!(map.len(), 3);
    for (key, value) in inserted {
        assert_eq!(map.get(key).map(String::as_str), Some(value));
    }
}

#[test]
fn post_build_write_is_rejected() {
    let mut buf = GrowableBuffer::new(4);
    buf.put_i32(5).unwrap();
    buf.build();
    assert_eq!(buf.write_text(Some("late")), Err(BufferError::ReadOnly));
    assert_eq!(buf.get_i32().unwrap(), 5);
}

#[rstest]
#[case::little(ByteOrder::Little, [0x02, 0x01])]
#[case::big(ByteOrder::Big, [0x01, 0x02])]
fn short_layout_per_byte_order(#[case] byte_order: ByteOrder, #[case] expected: [u8; 2]) {
    let mut buf = GrowableBuffer::with_options(BufferOptions {
        byte_order,
        ..Default::default()
    });
    buf.put_i16(0x0102).unwrap();
    assert_eq!(buf.as_slice(), &expected);
}

#[rstest]
#[case::empty_text(Some(""), &[0, 0, 0, 0])]
#[case::null_text(None, &[0xFF, 0xFF, 0xFF, 0xFF])]
#[case::ascii(Some("hi"), &[2, 0, 0, 0, b'h', b'i'])]
fn text_frames(#[case] text: Option<&str>, #[case] expected: &[u8]) {
    let mut buf = GrowableBuffer::new(0);
    buf.write_text(text).unwrap();
    assert_eq!(buf.as_slice(), expected);
    buf.build();
    assert_eq!(buf.read_text().unwrap().as_deref(), text);
}
