use alloc::vec::Vec;

use quickcheck_macros::quickcheck;

use crate::GrowableBuffer;

/// Smallest term of `c -> 2c + 1` starting at `from` that is `>= required`.
fn expected_capacity(from: usize, required: usize) -> usize {
    let mut capacity = from;
    while capacity < required {
        capacity = 2 * capacity + 1;
    }
    capacity
}

#[quickcheck]
fn growth_never_loses_bytes(chunks: Vec<Vec<u8>>, initial_capacity: u8) -> bool {
    let mut buf = GrowableBuffer::new(usize::from(initial_capacity));
    let mut expected = Vec::new();
    for chunk in &chunks {
        let before = buf.capacity();
        buf.put_bytes(chunk).unwrap();
        expected.extend_from_slice(chunk);

        if buf.capacity() != expected_capacity(before, expected.len()) {
            return false;
        }
        if buf.as_slice() != expected.as_slice() || buf.capacity() < expected.len() {
            return false;
        }
    }
    buf.build();
    buf.as_slice() == expected.as_slice()
}

#[quickcheck]
fn single_byte_appends_grow_logarithmically(count: u16) -> bool {
    let mut buf = GrowableBuffer::new(1);
    let mut growths = 0u32;
    for i in 0..count {
        let before = buf.capacity();
        buf.put_u8(i.to_le_bytes()[0]).unwrap();
        if buf.capacity() != before {
            growths += 1;
        }
    }
    // Capacity after `g` growths from 1 is 2^(g+1) - 1.
    let bound = if count == 0 { 0 } else { usize::from(count).ilog2() };
    growths <= bound && buf.capacity() >= usize::from(count)
}

#[quickcheck]
fn ensure_capacity_is_idempotent(initial: u8, required: u16) -> bool {
    let mut buf = GrowableBuffer::new(usize::from(initial));
    buf.ensure_capacity(usize::from(required)).unwrap();
    let once = buf.capacity();
    buf.ensure_capacity(usize::from(required)).unwrap();
    once == buf.capacity() && once == expected_capacity(usize::from(initial), usize::from(required))
}
