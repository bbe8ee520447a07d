//! Encodes a small telemetry message on one side and decodes it on the other.
//!
//! Producer and consumer share a single `record!` definition, so the field
//! order (the only schema this format has) is declared exactly once:
//!
//! ```text
//! int64          sequence
//! bool           degraded
//! double[]?      readings      (null when the sensor was offline)
//! text?          location
//! text[]?        warnings
//! map<text,text>? labels
//! ```
//!
//! The buffer starts at one byte of capacity and grows as the message is
//! written. Byte order is pinned to big-endian to show that both sides must
//! agree on it out of band.
//!
//! Run with
//!
//! ```bash
//! cargo run -p varbuf --example message_roundtrip
//! ```

use std::collections::HashMap;

use varbuf::{BufferOptions, ByteOrder, GrowableBuffer, Result, record};

record! {
    #[derive(Debug, PartialEq)]
    struct Telemetry {
        sequence: i64,
        degraded: bool,
        readings: Option<Vec<f64>>,
        location: Option<String>,
        warnings: Option<Vec<Option<String>>>,
        labels: Option<HashMap<String, String>>,
    }
}

fn options() -> BufferOptions {
    BufferOptions {
        initial_capacity: 1,
        byte_order: ByteOrder::Big,
        ..Default::default()
    }
}

fn produce(message: &Telemetry) -> Result<Vec<u8>> {
    let mut buf = GrowableBuffer::with_options(options());
    buf.write_value(message)?;
    println!(
        "encoded {} bytes (capacity grew to {})",
        buf.position(),
        buf.capacity()
    );
    buf.build();
    Ok(buf.into_vec())
}

fn consume(bytes: Vec<u8>) -> Result<Telemetry> {
    let mut buf = GrowableBuffer::from_bytes_with_options(bytes, options());
    let message = buf.read_value::<Telemetry>()?;
    assert_eq!(buf.remaining(), 0, "trailing bytes after message");
    Ok(message)
}

fn main() -> Result<()> {
    let sent = Telemetry {
        sequence: 7,
        degraded: false,
        readings: Some(vec![21.5, 21.75, 22.0]),
        location: Some("rack-4/slot-2".into()),
        warnings: Some(vec![Some("fan speed low".into()), None]),
        labels: Some(HashMap::from([
            ("site".into(), "ams".into()),
            ("unit".into(), "celsius".into()),
        ])),
    };

    let bytes = produce(&sent)?;
    let received = consume(bytes)?;

    println!("{received:#?}");
    assert_eq!(received, sent);
    Ok(())
}
