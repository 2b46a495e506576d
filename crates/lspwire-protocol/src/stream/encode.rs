use serde_json::ser::{CompactFormatter, Formatter};
use std::io;

use super::{StreamObject, StreamValue};

/// Writes compact JSON straight into a byte buffer.
///
/// Scalars go through `serde_json`'s compact formatter and strings through
/// its escaper, so the bytes match what the standard backend produces for
/// the same value.
pub struct StreamWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> StreamWriter<'a> {
    /// Creates a writer appending to `out`.
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }

    pub fn null(&mut self) -> io::Result<()> {
        CompactFormatter.write_null(self.out)
    }

    pub fn bool(&mut self, value: bool) -> io::Result<()> {
        CompactFormatter.write_bool(self.out, value)
    }

    pub fn i32(&mut self, value: i32) -> io::Result<()> {
        CompactFormatter.write_i32(self.out, value)
    }

    pub fn u32(&mut self, value: u32) -> io::Result<()> {
        CompactFormatter.write_u32(self.out, value)
    }

    /// Writes a decimal. Non-finite values are written as `null`.
    pub fn f64(&mut self, value: f64) -> io::Result<()> {
        if value.is_finite() {
            CompactFormatter.write_f64(self.out, value)
        } else {
            self.null()
        }
    }

    /// Writes an escaped string.
    pub fn str(&mut self, value: &str) -> io::Result<()> {
        serde_json::to_writer(&mut *self.out, value).map_err(io::Error::from)
    }

    /// Writes an arbitrary JSON value.
    pub fn value(&mut self, value: &serde_json::Value) -> io::Result<()> {
        serde_json::to_writer(&mut *self.out, value).map_err(io::Error::from)
    }

    pub fn array<T: StreamValue>(&mut self, items: &[T]) -> io::Result<()> {
        self.out.push(b'[');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.out.push(b',');
            }
            item.encode(self)?;
        }
        self.out.push(b']');
        Ok(())
    }

    /// Writes a map with caller-supplied keys, escaping each key.
    pub fn map<'v, K, V, I>(&mut self, entries: I) -> io::Result<()>
    where
        K: AsRef<str> + 'v,
        V: StreamValue + 'v,
        I: IntoIterator<Item = (&'v K, &'v V)>,
    {
        self.out.push(b'{');
        for (index, (key, value)) in entries.into_iter().enumerate() {
            if index > 0 {
                self.out.push(b',');
            }
            self.str(key.as_ref())?;
            self.out.push(b':');
            value.encode(self)?;
        }
        self.out.push(b'}');
        Ok(())
    }

    /// Writes a record, delegating member selection to the record.
    pub fn object<T: StreamObject>(&mut self, record: &T) -> io::Result<()> {
        self.out.push(b'{');
        let mut fields = ObjectWriter {
            writer: self,
            first: true,
        };
        record.encode_fields(&mut fields)?;
        self.out.push(b'}');
        Ok(())
    }
}

/// Member writer handed to [`StreamObject::encode_fields`].
pub struct ObjectWriter<'w, 'a> {
    writer: &'w mut StreamWriter<'a>,
    first: bool,
}

impl ObjectWriter<'_, '_> {
    /// Writes one member. `key` comes from the Key Table and is written
    /// without escaping.
    pub fn field<T: StreamValue>(&mut self, key: &'static str, value: &T) -> io::Result<()> {
        debug_assert!(key.bytes().all(|b| b.is_ascii_alphanumeric()));
        let out = &mut *self.writer.out;
        if !self.first {
            out.push(b',');
        }
        self.first = false;
        out.push(b'"');
        out.extend_from_slice(key.as_bytes());
        out.extend_from_slice(b"\":");
        value.encode(self.writer)
    }
}
