use std::borrow::Cow;
use std::collections::TryReserveError;
use std::io::{ErrorKind, Read};

use color_eyre::eyre::{Result, WrapErr};

const READ_CHUNK: usize = 256;

/// Append-only byte buffer whose capacity doubles whenever an append would
/// overflow it.
///
/// The tracked capacity is always a power of two strictly greater than the
/// content length, so there is always room for one terminator byte. It never
/// shrinks.
#[derive(Debug)]
pub struct GrowableBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl GrowableBuffer {
    /// Allocates the smallest power of two larger than `initial` and copies it in.
    pub fn create(initial: &str) -> Result<Self, TryReserveError> {
        let mut capacity = 1;
        while capacity <= initial.len() {
            capacity *= 2;
        }

        let mut bytes = Vec::new();
        bytes.try_reserve_exact(capacity)?;
        bytes.extend_from_slice(initial.as_bytes());
        Ok(Self { bytes, capacity })
    }

    pub fn append(&mut self, text: impl AsRef<[u8]>) -> Result<(), TryReserveError> {
        let text = text.as_ref();
        let combined = self.bytes.len() + text.len() + 1;
        if combined >= self.capacity {
            let mut capacity = self.capacity;
            while capacity <= combined {
                capacity *= 2;
            }
            self.bytes.try_reserve_exact(capacity - self.bytes.len())?;
            self.capacity = capacity;
        }
        self.bytes.extend_from_slice(text);
        Ok(())
    }

    /// Drains `reader` to the end in fixed-size chunks.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = Self::create("")?;
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err).wrap_err("failed to read into buffer"),
            };
            buffer
                .append(&chunk[..read])
                .wrap_err("buffer allocation failed")?;
        }
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content as text; invalid UTF-8 is replaced rather than rejected.
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn release(self) {
        drop(self);
    }
}
