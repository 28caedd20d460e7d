//! Bounds-checked cursor over a frame payload.
//!
//! A [`WireReader`] tracks two ends:
//!
//! ```text
//! ┌──────────── buffer (bytes actually received) ───────┐
//! │ consumed │ available                                 │
//! └──────────┴───────────────────────────────────────────┘
//!            ^pos                         ^limit (declared frame end)
//! ```
//!
//! The *limit* is the size the enclosing frame declared. It can lie beyond
//! the end of the buffer when input is truncated: reads that run past the
//! buffer fail with `TruncatedInput`, while a short-string length octet that
//! points past the declared limit is an `Encoding` error.

use bytes::{Buf, Bytes};

use super::short_string::ShortString;
use crate::error::{Result, WireError};

/// Saved reader position, used to roll back a failed composite decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pos: usize,
    limit: usize,
}

/// Cursor over a `Bytes` buffer with a declared frame limit.
#[derive(Debug, Clone)]
pub struct WireReader {
    buf: Bytes,
    pos: usize,
    limit: usize,
}

impl WireReader {
    /// Create a reader whose declared limit is the buffer length.
    pub fn new(buf: Bytes) -> Self {
        let limit = buf.len();
        Self { buf, pos: 0, limit }
    }

    /// Create a reader by copying a slice.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Create a reader with an explicit declared size.
    ///
    /// `declared_size` may exceed `buf.len()`; the missing tail then
    /// surfaces as `TruncatedInput` when read.
    pub fn with_declared_size(buf: Bytes, declared_size: usize) -> Self {
        Self {
            buf,
            pos: 0,
            limit: declared_size,
        }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes that can actually be read before hitting the buffer end or the
    /// declared limit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().min(self.limit).saturating_sub(self.pos)
    }

    /// Bytes left before the declared limit, whether received or not.
    #[inline]
    pub fn declared_remaining(&self) -> usize {
        self.limit.saturating_sub(self.pos)
    }

    /// Check if nothing is left before the declared limit.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.declared_remaining() == 0
    }

    /// Save the current position and limit.
    #[inline]
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            limit: self.limit,
        }
    }

    /// Return to a previously saved mark.
    #[inline]
    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.limit = mark.limit;
    }

    /// Narrow the declared limit to `size` bytes from the current position.
    ///
    /// Returns the previous limit so it can be restored with
    /// [`restore_limit`](Self::restore_limit).
    pub fn push_limit(&mut self, size: usize) -> usize {
        let previous = self.limit;
        self.limit = self.pos.saturating_add(size);
        previous
    }

    /// Restore a limit returned by [`push_limit`](Self::push_limit).
    #[inline]
    pub fn restore_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(WireError::truncated(needed, available));
        }
        Ok(())
    }

    /// Take `n` bytes as a zero-copy slice of the underlying buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.ensure(n)?;
        let out = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf[self.pos])
    }

    /// Read an unsigned octet.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let v = self.buf[self.pos];
        self.pos += 1;
        Ok(v)
    }

    /// Read a Big Endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let v = (&self.buf[self.pos..]).get_u16();
        self.pos += 2;
        Ok(v)
    }

    /// Read a Big Endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let v = (&self.buf[self.pos..]).get_u32();
        self.pos += 4;
        Ok(v)
    }

    /// Read a Big Endian u64.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        let v = (&self.buf[self.pos..]).get_u64();
        self.pos += 8;
        Ok(v)
    }

    /// Read a signed octet.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|v| v as i8)
    }

    /// Read a Big Endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_u16().map(|v| v as i16)
    }

    /// Read a Big Endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_u32().map(|v| v as i32)
    }

    /// Read a Big Endian i64.
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_u64().map(|v| v as i64)
    }

    /// Read an IEEE 754 single.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Read an IEEE 754 double.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_u64().map(f64::from_bits)
    }

    /// Read one packed-boolean octet (8 independent flags).
    #[inline]
    pub fn read_bitfield(&mut self) -> Result<u8> {
        self.read_u8()
    }

    /// Read a short string: `[len:u8][len bytes of UTF-8]`.
    ///
    /// # Errors
    ///
    /// - `Encoding` if the length octet points past the declared frame end,
    ///   or the bytes are not UTF-8.
    /// - `TruncatedInput` if the bytes fall inside the declared frame but
    ///   have not been received.
    pub fn read_short_string(&mut self) -> Result<ShortString> {
        let mark = self.mark();
        let result = self.read_short_string_inner();
        if result.is_err() {
            self.reset(mark);
        }
        result
    }

    fn read_short_string_inner(&mut self) -> Result<ShortString> {
        let len = self.read_u8()? as usize;
        if len > self.declared_remaining() {
            return Err(WireError::Encoding(format!(
                "Short string length {} exceeds remaining frame size {}",
                len,
                self.declared_remaining()
            )));
        }
        let raw = self.read_bytes(len)?;
        let text = std::str::from_utf8(&raw)
            .map_err(|e| WireError::Encoding(format!("Short string is not UTF-8: {}", e)))?;
        ShortString::new(text)
    }

    /// Read a long string: `[len:u32][len bytes]`, returned zero-copy.
    pub fn read_long_string(&mut self) -> Result<Bytes> {
        let mark = self.mark();
        let result = self.read_u32().and_then(|len| self.read_bytes(len as usize));
        if result.is_err() {
            self.reset(mark);
        }
        result
    }
}
