//! Symmetric `write_*` helpers.
//!
//! Every writer appends to a `BufMut` in Big Endian order and never fails:
//! the values were range-checked when the owning type was constructed.

use bytes::BufMut;

use super::short_string::ShortString;

/// Write an unsigned octet.
#[inline]
pub fn write_u8(out: &mut impl BufMut, value: u8) {
    out.put_u8(value);
}

/// Write a Big Endian u16.
#[inline]
pub fn write_u16(out: &mut impl BufMut, value: u16) {
    out.put_u16(value);
}

/// Write a Big Endian u32.
#[inline]
pub fn write_u32(out: &mut impl BufMut, value: u32) {
    out.put_u32(value);
}

/// Write a Big Endian u64.
#[inline]
pub fn write_u64(out: &mut impl BufMut, value: u64) {
    out.put_u64(value);
}

/// Write one packed-boolean octet.
#[inline]
pub fn write_bitfield(out: &mut impl BufMut, value: u8) {
    out.put_u8(value);
}

/// Write `[len:u8][bytes]`.
pub fn write_short_string(out: &mut impl BufMut, value: &ShortString) {
    out.put_u8(value.len() as u8);
    out.put_slice(value.as_bytes());
}

/// Write `[len:u32][bytes]`.
///
/// # Panics
///
/// Panics in debug builds if `value` is longer than `u32::MAX`.
pub fn write_long_string(out: &mut impl BufMut, value: &[u8]) {
    debug_assert!(value.len() <= u32::MAX as usize);
    out.put_u32(value.len() as u32);
    out.put_slice(value);
}

/// Pack booleans LSB-first: flag `i` lands in bit `i % 8` of byte `i / 8`.
///
/// # Example
///
/// ```
/// use amqp_wire::codec::writer::pack_bits;
///
/// assert_eq!(pack_bits(&[true, false]), vec![0x01]);
/// assert_eq!(pack_bits(&[false, true, true]), vec![0x06]);
/// ```
pub fn pack_bits(flags: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; flags.len().div_ceil(8)];
    for (i, &flag) in flags.iter().enumerate() {
        if flag {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    bytes
}
