//! Little-endian word reads.
//!
//! All reads are bounds-checked and total: bytes outside the slice read as
//! zero. Hashing code only asks for in-range windows, so the zero fill is a
//! release-mode backstop, never a semantic.

/// Read a little-endian `u32` starting at `at`.
#[inline(always)]
#[must_use]
pub fn read_u32le(data: &[u8], at: usize) -> u32 {
  let mut buf = [0u8; 4];
  if let Some(src) = at.checked_add(4).and_then(|end| data.get(at..end)) {
    buf.copy_from_slice(src);
  }
  u32::from_le_bytes(buf)
}

/// Read a little-endian `u64` starting at `at`.
#[inline(always)]
#[must_use]
pub fn read_u64le(data: &[u8], at: usize) -> u64 {
  let mut buf = [0u8; 8];
  if let Some(src) = at.checked_add(8).and_then(|end| data.get(at..end)) {
    buf.copy_from_slice(src);
  }
  u64::from_le_bytes(buf)
}

/// Read a little-endian `u64` at `at`, pulled back so the window ends inside `data`.
///
/// Requires `data.len() >= 8` for a full-width read.
#[inline(always)]
#[must_use]
pub fn sample_u64le(data: &[u8], at: usize) -> u64 {
  read_u64le(data, at.min(data.len().saturating_sub(8)))
}

/// Byte at `at`, or zero.
#[inline(always)]
#[must_use]
pub fn byte(data: &[u8], at: usize) -> u32 {
  data.get(at).copied().map_or(0, u32::from)
}

#[cfg(test)]
mod tests {
  use super::*;

  const DATA: [u8; 10] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];

  #[test]
  fn reads_are_little_endian() {
    assert_eq!(read_u32le(&DATA, 0), 0x0403_0201);
    assert_eq!(read_u32le(&DATA, 6), 0x0A09_0807);
    assert_eq!(read_u64le(&DATA, 2), 0x0A09_0807_0605_0403);
  }

  #[test]
  fn unaligned_offsets() {
    for at in 0..=6 {
      let expect = u32::from_le_bytes(DATA[at..at + 4].try_into().unwrap());
      assert_eq!(read_u32le(&DATA, at), expect);
    }
  }

  #[test]
  fn out_of_range_reads_zero() {
    assert_eq!(read_u32le(&DATA, 7), 0);
    assert_eq!(read_u64le(&DATA, 3), 0);
    assert_eq!(read_u64le(&DATA, usize::MAX), 0);
    assert_eq!(byte(&DATA, 10), 0);
  }

  #[test]
  fn sample_clamps_to_tail() {
    assert_eq!(sample_u64le(&DATA, 100), read_u64le(&DATA, 2));
    assert_eq!(sample_u64le(&DATA, 1), read_u64le(&DATA, 1));
  }
}
