//! Software CRC-32C, bit-identical to the hardware instructions.
//!
//! Byte-at-a-time table lookup. Slow next to `crc32`, but the banded hasher
//! folds at most a couple dozen words per string, so it is still usable.

use super::CrcKernel;

/// CRC-32C polynomial in reflected (bit-reversed) form. Normal form is 0x1EDC6F41.
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

static TABLE: [u32; 256] = generate_table(POLYNOMIAL);

#[allow(clippy::indexing_slicing)] // const evaluation; i < 256
const fn generate_table(poly: u32) -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0;
  while i < 256 {
    let mut crc = i as u32;
    let mut bit = 0;
    while bit < 8 {
      crc = (crc >> 1) ^ (poly & 0u32.wrapping_sub(crc & 1));
      bit += 1;
    }
    table[i] = crc;
    i += 1;
  }
  table
}

/// Fold `bytes` into a raw CRC-32C register.
#[inline]
#[must_use]
pub fn update(mut crc: u32, bytes: &[u8]) -> u32 {
  for &byte in bytes {
    #[allow(clippy::indexing_slicing)] // index is masked to 0..=255
    let entry = TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize];
    crc = (crc >> 8) ^ entry;
  }
  crc
}

/// Table-driven kernel. Always available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Portable;

impl CrcKernel for Portable {
  const NAME: &'static str = "portable/crc32c";

  #[inline]
  fn crc_u32(self, crc: u32, v: u32) -> u32 {
    update(crc, &v.to_le_bytes())
  }

  #[inline]
  fn crc_u64(self, crc: u32, v: u64) -> u32 {
    update(crc, &v.to_le_bytes())
  }
}
