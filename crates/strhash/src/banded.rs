//! Length-banded CRC-32C hasher.
//!
//! Four algorithms, chosen by length alone:
//!
//! | Band | Lengths | Reads |
//! |------|---------|-------|
//! | [`Band::Tiny`] | 1..4 | first, middle, last byte (no CRC) |
//! | [`Band::Short`] | 4..16 | first and last word, overlapping |
//! | [`Band::Medium`] | 16..128 | every 16-byte stride plus the final 16 bytes |
//! | [`Band::Long`] | 128.. | 16 sampled words plus head and tail |
//!
//! The long band is sub-linear: cost is bounded regardless of length, at the
//! price of ignoring most of the bytes. That is acceptable for bucketing a
//! string table and unacceptable for anything resembling integrity checking.
//!
//! Empty input is a caller error; [`crate::StrHasher::digest`] handles it.

use core::fmt;

use crate::{
  fallback,
  kernels::CrcKernel,
  log2::log2_floor,
  sample::SampleTable,
  util::{read_u32le, read_u64le, sample_u64le},
};

/// Number of chunks a long string is partitioned into.
pub const CHUNKS: usize = 16;

/// Length band of the accelerated hasher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
  /// `[1, 4)`
  Tiny,
  /// `[4, 16)`
  Short,
  /// `[16, 128)`
  Medium,
  /// `[128, ∞)`
  Long,
}

impl Band {
  /// The band `len` falls in; `None` for zero.
  #[inline]
  #[must_use]
  pub const fn for_len(len: usize) -> Option<Self> {
    match len {
      0 => None,
      1..4 => Some(Self::Tiny),
      4..16 => Some(Self::Short),
      16..128 => Some(Self::Medium),
      _ => Some(Self::Long),
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Tiny => "1-4",
      Self::Short => "4-16",
      Self::Medium => "16-128",
      Self::Long => "128+",
    }
  }
}

impl fmt::Display for Band {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Hash `data` (non-empty) with kernel `k`.
#[inline]
pub fn hash<K: CrcKernel>(k: K, data: &[u8], table: &SampleTable) -> u32 {
  debug_assert!(!data.is_empty(), "banded hash requires non-empty input");
  match Band::for_len(data.len()) {
    Some(Band::Long) => hash_128_above(k, data, table),
    Some(Band::Medium) => hash_16_128(k, data),
    Some(Band::Short) => hash_4_16(k, data),
    Some(Band::Tiny) | None => fallback::hash_tiny(data),
  }
}

#[inline]
fn hash_4_16<K: CrcKernel>(k: K, data: &[u8]) -> u32 {
  let len = data.len();
  let (v1, v2) = if len >= 8 {
    (read_u64le(data, 0), read_u64le(data, len - 8))
  } else {
    (u64::from(read_u32le(data, 0)), u64::from(read_u32le(data, len - 4)))
  };

  let h = k.crc_u32(0, len as u32);
  let h = k.crc_u64(h, v1);
  k.crc_u64(h, v2)
}

#[inline]
fn hash_16_128<K: CrcKernel>(k: K, data: &[u8]) -> u32 {
  let len = data.len();
  let mut h1 = k.crc_u32(0, len as u32);
  let mut h2 = 0u32;

  let mut i = 0;
  while i + 16 < len {
    h1 = h1.wrapping_add(k.crc_u64(h1, read_u64le(data, i)));
    h2 = h2.wrapping_add(k.crc_u64(h2, read_u64le(data, i + 8)));
    i += 16;
  }

  // Always cover the tail, even if the stride already read part of it.
  h1 = k.crc_u64(h1, read_u64le(data, len - 16));
  h2 = k.crc_u64(h2, read_u64le(data, len - 8));

  k.crc_u32(h1, h2)
}

#[inline]
fn hash_128_above<K: CrcKernel>(k: K, data: &[u8], table: &SampleTable) -> u32 {
  let len = data.len();
  let chunk = len / CHUNKS;
  let order = log2_floor(u32::try_from(chunk).unwrap_or(u32::MAX)).unwrap_or(0);
  let (pos1, pos2) = table.offsets(order);
  let (pos1, pos2) = (pos1 as usize, pos2 as usize);

  let mut h1 = k.crc_u32(0, len as u32);
  let mut h2 = 0u32;

  // Seven chunk pairs: pos1 into the first chunk of each pair, pos2 into the second.
  for pair in 0..CHUNKS / 2 - 1 {
    let base = 2 * pair * chunk;
    h1 = k.crc_u64(h1, sample_u64le(data, base + pos1));
    h2 = k.crc_u64(h2, sample_u64le(data, base + chunk + pos2));
  }

  // Last pair: pos2 is mirrored from the end of the final chunk.
  let base = (CHUNKS - 2) * chunk;
  h1 = k.crc_u64(h1, sample_u64le(data, base + pos1));
  h2 = k.crc_u64(h2, sample_u64le(data, (base + 2 * chunk).saturating_sub(8 + pos2)));

  h1 = k.crc_u64(h1, read_u64le(data, 0));
  h2 = k.crc_u64(h2, read_u64le(data, len - 8));

  k.crc_u32(h1, h2)
}
