//! Portable fallback hasher.
//!
//! lookup3-style mixing of three overlapping words plus the length. No
//! hardware instructions, defined for every length (the empty string hashes
//! to 0). Used whenever the CPU has no CRC-32C instruction.

use crate::{
  EMPTY_DIGEST,
  mix::{self, finish},
  util::{byte, read_u32le},
};

/// Kernel name for introspection.
pub const NAME: &str = "portable/lookup3";

/// Hash `data`.
#[must_use]
pub fn hash(data: &[u8]) -> u32 {
  let len = data.len();
  if len >= 4 {
    let a = read_u32le(data, 0);
    let h = (len as u32) ^ read_u32le(data, len - 4);
    let b = read_u32le(data, (len >> 1) - 2);
    let h = mix::mix(h, b, 14);
    let b = b.wrapping_add(read_u32le(data, (len >> 2) - 1));
    finish(a, b, h)
  } else if len > 0 {
    hash_tiny(data)
  } else {
    EMPTY_DIGEST
  }
}

/// Byte-wise variant for lengths 1..4: first, middle and last byte.
#[inline]
#[must_use]
pub(crate) fn hash_tiny(data: &[u8]) -> u32 {
  let len = data.len();
  let a = byte(data, 0);
  let h = (len as u32) ^ byte(data, len.saturating_sub(1));
  let b = byte(data, len >> 1);
  let h = mix::mix(h, b, 14);
  finish(a, b, h)
}

/// Same signature as the banded entry points so it can be installed.
pub(crate) fn hash_entry(data: &[u8], _table: &crate::SampleTable) -> u32 {
  hash(data)
}

#[cfg(test)]
mod tests {
  use std::vec::Vec;

  use super::*;

  /// Straight-line reference written against the mixing rules.
  fn reference(data: &[u8]) -> u32 {
    let len = data.len();
    let get = |at: usize| u32::from_le_bytes(data[at..at + 4].try_into().unwrap());
    if len == 0 {
      return 0;
    }
    let (mut a, mut b, mut h): (u32, u32, u32);
    if len >= 4 {
      a = get(0);
      h = len as u32 ^ get(len - 4);
      b = get((len >> 1) - 2);
      h ^= b;
      h = h.wrapping_sub(b.rotate_left(14));
      b = b.wrapping_add(get((len >> 2) - 1));
    } else {
      a = u32::from(data[0]);
      h = len as u32 ^ u32::from(data[len - 1]);
      b = u32::from(data[len >> 1]);
      h ^= b;
      h = h.wrapping_sub(b.rotate_left(14));
    }
    a ^= h;
    a = a.wrapping_sub(h.rotate_left(11));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(25));
    h ^= b;
    h = h.wrapping_sub(b.rotate_left(16));
    h
  }

  #[test]
  fn empty_is_zero() {
    assert_eq!(hash(b""), 0);
  }

  #[test]
  fn matches_reference_for_all_small_lengths() {
    let data: Vec<u8> = (0..200u32).map(|i| (i.wrapping_mul(151) ^ 0x5A) as u8).collect();
    for len in 0..=data.len() {
      assert_eq!(hash(&data[..len]), reference(&data[..len]), "len {len}");
    }
  }

  #[test]
  fn length_participates() {
    // Same bytes, different lengths.
    assert_ne!(hash(b"a"), hash(b"aa"));
    assert_ne!(hash(b"aaaa"), hash(b"aaaaa"));
  }

  #[test]
  fn deterministic() {
    let s = b"the quick brown fox jumps over the lazy dog";
    assert_eq!(hash(s), hash(s));
  }
}
