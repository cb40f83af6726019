//! Random sample table for the long-string band.
//!
//! Strings of 128 bytes or more are cut into 16 chunks and only a few 8-byte
//! words are folded. Which word inside each chunk is read comes from this
//! table: bucket `i` (keyed by `floor(log2(chunk_size))`) holds two offsets in
//! `[0, 2^(i+1))`.
//!
//! The table is seeded from the process id and the clock, so sampling
//! positions (and therefore long-string digests) differ between runs. That is
//! the point: inputs crafted against one run's positions do not carry over.

use rand::{RngCore, SeedableRng, rngs::SmallRng};

use crate::mix;

/// Number of buckets, one per possible `floor(log2(u32))`.
pub const BUCKETS: usize = 32;

/// Buckets 0..3 cover chunks under 8 bytes, which are never sampled.
pub const UNSAMPLED_BUCKETS: usize = 3;

/// Width of one generator draw, matching a 31-bit `RAND_MAX`.
pub const DRAW_BITS: u32 = 31;

/// Mask selecting `[0, 2^(bucket+1))`.
#[inline]
#[must_use]
pub const fn bucket_mask(bucket: u32) -> u32 {
  u32::MAX >> (31 - (bucket & 31))
}

/// Per-bucket sampling offsets. Immutable once built.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SampleTable {
  pos: [[u32; 2]; BUCKETS],
}

impl SampleTable {
  /// All-zero table, used by kernels that never sample.
  pub const ZERO: Self = Self {
    pos: [[0; 2]; BUCKETS],
  };

  /// Build a table from a 32-bit seed with the default draw width.
  #[must_use]
  pub fn generate(seed: u32) -> Self {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    Self::from_rng(&mut rng, DRAW_BITS)
  }

  /// Build a table from `rng`, treating each draw as `draw_bits` wide.
  ///
  /// Buckets whose range fits in one draw take a masked draw. Wider buckets
  /// take a draw scaled by the first slot of bucket `i - draw_bits`, which
  /// stretches a narrow generator over large chunk sizes. A zero scale is
  /// replaced by one.
  #[must_use]
  pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R, draw_bits: u32) -> Self {
    let width = draw_bits.clamp(1, 32);
    let mut draw = || {
      let v = rng.next_u32();
      if width == 32 { v } else { v >> (32 - width) }
    };

    let mut pos = [[0u32; 2]; BUCKETS];
    for i in UNSAMPLED_BUCKETS..BUCKETS {
      let bucket = i as u32;
      let mask = bucket_mask(bucket);

      let slots = if bucket < width {
        [draw() & mask, draw() & mask]
      } else {
        let scale = match pos.get(i - width as usize) {
          Some(&[0, _]) | None => 1,
          Some(&[s, _]) => s,
        };
        [draw().wrapping_mul(scale) & mask, draw().wrapping_mul(scale) & mask]
      };

      if let Some(slot) = pos.get_mut(i) {
        *slot = slots;
      }
    }

    Self { pos }
  }

  /// The two offsets for `bucket`; out-of-range buckets read as zero.
  #[inline(always)]
  #[must_use]
  pub fn offsets(&self, bucket: u32) -> (u32, u32) {
    match self.pos.get(bucket as usize) {
      Some(&[p1, p2]) => (p1, p2),
      None => (0, 0),
    }
  }

  #[inline]
  #[must_use]
  pub fn buckets(&self) -> &[[u32; 2]; BUCKETS] {
    &self.pos
  }
}

impl core::fmt::Debug for SampleTable {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.pos.iter()).finish()
  }
}

/// Run-specific seed: process id and wall clock, folded through the mixer.
///
/// Deliberately weak entropy. It only needs to decorrelate runs.
#[cfg(feature = "std")]
#[must_use]
pub fn process_seed() -> u32 {
  let pid = std::process::id();
  let now = std::time::SystemTime::now()
    .duration_since(std::time::UNIX_EPOCH)
    .map_or(0, |d| (d.as_secs() as u32) ^ d.subsec_nanos());
  combine_seed(pid, now)
}

/// Without `std` there is no pid or clock; a stack address stands in for both.
#[cfg(not(feature = "std"))]
#[must_use]
pub fn process_seed() -> u32 {
  let marker = 0u8;
  let addr = core::ptr::addr_of!(marker) as usize;
  combine_seed(addr as u32, (addr >> 16) as u32)
}

#[inline]
fn combine_seed(pid: u32, now: u32) -> u32 {
  mix::finish(pid, now, mix::mix(pid, now, 14))
}
