//! x86_64 hardware CRC-32C kernel.
//!
//! Uses the SSE4.2 `crc32` instruction (Castagnoli polynomial).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::x86_64::{_mm_crc32_u32, _mm_crc32_u64};

use platform::caps::x86;

use super::CrcKernel;
use crate::{banded, sample::SampleTable};

/// Proof that SSE4.2 is available. Only [`Sse42::detect`] creates one.
#[derive(Clone, Copy, Debug)]
pub struct Sse42 {
  _private: (),
}

impl Sse42 {
  /// Returns the token if the running CPU supports SSE4.2.
  #[inline]
  #[must_use]
  pub fn detect() -> Option<Self> {
    platform::caps().has(x86::CRC32C_READY).then_some(Self { _private: () })
  }
}

impl CrcKernel for Sse42 {
  const NAME: &'static str = "x86_64/sse4.2";

  #[inline(always)]
  fn crc_u32(self, crc: u32, v: u32) -> u32 {
    // SAFETY: an `Sse42` only exists once SSE4.2 has been detected.
    unsafe { _mm_crc32_u32(crc, v) }
  }

  #[inline(always)]
  fn crc_u64(self, crc: u32, v: u64) -> u32 {
    // SAFETY: as above. The instruction zero-extends its 32-bit result.
    unsafe { _mm_crc32_u64(u64::from(crc), v) as u32 }
  }
}

/// Banded hash compiled with SSE4.2 enabled so the kernel calls inline.
///
/// # Safety
/// Caller must ensure the CPU supports the `sse4.2` target feature.
#[target_feature(enable = "sse4.2")]
unsafe fn hash_sse42(token: Sse42, data: &[u8], table: &SampleTable) -> u32 {
  banded::hash(token, data, table)
}

#[inline]
pub(crate) fn hash_runtime(data: &[u8], table: &SampleTable) -> u32 {
  // SAFETY: `kernels::hardware` hands this out only after `Sse42::detect` succeeded.
  unsafe { hash_sse42(Sse42 { _private: () }, data, table) }
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;
  use crate::kernels::Portable;

  proptest! {
    #[test]
    fn matches_portable_kernel(crc in any::<u32>(), w32 in any::<u32>(), w64 in any::<u64>()) {
      let Some(hw) = Sse42::detect() else { return Ok(()) };
      prop_assert_eq!(hw.crc_u32(crc, w32), Portable.crc_u32(crc, w32));
      prop_assert_eq!(hw.crc_u64(crc, w64), Portable.crc_u64(crc, w64));
    }
  }
}
