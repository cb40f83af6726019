//! aarch64 hardware CRC-32C kernel.
//!
//! Uses the ARMv8 CRC32 extension (`crc32cw` / `crc32cx`).
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::aarch64::{__crc32cd, __crc32cw};

use platform::caps::aarch64;

use super::CrcKernel;
use crate::{banded, sample::SampleTable};

/// Proof that the CRC extension is available. Only [`Crc::detect`] creates one.
#[derive(Clone, Copy, Debug)]
pub struct Crc {
  _private: (),
}

impl Crc {
  /// Returns the token if the running CPU has the CRC32 extension.
  #[inline]
  #[must_use]
  pub fn detect() -> Option<Self> {
    platform::caps().has(aarch64::CRC32C_READY).then_some(Self { _private: () })
  }
}

impl CrcKernel for Crc {
  const NAME: &'static str = "aarch64/crc";

  #[inline(always)]
  fn crc_u32(self, crc: u32, v: u32) -> u32 {
    // SAFETY: a `Crc` only exists once the CRC extension has been detected.
    unsafe { __crc32cw(crc, v) }
  }

  #[inline(always)]
  fn crc_u64(self, crc: u32, v: u64) -> u32 {
    // SAFETY: as above.
    unsafe { __crc32cd(crc, v) }
  }
}

/// Banded hash compiled with the CRC extension enabled.
///
/// # Safety
/// Caller must ensure the CPU supports the `crc` target feature.
#[target_feature(enable = "crc")]
unsafe fn hash_crc(token: Crc, data: &[u8], table: &SampleTable) -> u32 {
  banded::hash(token, data, table)
}

#[inline]
pub(crate) fn hash_runtime(data: &[u8], table: &SampleTable) -> u32 {
  // SAFETY: `kernels::hardware` hands this out only after `Crc::detect` succeeded.
  unsafe { hash_crc(Crc { _private: () }, data, table) }
}
