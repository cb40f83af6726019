//! CRC-32C step kernels.
//!
//! The banded hasher only needs one operation from the hardware: fold a 32- or
//! 64-bit word into a CRC-32C register. [`CrcKernel`] is that seam. Each target
//! with a suitable instruction contributes a zero-sized token type that can
//! only be obtained after the CPU probe succeeds; [`Portable`] computes the
//! same values in software everywhere.
//!
//! | Kernel | Target | Instruction |
//! |--------|--------|-------------|
//! | [`Portable`] | any | table lookup |
//! | `x86_64::Sse42` | x86_64 | SSE4.2 `crc32` |
//! | `aarch64::Crc` | aarch64 | ARMv8 `crc32cw` / `crc32cx` |

use crate::sample::SampleTable;

pub mod portable;
#[cfg(target_arch = "x86_64")]
pub mod x86_64;
#[cfg(target_arch = "aarch64")]
pub mod aarch64;

pub use portable::Portable;

/// Hash entry point stored by a selected hasher.
pub(crate) type HashFn = fn(&[u8], &SampleTable) -> u32;

/// One CRC-32C register update.
///
/// Semantics are those of the hardware instructions: reflected Castagnoli
/// polynomial, little-endian word, no pre- or post-inversion.
pub trait CrcKernel: Copy {
  /// Kernel name for introspection.
  const NAME: &'static str;

  /// Fold a 32-bit word into `crc`.
  fn crc_u32(self, crc: u32, v: u32) -> u32;

  /// Fold a 64-bit word into `crc`.
  fn crc_u64(self, crc: u32, v: u64) -> u32;
}

/// The hardware kernel for this CPU, if it has one.
#[cfg(target_arch = "x86_64")]
pub(crate) fn hardware() -> Option<(HashFn, &'static str)> {
  use x86_64::Sse42;
  Sse42::detect().map(|_| (x86_64::hash_runtime as HashFn, Sse42::NAME))
}

#[cfg(target_arch = "aarch64")]
pub(crate) fn hardware() -> Option<(HashFn, &'static str)> {
  use aarch64::Crc;
  Crc::detect().map(|_| (aarch64::hash_runtime as HashFn, Crc::NAME))
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) fn hardware() -> Option<(HashFn, &'static str)> {
  None
}

/// Banded hash through the software kernel.
pub(crate) fn hash_emulated(data: &[u8], table: &SampleTable) -> u32 {
  crate::banded::hash(Portable, data, table)
}
