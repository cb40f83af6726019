//! Error types.

use core::fmt;

/// The hardware CRC-32C kernel is not available on this CPU.
///
/// Returned by [`crate::StrHasher::accelerated`]. Never returned by the
/// process-wide selector, which falls back to the portable hasher instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct KernelUnavailable;

impl KernelUnavailable {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for KernelUnavailable {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for KernelUnavailable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("hardware crc32c kernel unavailable on this cpu")
  }
}

impl core::error::Error for KernelUnavailable {}
