//! CPU capability representation.
//!
//! [`Caps`] answers one question: "which hashing-relevant instructions can I
//! legally run on this machine?" Bits are architecture-specific but the API is
//! uniform across targets.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-63: aarch64 features

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities as a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`; pass it around freely.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set from a raw word.
  ///
  /// Only available with the `testing` feature or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(word: u64) -> Self {
    Self(word)
  }

  /// The raw underlying word.
  #[inline]
  #[must_use]
  pub const fn as_raw(self) -> u64 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Remove every feature in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Names of the features present, in bit order.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    NAMES.iter().filter(move |(c, _)| self.has(*c)).map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture the capabilities were detected on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Architecture of the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature Constants
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 features.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  /// SSE4.2, which carries the `crc32` instruction (CRC-32C polynomial).
  pub const SSE42: Caps = Caps::bit(1);

  /// Everything the hardware CRC-32C kernel needs.
  pub const CRC32C_READY: Caps = SSE42;
}

/// aarch64 features.
pub mod aarch64 {
  use super::Caps;

  pub const NEON: Caps = Caps::bit(32);
  /// ARMv8 CRC32 extension (`crc32c{b,h,w,x}`).
  pub const CRC: Caps = Caps::bit(33);

  /// Everything the hardware CRC-32C kernel needs.
  pub const CRC32C_READY: Caps = CRC;
}

const NAMES: [(Caps, &str); 4] = [
  (x86::SSE2, "sse2"),
  (x86::SSE42, "sse4.2"),
  (aarch64::NEON, "neon"),
  (aarch64::CRC, "crc"),
];

/// Capability set the hardware CRC-32C kernel requires on this target.
///
/// [`Caps::NONE`] is never sufficient: on targets without a kernel this
/// returns a bit no detector ever sets.
#[inline]
#[must_use]
pub const fn crc32c_required() -> Caps {
  match Arch::current() {
    Arch::X86_64 => x86::CRC32C_READY,
    Arch::Aarch64 => aarch64::CRC32C_READY,
    Arch::Other => Caps::bit(63),
  }
}


// ─────────────────────────────────────────────────────────────────────────────
// Property-Based Tests (proptest)
// Note: proptest persists failures to disk, which Miri doesn't support.
// ─────────────────────────────────────────────────────────────────────────────
