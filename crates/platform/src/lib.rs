//! CPU capability detection for strhash.
//!
//! This crate is the single place the workspace asks "can this CPU run the
//! hardware CRC-32C instruction?". Everything else dispatches on its answer.
//!
//! # Main Entry Point
//!
//! ```
//! if platform::hwcrc_supported() {
//!   // SSE4.2 `crc32` (x86_64) or the ARMv8 CRC extension (aarch64) is usable.
//! }
//! println!("{:?} on {}", platform::caps(), platform::arch());
//! ```
//!
//! # Design
//!
//! 1. **One API**: hashing code queries `platform::caps()` instead of ad-hoc detection.
//! 2. **Cached**: runtime detection runs once, kept in a `OnceLock` (std) or atomics (no_std).
//! 3. **Never fails**: unsupported architectures report [`Caps::NONE`] and build fine.
//! 4. **Miri-safe**: under Miri, detection always reports portable-only caps.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::Detected;

/// Detected CPU capabilities and architecture.
///
/// Cached after the first call; an override set via [`set_caps_override`]
/// takes precedence.
#[inline]
#[must_use]
pub fn get() -> Detected {
  detect::get()
}

/// Just the CPU capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get().caps
}

/// Just the architecture.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  detect::get().arch
}

/// Whether the hardware CRC-32C instruction is usable on this CPU.
///
/// Pure and stable across calls (barring overrides); returns `false` on
/// architectures without a supported instruction rather than failing.
#[inline]
#[must_use]
pub fn hwcrc_supported() -> bool {
  caps().has(caps::crc32c_required())
}

/// Fresh detection bypassing the cache and any override.
#[inline]
#[must_use]
pub fn detect_uncached() -> Detected {
  detect::detect_uncached()
}

/// Initialize with user-supplied capabilities.
///
/// Useful on bare metal where the CPU is known at deployment. Equivalent to
/// `set_caps_override(Some(caps))`.
///
/// Claiming a capability the CPU lacks makes hashing fault with an illegal
/// instruction.
#[inline]
pub fn init_with_caps(caps: Caps) {
  detect::set_caps_override(Some(caps));
}

/// Set or clear the capabilities override.
///
/// Consumers that cache their own selection (as `strhash` does) only observe
/// the override if it is set before their first selection.
///
/// ```
/// platform::set_caps_override(Some(platform::Caps::NONE));
/// assert!(!platform::hwcrc_supported());
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}
