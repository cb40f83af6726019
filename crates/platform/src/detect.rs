//! Runtime CPU detection.
//!
//! This module provides the unified [`get()`] function. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (CPUID on x86_64, the ELF auxiliary vector on aarch64 Linux)
//! - Caching (via `OnceLock` with `std`, atomics without)
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns portable caps)

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::{Arch, Caps};

/// Per-architecture probes.
///
/// Each submodule exposes `caps_static()` (compile-time features) and
/// `caps_runtime()` (what the running CPU and OS report).
mod arch {
  #[cfg(target_arch = "x86_64")]
  mod x86;
  #[cfg(target_arch = "x86_64")]
  pub(super) use x86::{caps_runtime, caps_static};

  #[cfg(target_arch = "aarch64")]
  mod aarch64;
  #[cfg(target_arch = "aarch64")]
  pub(super) use aarch64::{caps_runtime, caps_static};

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  pub(super) fn caps_static() -> crate::Caps {
    crate::Caps::NONE
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  pub(super) fn caps_runtime() -> crate::Caps {
    crate::Caps::NONE
  }
}

/// Detection result: capabilities plus the architecture they apply to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  pub caps: Caps,
  pub arch: Arch,
}

impl Detected {
  /// Portable-only result (no accelerated instructions).
  pub const PORTABLE: Self = Self {
    caps: Caps::NONE,
    arch: Arch::Other,
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Atomic cache for no_std builds.
///
/// `Arch` is fixed per target, so only the capability word is stored.
#[cfg(not(feature = "std"))]
mod cache {
  use core::sync::atomic::AtomicU8;

  use super::*;

  /// 0 = uninitialized, 1 = initializing, 2 = initialized
  static STATE: AtomicU8 = AtomicU8::new(0);
  static CACHED_BITS: AtomicU64 = AtomicU64::new(0);

  #[inline]
  pub fn get_or_init(f: fn() -> Detected) -> Detected {
    if STATE.load(Ordering::Acquire) == 2 {
      return load_cached();
    }

    match STATE.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let result = f();
        CACHED_BITS.store(result.caps.0, Ordering::Release);
        STATE.store(2, Ordering::Release);
        result
      }
      Err(1) => {
        while STATE.load(Ordering::Acquire) == 1 {
          core::hint::spin_loop();
        }
        load_cached()
      }
      Err(_) => load_cached(),
    }
  }

  fn load_cached() -> Detected {
    Detected {
      caps: Caps(CACHED_BITS.load(Ordering::Acquire)),
      arch: Arch::current(),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

#[inline]
fn get_override() -> Option<Detected> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(Detected {
    caps: Caps(OVERRIDE_BITS.load(Ordering::Acquire)),
    arch: Arch::current(),
  })
}

pub(crate) fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

#[inline]
pub(crate) fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public Entry Points
// ─────────────────────────────────────────────────────────────────────────────

/// Detected capabilities, cached after the first call.
///
/// An override set through [`set_caps_override`] takes precedence.
#[inline]
#[must_use]
pub fn get() -> Detected {
  // Miri cannot interpret CPUID or the CRC intrinsics.
  #[cfg(miri)]
  {
    Detected::PORTABLE
  }

  #[cfg(not(miri))]
  {
    if let Some(result) = get_override() {
      return result;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Detected> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      cache::get_or_init(detect_uncached)
    }
  }
}

/// Detect capabilities without caching or overrides.
#[must_use]
pub fn detect_uncached() -> Detected {
  #[cfg(miri)]
  {
    Detected::PORTABLE
  }

  #[cfg(not(miri))]
  {
    Detected {
      caps: arch::caps_static() | arch::caps_runtime(),
      arch: Arch::current(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  #[cfg(not(miri))] // Uses CPUID / auxv
  fn detect_uncached_is_consistent() {
    let d1 = detect_uncached();
    let d2 = detect_uncached();
    assert_eq!(d1, d2);
    assert_eq!(d1.arch, Arch::current());
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  fn x86_64_baseline() {
    use crate::caps::x86;
    assert!(detect_uncached().caps.has(x86::SSE2));
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", feature = "std", not(miri)))]
  fn x86_64_sse42_agrees_with_std() {
    use crate::caps::x86;
    let ours = detect_uncached().caps.has(x86::SSE42);
    assert_eq!(ours, std::arch::is_x86_feature_detected!("sse4.2"));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", not(miri)))]
  fn aarch64_baseline() {
    use crate::caps::aarch64;
    assert!(detect_uncached().caps.has(aarch64::NEON));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", feature = "std", not(miri)))]
  fn aarch64_crc_agrees_with_std() {
    use crate::caps::aarch64;
    let ours = detect_uncached().caps.has(aarch64::CRC);
    assert_eq!(ours, std::arch::is_aarch64_feature_detected!("crc"));
  }

  #[test]
  #[cfg(miri)]
  fn miri_returns_portable() {
    assert_eq!(get(), Detected::PORTABLE);
  }
}
