//! x86_64 capability probe.
//!
//! SSE4.2 is read straight from CPUID leaf 1 (ECX bit 20). The `crc32`
//! instruction operates on general-purpose registers, so no XCR0/OSXSAVE
//! gating is needed the way it is for AVX state.

use crate::caps::{Caps, x86};

/// CPUID leaf 1 ECX bit for SSE4.2.
const CPUID1_ECX_SSE42: u32 = 1 << 20;

/// Features guaranteed by the compilation target.
pub(crate) fn caps_static() -> Caps {
  // SSE2 is part of the x86_64 baseline.
  let mut caps = x86::SSE2;
  if cfg!(target_feature = "sse4.2") {
    caps |= x86::SSE42;
  }
  caps
}

/// Features reported by the running CPU.
#[cfg(not(target_env = "sgx"))]
#[allow(unsafe_code)]
#[allow(unused_unsafe)] // `__cpuid` is safe on newer toolchains
pub(crate) fn caps_runtime() -> Caps {
  use core::arch::x86_64::__cpuid;

  // SAFETY: CPUID is available on every x86_64 processor.
  let leaf1 = unsafe { __cpuid(1) };
  caps_from_leaf1_ecx(leaf1.ecx)
}

/// SGX enclaves trap on CPUID; trust the compile-time baseline only.
#[cfg(target_env = "sgx")]
pub(crate) fn caps_runtime() -> Caps {
  Caps::NONE
}

#[inline]
fn caps_from_leaf1_ecx(ecx: u32) -> Caps {
  if ecx & CPUID1_ECX_SSE42 != 0 { x86::SSE42 } else { Caps::NONE }
}
