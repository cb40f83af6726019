//! aarch64 capability probe.
//!
//! On Linux and Android the kernel publishes `AT_HWCAP` in the ELF auxiliary
//! vector; bit 7 is the CRC32 extension. The vector is parsed from
//! `/proc/self/auxv` so no libc binding is needed. Other operating systems go
//! through `std`'s detector.

use crate::caps::{Caps, aarch64};

/// `AT_HWCAP` bit for the CRC32 extension (linux/arch/arm64/include/uapi/asm/hwcap.h).
const HWCAP_CRC32: u64 = 1 << 7;

/// Features guaranteed by the compilation target.
pub(crate) fn caps_static() -> Caps {
  // NEON is part of the aarch64 baseline.
  let mut caps = aarch64::NEON;
  if cfg!(target_feature = "crc") {
    caps |= aarch64::CRC;
  }
  caps
}

/// Features reported by the running CPU and OS.
#[cfg(all(feature = "std", any(target_os = "linux", target_os = "android")))]
pub(crate) fn caps_runtime() -> Caps {
  read_hwcap().map_or(Caps::NONE, caps_from_hwcap)
}

#[cfg(all(feature = "std", not(any(target_os = "linux", target_os = "android"))))]
pub(crate) fn caps_runtime() -> Caps {
  if std::arch::is_aarch64_feature_detected!("crc") {
    aarch64::CRC
  } else {
    Caps::NONE
  }
}

#[cfg(not(feature = "std"))]
pub(crate) fn caps_runtime() -> Caps {
  Caps::NONE
}

#[inline]
fn caps_from_hwcap(hwcap: u64) -> Caps {
  if hwcap & HWCAP_CRC32 != 0 { aarch64::CRC } else { Caps::NONE }
}

/// Read `AT_HWCAP` from `/proc/self/auxv`.
///
/// Returns `None` if the file is unreadable (seccomp sandboxes, missing procfs).
#[cfg(all(feature = "std", any(target_os = "linux", target_os = "android")))]
fn read_hwcap() -> Option<u64> {
  use std::{fs::File, io::Read};

  const AT_NULL: u64 = 0;
  const AT_HWCAP: u64 = 16;

  let mut file = File::open("/proc/self/auxv").ok()?;
  let mut buf = [0u8; 4096];
  let n = file.read(&mut buf).ok()?;

  // Entries are (type: u64, value: u64) pairs in native byte order.
  for chunk in buf.get(..n)?.chunks_exact(16) {
    let a_type = u64::from_ne_bytes(chunk.get(0..8)?.try_into().ok()?);
    let a_val = u64::from_ne_bytes(chunk.get(8..16)?.try_into().ok()?);
    match a_type {
      AT_HWCAP => return Some(a_val),
      AT_NULL => break,
      _ => {}
    }
  }
  None
}
