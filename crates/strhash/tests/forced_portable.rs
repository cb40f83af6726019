//! `STRHASH_FORCE=portable` pins the fallback.
//!
//! Its own test binary: the environment is read once per process, so this
//! must run before anything else selects.

#![allow(unsafe_code)] // `set_var` before any other thread exists

use strhash::{
  SelectionInfo,
  config::{self, Force},
};

#[test]
fn force_portable_selects_fallback() {
  // SAFETY: the only test in this binary; no other thread reads the environment.
  unsafe {
    std::env::set_var("STRHASH_FORCE", "portable");
    std::env::set_var("STRHASH_SEED", "0x2A");
  }

  let cfg = config::get();
  assert_eq!(cfg.requested_force, Force::Portable);
  assert_eq!(cfg.effective_force, Force::Portable);
  assert_eq!(cfg.seed, Some(42));

  let hasher = strhash::selected();
  assert_eq!(hasher.kernel_name(), strhash::fallback::NAME);
  assert!(!hasher.is_banded());
  assert_eq!(hasher.digest(b"abc"), strhash::fallback::hash(b"abc"));

  let info = SelectionInfo::current().to_string();
  assert!(info.contains("force portable"), "{info}");
  assert!(info.contains("seed pinned"), "{info}");
}
