//! Override behaviour.
//!
//! All override mutation lives in one test so parallel test threads never
//! observe a half-applied override.

use platform::Caps;

#[test]
#[cfg(not(miri))]
fn override_roundtrip() {
  let detected = platform::detect_uncached();
  assert_eq!(platform::caps(), detected.caps);
  assert!(!platform::has_override());

  platform::set_caps_override(Some(Caps::NONE));
  assert!(platform::has_override());
  assert_eq!(platform::caps(), Caps::NONE);
  assert!(!platform::hwcrc_supported());

  platform::init_with_caps(platform::caps::crc32c_required());
  assert!(platform::hwcrc_supported());

  platform::set_caps_override(None);
  assert!(!platform::has_override());
  assert_eq!(platform::caps(), detected.caps);
}

#[test]
#[cfg(not(miri))]
fn probe_is_stable() {
  let first = platform::detect_uncached().caps.has(platform::caps::crc32c_required());
  for _ in 0..64 {
    assert_eq!(platform::detect_uncached().caps.has(platform::caps::crc32c_required()), first);
  }
}
