//! Fuzz target for the process-wide hasher.
//!
//! Tests that:
//! - `digest` agrees with the selected hasher
//! - Introspected routes agree with the hasher's bands

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let hasher = strhash::selected();
  assert_eq!(strhash::digest(data), hasher.digest(data));

  let info = strhash::SelectionInfo::current();
  assert_eq!(info.hasher, hasher);
  assert_eq!(info.route(data.len()).band, hasher.band_for_len(data.len()));
});
