//! Fuzz target for capability sets.
//!
//! Tests that:
//! - Raw words round-trip through `Caps`
//! - `has`, `union` and `difference` agree with the bit operations
//! - The crc32c requirement is never met by an empty set

#![no_main]

use libfuzzer_sys::fuzz_target;
use platform::Caps;

fuzz_target!(|words: (u64, u64)| {
  let (a, b) = (Caps::from_raw(words.0), Caps::from_raw(words.1));
  assert_eq!(a.as_raw(), words.0);

  assert_eq!(a.has(b), words.0 & words.1 == words.1);
  assert_eq!((a | b).as_raw(), words.0 | words.1);
  assert_eq!(a.difference(b).as_raw(), words.0 & !words.1);

  let required = platform::caps::crc32c_required();
  assert!(!Caps::NONE.has(required));
  assert_eq!(a.has(required), a.union(required) == a);
});
