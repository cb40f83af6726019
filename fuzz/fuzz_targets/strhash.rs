//! Fuzz target for the string hashers.
//!
//! Tests that:
//! - No panics (or out-of-bounds reads) on arbitrary input and table seeds
//! - Digests are deterministic for a fixed table
//! - The software CRC kernel matches the hardware one bit for bit

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strhash::{SampleTable, StrHasher};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  seed: u32,
}

fn table_for(seed: u32) -> &'static SampleTable {
  static TABLES: OnceLock<std::sync::Mutex<std::collections::HashMap<u32, &'static SampleTable>>> = OnceLock::new();
  let tables = TABLES.get_or_init(Default::default);
  let mut tables = tables.lock().unwrap();
  *tables
    .entry(seed & 0xFF)
    .or_insert_with(|| Box::leak(Box::new(SampleTable::generate(seed & 0xFF))))
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let table = table_for(input.seed);

  let portable = StrHasher::portable().digest(data);
  assert_eq!(portable, strhash::fallback::hash(data), "portable entry mismatch");

  let emulated = StrHasher::emulated(table);
  let a = emulated.digest(data);
  assert_eq!(a, emulated.digest(data), "emulated not deterministic");

  if let Ok(hw) = StrHasher::accelerated(table) {
    assert_eq!(hw.digest(data), a, "hardware/emulated mismatch at len {}", data.len());
  }

  if data.is_empty() {
    assert_eq!(a, strhash::EMPTY_DIGEST);
    assert_eq!(portable, strhash::EMPTY_DIGEST);
  }
});
