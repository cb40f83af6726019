//! Tests for process-wide hasher selection and installation.

use std::{
  collections::{HashMap, HashSet},
  sync::{Arc, Barrier},
  thread,
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use strhash::{RuntimeContext, SampleTable, SelectionInfo, StrHasher};

#[test]
fn selection_matches_capabilities() {
  let hasher = strhash::selected();
  let info = SelectionInfo::current();
  if platform::hwcrc_supported() && info.effective_force != strhash::config::Force::Portable {
    assert!(hasher.is_banded(), "crc32c available but {} selected", hasher.kernel_name());
  } else {
    assert_eq!(hasher.kernel_name(), strhash::fallback::NAME);
  }
}

#[test]
fn concurrent_first_use_agrees() {
  const THREADS: usize = 16;
  let barrier = Arc::new(Barrier::new(THREADS));

  let handles: Vec<_> = (0..THREADS)
    .map(|_| {
      let barrier = Arc::clone(&barrier);
      thread::spawn(move || {
        barrier.wait();
        let hasher = strhash::selected();
        (hasher, hasher.digest(&[0x5A; 300]))
      })
    })
    .collect();

  let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
  let (first, digest) = results[0];
  for (hasher, d) in &results {
    assert_eq!(*hasher, first);
    assert_eq!(*d, digest);
  }
  assert_eq!(strhash::selected(), first);
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Installation
// ─────────────────────────────────────────────────────────────────────────────

/// A toy interning table: buckets keyed by digest.
struct Interner {
  hasher: Option<StrHasher>,
  buckets: HashMap<u32, Vec<Vec<u8>>>,
}

impl Interner {
  fn new() -> Self {
    Self {
      hasher: None,
      buckets: HashMap::new(),
    }
  }

  fn intern(&mut self, s: &[u8]) -> (u32, usize) {
    let Some(hasher) = self.hasher else { panic!("no hash function installed") };
    let h = hasher.digest(s);
    let bucket = self.buckets.entry(h).or_default();
    if let Some(i) = bucket.iter().position(|e| e == s) {
      return (h, i);
    }
    bucket.push(s.to_vec());
    (h, bucket.len() - 1)
  }
}

impl RuntimeContext for Interner {
  fn install_str_hasher(&mut self, hasher: StrHasher) {
    self.hasher = Some(hasher);
  }
}

#[test]
fn install_then_intern() {
  let mut interner = Interner::new();
  let installed = strhash::install_hash_function(&mut interner);
  assert_eq!(interner.hasher, Some(installed));

  let a = interner.intern(b"print");
  let b = interner.intern(b"tostring");
  assert_eq!(interner.intern(b"print"), a);
  assert_eq!(interner.intern(b"tostring"), b);
  assert_eq!(a.0, strhash::digest(b"print"));
}

#[test]
fn install_is_idempotent() {
  let mut first = Interner::new();
  let mut second = Interner::new();
  let a = strhash::install_hash_function(&mut first);
  let b = strhash::install_hash_function(&mut second);
  assert_eq!(a, b);
  assert_eq!(first.hasher, second.hasher);
}

// ─────────────────────────────────────────────────────────────────────────────
// Distribution
// ─────────────────────────────────────────────────────────────────────────────

fn unique_short_strings(n: usize, seed: u64) -> Vec<Vec<u8>> {
  let mut rng = SmallRng::seed_from_u64(seed);
  let mut seen = HashSet::with_capacity(n);
  while seen.len() < n {
    let len = rng.random_range(1..=20);
    let s: Vec<u8> = (0..len).map(|_| rng.random_range(b' '..=b'~')).collect();
    seen.insert(s);
  }
  seen.into_iter().collect()
}

fn collisions(hasher: StrHasher, strings: &[Vec<u8>]) -> usize {
  let mut digests = HashSet::with_capacity(strings.len());
  strings.iter().filter(|s| !digests.insert(hasher.digest(s))).count()
}

/// 10,000 distinct strings into 2^32 digests should almost never collide.
#[test]
fn few_collisions_on_short_strings() {
  let strings = unique_short_strings(10_000, 0x1234_5678);
  let table: &'static SampleTable = Box::leak(Box::new(SampleTable::generate(42)));

  let mut hashers = vec![StrHasher::portable(), StrHasher::emulated(table), strhash::selected()];
  if let Ok(hw) = StrHasher::accelerated(table) {
    hashers.push(hw);
  }

  for hasher in hashers {
    let n = collisions(hasher, &strings);
    assert!(n <= 4, "{}: {n} collisions", hasher.kernel_name());
  }
}

/// The final word of a long string is always folded, once, into the second
/// lane; strings that differ only there never collide.
#[test]
fn long_strings_differing_in_tail_never_collide() {
  let table: &'static SampleTable = Box::leak(Box::new(SampleTable::generate(7)));
  let emu = StrHasher::emulated(table);

  let mut digests = HashSet::new();
  for i in 0..4096u32 {
    let mut s = vec![b'x'; 1000];
    s[996..].copy_from_slice(&i.to_le_bytes());
    digests.insert(emu.digest(&s));
  }
  assert_eq!(digests.len(), 4096);
}
