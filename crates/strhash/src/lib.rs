//! Hardware-accelerated string hashing for interned-string tables.
//!
//! `strhash` hashes byte strings to 32-bit digests for a runtime's string
//! interning table. On CPUs with a CRC-32C instruction (SSE4.2 on x86_64, the
//! CRC extension on aarch64) it uses a length-banded CRC hash; everywhere else
//! it uses a portable lookup3-style mix. The choice is made once per process.
//!
//! # Quick Start
//!
//! ```
//! let a = strhash::digest(b"hello");
//! let b = strhash::digest(b"hello");
//! assert_eq!(a, b);
//! assert_eq!(strhash::digest(b""), strhash::EMPTY_DIGEST);
//! ```
//!
//! # Bands
//!
//! | Length | Work |
//! |--------|------|
//! | `[1, 4)` | byte mixing, no CRC |
//! | `[4, 16)` | two overlapping words |
//! | `[16, 128)` | every word, two lanes |
//! | `[128, ∞)` | 16 chunks, one or two randomly placed words each |
//!
//! Long strings are *sampled*: only ~20 words are read regardless of length.
//! Positions come from a [`SampleTable`] seeded per process, so digests are
//! not stable across processes. Never persist them.
//!
//! # Installing Into A Runtime
//!
//! ```
//! use strhash::{RuntimeContext, StrHasher};
//!
//! struct Interner {
//!   hasher: Option<StrHasher>,
//! }
//!
//! impl RuntimeContext for Interner {
//!   fn install_str_hasher(&mut self, hasher: StrHasher) {
//!     self.hasher = Some(hasher);
//!   }
//! }
//!
//! let mut interner = Interner { hasher: None };
//! let hasher = strhash::install_hash_function(&mut interner);
//! assert_eq!(hasher.digest(b"key"), strhash::digest(b"key"));
//! ```
//!
//! # Configuration
//!
//! `STRHASH_FORCE` (`auto` | `portable` | `hwcrc`) and `STRHASH_SEED` are read
//! once at selection time; see [`config`].
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod banded;
pub mod config;
mod dispatch;
mod error;
pub mod fallback;
mod introspect;
pub mod kernels;
mod log2;
mod mix;
mod sample;
mod util;

pub use banded::{Band, CHUNKS};
pub use dispatch::{RuntimeContext, StrHasher, digest, install_hash_function, selected};
pub use error::KernelUnavailable;
pub use introspect::{Route, SelectionInfo};
pub use sample::{BUCKETS, DRAW_BITS, SampleTable, UNSAMPLED_BUCKETS, bucket_mask, process_seed};

/// A 32-bit string digest.
pub type Digest = u32;

/// Digest of the empty string on every path.
pub const EMPTY_DIGEST: Digest = 0;

/// Hash `data` with the banded algorithm on an explicit kernel.
///
/// For differential testing and benchmarking; `data` must be non-empty.
#[inline]
#[must_use]
pub fn banded_hash<K: kernels::CrcKernel>(kernel: K, data: &[u8], table: &SampleTable) -> Digest {
  if data.is_empty() {
    return EMPTY_DIGEST;
  }
  banded::hash(kernel, data, table)
}
