//! Hash function selection.
//!
//! Selection is a two-state machine, Uninitialized → Selected, run once per
//! process behind [`OnceCache`]:
//!
//! 1. Probe the CPU for a CRC-32C instruction (and honour `STRHASH_FORCE`).
//! 2. If present, build the sample table, then select the banded hasher.
//! 3. Otherwise select the portable fallback.
//!
//! Concurrent first callers all observe the same [`StrHasher`].

use core::fmt;

use backend::OnceCache;
use platform::Caps;

use crate::{
  Digest, EMPTY_DIGEST,
  banded::Band,
  config::{self, Force, StrHashConfig},
  error::KernelUnavailable,
  fallback,
  kernels::{self, CrcKernel, HashFn, Portable},
  sample::{self, SampleTable},
};

/// Table installed by hashers that never sample.
static ZERO_TABLE: SampleTable = SampleTable::ZERO;

/// A selected string hash function.
///
/// `Copy` and cheap to pass around: a function pointer, a reference to the
/// immutable sample table it samples with, and a name. Digests are stable for
/// the lifetime of the table, which for [`selected()`] is the process.
#[derive(Clone, Copy)]
pub struct StrHasher {
  hash: HashFn,
  table: &'static SampleTable,
  kernel: &'static str,
  banded: bool,
}

impl StrHasher {
  /// The portable lookup3 fallback. Available everywhere.
  #[must_use]
  pub fn portable() -> Self {
    Self {
      hash: fallback::hash_entry,
      table: &ZERO_TABLE,
      kernel: fallback::NAME,
      banded: false,
    }
  }

  /// The banded hasher on the hardware CRC-32C instruction.
  ///
  /// Availability is decided by `platform::caps()`, so a capability override
  /// set with `platform::set_caps_override` or `platform::init_with_caps` is
  /// trusted as is. Claiming CRC-32C on a CPU without it makes `digest` fault
  /// with an illegal instruction.
  ///
  /// # Errors
  ///
  /// [`KernelUnavailable`] if this CPU (or architecture) has no such instruction.
  pub fn accelerated(table: &'static SampleTable) -> Result<Self, KernelUnavailable> {
    let (hash, kernel) = kernels::hardware().ok_or(KernelUnavailable::new())?;
    Ok(Self {
      hash,
      table,
      kernel,
      banded: true,
    })
  }

  /// The banded hasher on the software CRC-32C kernel.
  ///
  /// Produces exactly the digests [`StrHasher::accelerated`] would with the
  /// same table, on any CPU.
  #[must_use]
  pub fn emulated(table: &'static SampleTable) -> Self {
    Self {
      hash: kernels::hash_emulated,
      table,
      kernel: Portable::NAME,
      banded: true,
    }
  }

  /// Hash `data`.
  ///
  /// Empty input returns [`EMPTY_DIGEST`] on every path.
  #[inline]
  #[must_use]
  pub fn digest(&self, data: &[u8]) -> Digest {
    if data.is_empty() {
      return EMPTY_DIGEST;
    }
    (self.hash)(data, self.table)
  }

  /// Kernel name, e.g. `"x86_64/sse4.2"` or `"portable/lookup3"`.
  #[inline]
  #[must_use]
  pub fn kernel_name(&self) -> &'static str {
    self.kernel
  }

  /// Whether this is one of the length-banded hashers.
  #[inline]
  #[must_use]
  pub fn is_banded(&self) -> bool {
    self.banded
  }

  /// The band a `len`-byte input takes; `None` for the fallback or for zero.
  #[inline]
  #[must_use]
  pub fn band_for_len(&self, len: usize) -> Option<Band> {
    if self.banded { Band::for_len(len) } else { None }
  }

  /// The sample table this hasher reads.
  #[inline]
  #[must_use]
  pub fn table(&self) -> &'static SampleTable {
    self.table
  }
}

impl PartialEq for StrHasher {
  /// Function identity: same kernel sampling the same table.
  fn eq(&self, other: &Self) -> bool {
    self.kernel == other.kernel && self.banded == other.banded && core::ptr::eq(self.table, other.table)
  }
}

impl Eq for StrHasher {}

impl fmt::Debug for StrHasher {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StrHasher")
      .field("kernel", &self.kernel)
      .field("banded", &self.banded)
      .field("table", &format_args!("{:p}", self.table))
      .finish()
  }
}

/// A runtime context that stores the process's string hash function.
///
/// Implemented by the string table (or whatever owns it).
pub trait RuntimeContext {
  /// Store `hasher` for all later string hashing.
  fn install_str_hasher(&mut self, hasher: StrHasher);
}

/// The selected hasher together with the inputs that chose it.
#[derive(Clone, Copy)]
pub(crate) struct Selection {
  pub(crate) hasher: StrHasher,
  pub(crate) config: StrHashConfig,
  pub(crate) caps: Caps,
}

static SELECTED: OnceCache<Selection> = OnceCache::new();

#[cfg(any(feature = "std", target_has_atomic = "8"))]
static TABLE: OnceCache<SampleTable> = OnceCache::new();

/// The process-wide hasher, selecting it on first use.
#[inline]
#[must_use]
pub fn selected() -> StrHasher {
  selection().hasher
}

/// The process-wide selection, frozen at first use.
#[inline]
pub(crate) fn selection() -> Selection {
  SELECTED.get_or_init(select)
}

#[cold]
fn select() -> Selection {
  let caps = platform::caps();
  let config = config::get();
  let hasher = if config.effective_force == Force::Portable || !caps.has(platform::caps::crc32c_required()) {
    StrHasher::portable()
  } else {
    accelerated(config.seed)
  };
  Selection { hasher, config, caps }
}

#[cfg(any(feature = "std", target_has_atomic = "8"))]
fn accelerated(seed: Option<u32>) -> StrHasher {
  let table = TABLE.get_or_init_ref(|| SampleTable::generate(seed.unwrap_or_else(sample::process_seed)));
  StrHasher::accelerated(table).unwrap_or_else(|_| StrHasher::portable())
}

/// No atomics means nowhere to publish a table once; stay portable.
#[cfg(not(any(feature = "std", target_has_atomic = "8")))]
fn accelerated(_seed: Option<u32>) -> StrHasher {
  StrHasher::portable()
}

/// Run the one-time selection and store the result in `ctx`.
///
/// Idempotent and safe to call from many threads at startup; every call
/// installs the same hasher.
pub fn install_hash_function<C: RuntimeContext + ?Sized>(ctx: &mut C) -> StrHasher {
  let hasher = selected();
  ctx.install_str_hasher(hasher);
  hasher
}

/// Hash `data` with the process-wide hasher.
///
/// Deterministic within a process. Not stable across processes (the sample
/// seed changes) or machines (hardware and portable paths differ): never
/// persist a digest or send it to another process.
#[inline]
#[must_use]
pub fn digest(data: &[u8]) -> Digest {
  selected().digest(data)
}

#[cfg(test)]
mod tests {
  use std::{boxed::Box, vec::Vec};

  use super::*;

  fn leaked_table(seed: u32) -> &'static SampleTable {
    Box::leak(Box::new(SampleTable::generate(seed)))
  }

  #[test]
  fn empty_input_is_zero_everywhere() {
    let table = leaked_table(3);
    assert_eq!(StrHasher::portable().digest(b""), EMPTY_DIGEST);
    assert_eq!(StrHasher::emulated(table).digest(b""), EMPTY_DIGEST);
    if let Ok(hw) = StrHasher::accelerated(table) {
      assert_eq!(hw.digest(b""), EMPTY_DIGEST);
    }
  }

  #[test]
  fn accelerated_matches_emulated() {
    let table = leaked_table(0x5EED);
    let Ok(hw) = StrHasher::accelerated(table) else {
      assert!(!platform::hwcrc_supported());
      return;
    };
    let emu = StrHasher::emulated(table);
    let data: Vec<u8> = (0..3000u32).map(|i| (i ^ (i >> 3)) as u8).collect();
    for len in (0..300).chain([511, 512, 1024, 2999, 3000]) {
      assert_eq!(hw.digest(&data[..len]), emu.digest(&data[..len]), "len {len}");
    }
  }

  #[test]
  fn accelerated_reports_unavailable_consistently() {
    let result = StrHasher::accelerated(leaked_table(1));
    assert_eq!(result.is_ok(), platform::hwcrc_supported());
  }

  #[test]
  fn identity() {
    let t1 = leaked_table(1);
    let t2 = leaked_table(1);
    assert_eq!(StrHasher::portable(), StrHasher::portable());
    assert_eq!(StrHasher::emulated(t1), StrHasher::emulated(t1));
    // Equal contents, different tables.
    assert_ne!(StrHasher::emulated(t1), StrHasher::emulated(t2));
    assert_ne!(StrHasher::emulated(t1), StrHasher::portable());
  }

  #[test]
  fn bands_only_for_banded() {
    let emu = StrHasher::emulated(leaked_table(1));
    assert_eq!(emu.band_for_len(15), Some(Band::Short));
    assert_eq!(emu.band_for_len(16), Some(Band::Medium));
    assert_eq!(emu.band_for_len(0), None);
    assert_eq!(StrHasher::portable().band_for_len(15), None);
  }

  #[test]
  fn selection_is_stable() {
    let first = selected();
    for _ in 0..16 {
      assert_eq!(selected(), first);
    }
    assert_eq!(first.is_banded(), first.kernel_name() != fallback::NAME);
  }

  #[test]
  fn install_writes_selected_hasher() {
    struct Ctx(Option<StrHasher>);
    impl RuntimeContext for Ctx {
      fn install_str_hasher(&mut self, hasher: StrHasher) {
        self.0 = Some(hasher);
      }
    }

    let mut ctx = Ctx(None);
    let installed = install_hash_function(&mut ctx);
    assert_eq!(ctx.0, Some(installed));
    assert_eq!(installed, selected());
  }
}
