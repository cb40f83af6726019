//! `floor(log2(n))` via a constant lookup table.
//!
//! Chunk sizes are classified into sample-table buckets with this. Small
//! values come from the table; anything past it takes a bit-scan.

/// Entry stored for `n = 0`, which has no logarithm.
pub const SENTINEL: i8 = -1;

/// Number of entries in [`LOG2_TABLE`].
pub const TABLE_LEN: usize = 128;

/// `LOG2_TABLE[n] == floor(log2(n))` for `1 <= n < 128`; `LOG2_TABLE[0] == SENTINEL`.
pub static LOG2_TABLE: [i8; TABLE_LEN] = generate();

#[allow(clippy::indexing_slicing)] // const evaluation; every index is < TABLE_LEN
const fn generate() -> [i8; TABLE_LEN] {
  let mut table = [SENTINEL; TABLE_LEN];
  let mut n = 1;
  while n < TABLE_LEN {
    let mut log = 0i8;
    let mut v = n >> 1;
    while v != 0 {
      log += 1;
      v >>= 1;
    }
    table[n] = log;
    n += 1;
  }
  table
}

/// `floor(log2(n))`, or `None` for `n == 0`.
#[inline]
#[must_use]
pub fn log2_floor(n: u32) -> Option<u32> {
  match LOG2_TABLE.get(n as usize) {
    Some(&SENTINEL) => None,
    Some(&log) => Some(log as u32),
    None => Some(31 - n.leading_zeros()),
  }
}
