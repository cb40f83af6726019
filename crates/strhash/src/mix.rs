//! Rotate/mix primitive shared by the tiny band and the portable fallback.
//!
//! The pattern is `x ^= y; x -= rotl(y, r)`: no multiplies, so it is cheap on
//! every CPU this runs on.

/// `b` rotated left by `r` bits.
#[inline(always)]
#[must_use]
pub const fn rotl(b: u32, r: u32) -> u32 {
  b.rotate_left(r)
}

/// One xor-subtract-rotate step: returns `(x ^ y) - rotl(y, r)`.
#[inline(always)]
#[must_use]
pub const fn mix(x: u32, y: u32, r: u32) -> u32 {
  (x ^ y).wrapping_sub(rotl(y, r))
}

/// Final three-round diffusion over `(a, b, h)`, returning `h`.
///
/// Rotation constants come from Bob Jenkins' lookup3.
#[inline(always)]
#[must_use]
pub const fn finish(a: u32, b: u32, h: u32) -> u32 {
  let a = mix(a, h, 11);
  let b = mix(b, a, 25);
  mix(h, b, 16)
}
