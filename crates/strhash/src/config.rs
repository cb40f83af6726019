//! Runtime configuration (overrides).
//!
//! Two knobs, both read from the environment once per process (std only):
//!
//! | Variable | Values | Effect |
//! |----------|--------|--------|
//! | `STRHASH_FORCE` | `auto`, `portable`, `hwcrc` | kernel selection |
//! | `STRHASH_SEED` | decimal or `0x` hex `u32` | pins the sample-table seed |
//!
//! Safety note: forced modes are always clamped to detected CPU capabilities.
//! Unparseable values are ignored.

/// Forced kernel selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Force {
  /// Hardware CRC-32C when available, portable otherwise.
  #[default]
  Auto,
  /// Always the portable lookup3 fallback.
  Portable,
  /// Hardware CRC-32C (if available).
  Hwcrc,
}

impl Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hwcrc => "hwcrc",
    }
  }

  /// Parse a force mode, accepting a few aliases. Case-insensitive.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable")
      || value.eq_ignore_ascii_case("fallback")
      || value.eq_ignore_ascii_case("lookup3")
    {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("hwcrc")
      || value.eq_ignore_ascii_case("crc")
      || value.eq_ignore_ascii_case("crc32c")
    {
      return Some(Self::Hwcrc);
    }
    None
  }
}

/// Effective configuration after applying overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrHashConfig {
  /// Requested force mode (env).
  pub requested_force: Force,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: Force,
  /// Pinned sample-table seed, if any.
  pub seed: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  force: Force,
  seed: Option<u32>,
}

/// Parse a seed: decimal, or hex with a `0x` prefix.
#[must_use]
pub fn parse_seed(value: &str) -> Option<u32> {
  let value = value.trim();
  match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
    Some(hex) => u32::from_str_radix(hex, 16).ok(),
    None => value.parse::<u32>().ok(),
  }
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  Overrides {
    force: var("STRHASH_FORCE").as_deref().and_then(Force::parse).unwrap_or_default(),
    seed: var("STRHASH_SEED").as_deref().and_then(parse_seed),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

#[inline]
#[must_use]
fn clamp_force(requested: Force, hwcrc: bool) -> Force {
  match requested {
    Force::Auto | Force::Portable => requested,
    Force::Hwcrc if hwcrc => Force::Hwcrc,
    Force::Hwcrc => Force::Auto,
  }
}

/// The effective configuration for this process.
#[inline]
#[must_use]
pub fn get() -> StrHashConfig {
  let ov = overrides();
  StrHashConfig {
    requested_force: ov.force,
    effective_force: clamp_force(ov.force, platform::hwcrc_supported()),
    seed: ov.seed,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn force_aliases() {
    assert_eq!(Force::parse("AUTO"), Some(Force::Auto));
    assert_eq!(Force::parse(" portable "), Some(Force::Portable));
    assert_eq!(Force::parse("lookup3"), Some(Force::Portable));
    assert_eq!(Force::parse("crc32c"), Some(Force::Hwcrc));
    assert_eq!(Force::parse("avx512"), None);
    assert_eq!(Force::parse(""), None);
  }

  #[test]
  fn force_names_roundtrip() {
    for f in [Force::Auto, Force::Portable, Force::Hwcrc] {
      assert_eq!(Force::parse(f.as_str()), Some(f));
    }
  }

  #[test]
  fn seeds() {
    assert_eq!(parse_seed("42"), Some(42));
    assert_eq!(parse_seed("0xDEADBEEF"), Some(0xDEAD_BEEF));
    assert_eq!(parse_seed("0Xff"), Some(0xFF));
    assert_eq!(parse_seed("4294967296"), None);
    assert_eq!(parse_seed("-1"), None);
    assert_eq!(parse_seed("0x"), None);
  }

  #[test]
  fn hwcrc_is_clamped_without_hardware() {
    assert_eq!(clamp_force(Force::Hwcrc, false), Force::Auto);
    assert_eq!(clamp_force(Force::Hwcrc, true), Force::Hwcrc);
    assert_eq!(clamp_force(Force::Portable, true), Force::Portable);
    assert_eq!(clamp_force(Force::Auto, false), Force::Auto);
  }

  #[test]
  fn effective_force_respects_caps() {
    let cfg = get();
    if cfg.effective_force == Force::Hwcrc {
      assert!(platform::hwcrc_supported());
    }
  }
}
