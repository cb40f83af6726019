//! Introspection: which kernel runs, and why.
//!
//! ```
//! let info = strhash::SelectionInfo::current();
//! println!("{info}");
//! // "strhash: x86_64/sse4.2 (arch x86_64, caps [sse2, sse4.2], force auto)"
//! ```

use core::fmt;

use platform::{Arch, Caps};

use crate::{
  Band,
  config::Force,
  dispatch::{self, StrHasher},
};

/// A snapshot of the process-wide selection and the inputs that drove it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SelectionInfo {
  /// The selected hasher.
  pub hasher: StrHasher,
  /// Architecture the probe ran on.
  pub arch: Arch,
  /// Detected capabilities.
  pub caps: Caps,
  /// Requested force mode.
  pub requested_force: Force,
  /// Force mode after clamping to `caps`.
  pub effective_force: Force,
  /// Whether the sample seed was pinned through configuration.
  pub seed_pinned: bool,
}

impl SelectionInfo {
  /// Capture the selection, running it first if needed.
  ///
  /// Capabilities and configuration are those seen when the hasher was
  /// chosen; overrides applied afterwards do not show up here.
  #[must_use]
  pub fn current() -> Self {
    let selection = dispatch::selection();
    let cfg = selection.config;
    Self {
      hasher: selection.hasher,
      arch: platform::arch(),
      caps: selection.caps,
      requested_force: cfg.requested_force,
      effective_force: cfg.effective_force,
      seed_pinned: cfg.seed.is_some(),
    }
  }

  /// Kernel name of the selected hasher.
  #[inline]
  #[must_use]
  pub fn kernel(&self) -> &'static str {
    self.hasher.kernel_name()
  }

  /// `"<kernel>/<band>"` for a `len`-byte input; just the kernel name when
  /// the selected hasher has no bands.
  #[must_use]
  pub fn route(&self, len: usize) -> Route {
    Route {
      kernel: self.kernel(),
      band: self.hasher.band_for_len(len),
    }
  }
}

/// Where an input of a given length is hashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
  pub kernel: &'static str,
  pub band: Option<Band>,
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.band {
      Some(band) => write!(f, "{}/{}", self.kernel, band),
      None => f.write_str(self.kernel),
    }
  }
}

impl fmt::Display for SelectionInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "strhash: {} (arch {}, caps {:?}, force {}",
      self.kernel(),
      self.arch,
      self.caps,
      self.effective_force.as_str()
    )?;
    if self.requested_force != self.effective_force {
      write!(f, ", requested {}", self.requested_force.as_str())?;
    }
    if self.seed_pinned {
      f.write_str(", seed pinned")?;
    }
    f.write_str(")")
  }
}

impl fmt::Debug for SelectionInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SelectionInfo")
      .field("kernel", &self.kernel())
      .field("arch", &self.arch)
      .field("caps", &self.caps)
      .field("requested_force", &self.requested_force)
      .field("effective_force", &self.effective_force)
      .field("seed_pinned", &self.seed_pinned)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::{boxed::Box, string::ToString};

  use super::*;

  #[test]
  fn current_matches_selected() {
    let info = SelectionInfo::current();
    assert_eq!(info.hasher, dispatch::selected());
    assert_eq!(info.arch, Arch::current());
  }

  #[test]
  fn display_names_kernel() {
    let info = SelectionInfo::current();
    let s = info.to_string();
    assert!(s.starts_with("strhash: "));
    assert!(s.contains(info.kernel()));
    assert!(s.contains(info.arch.as_str()));
  }

  #[test]
  fn routes() {
    let hasher = StrHasher::portable();
    let info = SelectionInfo { hasher, ..SelectionInfo::current() };
    assert_eq!(info.route(200).to_string(), "portable/lookup3");

    let table: &'static crate::SampleTable = Box::leak(Box::new(crate::SampleTable::ZERO));
    let info = SelectionInfo { hasher: StrHasher::emulated(table), ..info };
    assert_eq!(info.route(3).to_string(), "portable/crc32c/1-4");
    assert_eq!(info.route(200).to_string(), "portable/crc32c/128+");
    assert_eq!(info.route(0).to_string(), "portable/crc32c");
  }
}
