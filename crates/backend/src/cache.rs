//! Lazy single-assignment cache.
//!
//! # Caching Strategy
//!
//! - **std**: `OnceLock`
//! - **no_std with atomics**: UNINIT → INITING → READY state machine; losers spin
//! - **no_std without atomics**: per-call computation (single-threaded targets)

#![allow(unsafe_code)]

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
use core::cell::UnsafeCell;
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
use core::mem::MaybeUninit;

/// A value computed at most once and shared by every caller afterwards.
///
/// - Zero-cost after first initialization (one acquire load)
/// - The initializer runs at most once even under concurrent first use
///   (on std and atomic no_std targets)
pub struct OnceCache<T> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  state: core::sync::atomic::AtomicU8,
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  value: UnsafeCell<MaybeUninit<T>>,

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
  _marker: core::marker::PhantomData<T>,
}

// SAFETY: the value is written once, before READY is published with Release
// ordering, and only read after READY is observed with Acquire ordering.
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
unsafe impl<T: Send + Sync> Sync for OnceCache<T> {}

impl<T> OnceCache<T> {
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  const UNINIT: u8 = 0;
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  const INITING: u8 = 1;
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  const READY: u8 = 2;

  /// Create a new empty cache.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
      state: core::sync::atomic::AtomicU8::new(0),
      #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
      value: UnsafeCell::new(MaybeUninit::uninit()),

      #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Get a reference to the cached value, initializing with `f` if unset.
  #[cfg(any(feature = "std", target_has_atomic = "8"))]
  #[inline]
  pub fn get_or_init_ref(&self, f: impl FnOnce() -> T) -> &T {
    #[cfg(feature = "std")]
    {
      self.inner.get_or_init(f)
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
    {
      use core::sync::atomic::Ordering;

      if self.state.load(Ordering::Acquire) != Self::READY {
        if self
          .state
          .compare_exchange(Self::UNINIT, Self::INITING, Ordering::AcqRel, Ordering::Acquire)
          .is_ok()
        {
          let value = f();
          // SAFETY: we hold exclusive access during INITING.
          unsafe {
            (*self.value.get()).write(value);
          }
          self.state.store(Self::READY, Ordering::Release);
        } else {
          // Another thread is initializing.
          while self.state.load(Ordering::Acquire) != Self::READY {
            core::hint::spin_loop();
          }
        }
      }

      // SAFETY: value is initialized once state is READY and never written again.
      unsafe {
        (*self.value.get()).assume_init_ref()
      }
    }
  }

  /// The cached value if initialization has completed.
  #[cfg(any(feature = "std", target_has_atomic = "8"))]
  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<&T> {
    #[cfg(feature = "std")]
    {
      self.inner.get()
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
    {
      use core::sync::atomic::Ordering;

      if self.state.load(Ordering::Acquire) == Self::READY {
        // SAFETY: value is initialized once state is READY.
        Some(unsafe { (*self.value.get()).assume_init_ref() })
      } else {
        None
      }
    }
  }
}

impl<T: Copy> OnceCache<T> {
  /// Get the cached value by copy, initializing with `f` if unset.
  ///
  /// On targets without atomics the initializer runs on every call.
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(any(feature = "std", target_has_atomic = "8"))]
    {
      *self.get_or_init_ref(f)
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
    {
      f()
    }
  }
}

impl<T> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
impl<T> Drop for OnceCache<T> {
  fn drop(&mut self) {
    if *self.state.get_mut() == Self::READY {
      // SAFETY: READY means the value was written and not yet dropped.
      unsafe {
        self.value.get_mut().assume_init_drop();
      }
    }
  }
}
