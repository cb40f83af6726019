//! Backend crate: compute-once caching for kernel selection.
//!
//! Selection in this workspace happens exactly once per process: probe the
//! CPU, build whatever state the chosen kernel needs, publish it, and never
//! change it again. [`OnceCache`] is that primitive, with the same semantics as
//! `std::sync::OnceLock` but also available on no_std targets.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;

pub use cache::OnceCache;
