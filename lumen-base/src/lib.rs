//! This library is an internal component of [`lumen`],
//! which defines the geometric types and scratch-space helpers that light
//! visibility tests are written in terms of.
//! Do not depend on this library; use only [`lumen`] instead.
//!
//! [`lumen`]: https://crates.io/crates/lumen/

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;
#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

/// Do not use this module directly; its contents are re-exported from `lumen`.
pub mod math;

/// Do not use this module directly; its contents are re-exported from `lumen`.
pub mod util;

// reexport for convenience of our tests
#[doc(hidden)]
pub use euclid;
