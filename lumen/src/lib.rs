//! Lumen decides, once per frame, which lights influence each renderable object.
//!
//! For every object a renderer is about to draw, a [`LightFilter`](filter::LightFilter)
//! walks the object's world light list, drops lights that are disabled, outside the
//! camera's view, or out of reach of the object's bounds, and hands the survivors to
//! the shading backend. Light probes are not passed through directly; they are routed to
//! a [`ProbeBlendingStrategy`](blend::ProbeBlendingStrategy), which picks the few probes
//! a shader can actually sample.
//!
//! ## Concepts
//!
//! * A [`Light`](light::Light) is one of five kinds: directional, point, spot, ambient,
//!   or a [light probe](light::LightProbe) holding baked environment lighting.
//!   Each kind answers whether it can affect a box, a sphere, or a camera frustum.
//! * A probe's region of validity is its [`InfluenceVolume`](probe::InfluenceVolume),
//!   either a sphere or an oriented box.
//! * [`DefaultLightFilter`](filter::DefaultLightFilter) remembers each light's frustum
//!   test for the current camera, so that the test runs once per light per camera
//!   rather than once per object.
//! * [`PoiProbeBlendingProcessor`](blend::PoiProbeBlendingProcessor) chooses one probe
//!   for the whole view, weighted by distance from a point of interest, and installs a
//!   filter that hands that probe to every object.
//!
//! The scene graph, the camera's plane computation, and the shading backend are outside
//! this crate. They meet it through the traits in [`scene`] and the types in [`camera`]
//! and [`render`].
//!
//! ## Crate features
//!
//! This crate, `lumen`, defines the following feature flags:
//!
//! * `std` (enabled by default):
//!   Use the standard library's floating-point functions.
//!   Without it, this crate is `no_std` (but requires `alloc`) and uses [`libm`].
//!
//! ## Dependencies and global state
//!
//! `lumen` has no global state other than the counter that assigns
//! [`LightId`](light::LightId)s. It writes log messages using the [`log`] crate and is
//! therefore subject to that global configuration; see
//! [`util::log::standard_filter()`] for a recommended filter.
//!
//! `lumen` depends on and re-exports the following crates as part of its public API:
//!
//! * [`euclid`] for vector math (as `lumen::euclid`).
//!
//! [`libm`]: https://docs.rs/libm/
#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]
// Lenience for tests.
#![cfg_attr(test,
    allow(clippy::float_cmp), // deterministic tests
    allow(clippy::redundant_clone), // prefer regularity over efficiency
)]

#[allow(unused_imports)] // false positive unused macro_use
#[macro_use]
extern crate alloc;
#[cfg(any(feature = "std", test))]
#[cfg_attr(test, macro_use)]
extern crate std;

pub mod blend;
pub mod camera;
pub mod filter;
pub mod light;
pub mod probe;
pub mod render;
pub mod scene;

/// Mathematical types: points, vectors, bounding volumes, planes, and shader matrices.
pub mod math {
    pub use lumen_base::math::*;
}

/// Tools that we could imagine being in the Rust standard library, but aren't.
pub mod util {
    pub use lumen_base::util::*;
}

/// Re-export the version of the `euclid` vector math library we're using.
pub use euclid;
