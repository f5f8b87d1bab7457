//! Mathematical utilities and decisions.

mod aab;
pub use aab::*;
mod color;
pub use color::*;
mod coord;
pub use coord::*;
mod frustum;
pub use frustum::*;
mod matrix;
pub use matrix::*;
mod rigid;
pub use rigid::*;
mod sphere;
pub use sphere::*;

