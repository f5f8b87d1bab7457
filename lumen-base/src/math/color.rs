//! Color data types. This module is private but reexported by its parent.

use core::fmt;
use core::ops::Mul;

use euclid::Vector3D;

/// Allows writing a constant [`Rgba`] color value, provided that its components are float
/// literals.
#[macro_export]
macro_rules! rgba_const {
    ($r:literal, $g:literal, $b:literal, $a:literal) => {
        // const block ensures all panics are compile-time
        const { $crate::math::Rgba::new($r, $g, $b, $a) }
    };
}

/// Unit-of-measure type for vectors that contain color channels.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Intensity {}

/// One spherical-harmonics coefficient of an irradiance function: a weight for each of
/// the red, green, and blue channels.
pub type ShCoefficient = Vector3D<f32, Intensity>;

/// A floating-point RGBA color value, as used for light colors.
///
/// * Components are linear (gamma = 1), but use the same RGB primaries as sRGB
///   (Rec. 709).
/// * No component may be NaN. Color components may exceed 1 to express intensity.
/// * The alpha is not premultiplied. Lights do not use it, but it is carried through to
///   shaders unchanged.
#[derive(Clone, Copy, PartialEq)]
pub struct Rgba {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Rgba {
    /// Transparent black (all components zero).
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// White; the default color of lights.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Constructs a color from components.
    ///
    /// Panics if any component is NaN.
    #[inline]
    #[track_caller]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        if r.is_nan() || g.is_nan() || b.is_nan() || a.is_nan() {
            panic!("color components may not be NaN");
        }
        Self { r, g, b, a }
    }

    /// Returns the red component.
    #[inline]
    pub const fn red(self) -> f32 {
        self.r
    }
    /// Returns the green component.
    #[inline]
    pub const fn green(self) -> f32 {
        self.g
    }
    /// Returns the blue component.
    #[inline]
    pub const fn blue(self) -> f32 {
        self.b
    }
    /// Returns the alpha component.
    #[inline]
    pub const fn alpha(self) -> f32 {
        self.a
    }

    /// Returns the components in the order red, green, blue, alpha.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

/// Scales the color components, leaving alpha unchanged.
///
/// Panics if the result would contain NaN.
impl Mul<f32> for Rgba {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.r * scalar, self.g * scalar, self.b * scalar, self.a)
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rgba({:?}, {:?}, {:?}, {:?})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl From<[f32; 4]> for Rgba {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}
