//! The view that lights are culled against.

use crate::math::{Aab, Frustum, FrustumSide, Plane};

/// The part of a camera that light filtering needs: the six world-space planes of its
/// view frustum.
///
/// Computing those planes from a projection and view transform is the job of whoever
/// owns the camera. They are replaced wholesale with [`Camera::set_frustum()`] when the
/// view changes, after which every filter using this camera must be given the new
/// value via [`LightFilter::set_camera()`](crate::filter::LightFilter::set_camera).
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    frustum: Frustum,
}

impl Camera {
    /// Constructs a [`Camera`] whose view is bounded by `frustum`.
    #[inline]
    pub fn new(frustum: Frustum) -> Self {
        Self { frustum }
    }

    /// Constructs an orthographic camera looking toward −Z which sees exactly the
    /// contents of `aab`.
    ///
    /// ```
    /// use lumen::camera::Camera;
    /// use lumen::math::{Aab, FrustumSide};
    ///
    /// let camera = Camera::orthographic(Aab::new(-1., 1., -1., 1., -10., 0.));
    /// let near = camera.world_plane(FrustumSide::Near.index());
    /// assert_eq!(near.pseudo_distance([0., 0., -1.].into()), 1.0);
    /// ```
    #[inline]
    pub fn orthographic(aab: Aab) -> Self {
        Self::new(Frustum::orthographic(aab))
    }

    /// Returns the world-space plane with the given index, numbered as per
    /// [`FrustumSide`]. Plane normals face into the visible region.
    ///
    /// Panics if `index` is not less than 6.
    #[inline]
    #[track_caller]
    pub fn world_plane(&self, index: usize) -> &Plane {
        self.frustum.world_plane(index)
    }

    /// Returns the plane on the given side of the view.
    #[inline]
    pub fn plane(&self, side: FrustumSide) -> &Plane {
        self.frustum.plane(side)
    }

    /// Returns the view frustum.
    #[inline]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Replaces the view frustum.
    #[inline]
    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point3;

    #[test]
    fn planes_by_index_and_side_agree() {
        let camera = Camera::orthographic(Aab::new(-2., 2., -1., 1., -5., 5.));
        for side in FrustumSide::ALL {
            assert_eq!(camera.world_plane(side.index()), camera.plane(side));
        }
        assert!(camera.plane(FrustumSide::Right).pseudo_distance(point3(3., 0., 0.)) < 0.0);
    }

    #[test]
    fn set_frustum_replaces_view() {
        let mut camera = Camera::orthographic(Aab::new(-1., 1., -1., 1., -1., 1.));
        let moved = Frustum::orthographic(Aab::new(9., 11., -1., 1., -1., 1.));
        camera.set_frustum(moved);
        assert_eq!(camera.frustum(), &moved);
        assert!(!camera.frustum().intersects_sphere(point3(0., 0., 0.), 0.5));
    }
}
