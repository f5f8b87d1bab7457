//! Matrices packed for shader consumption.
//! This module is private but reexported by its parent.

use core::fmt;

use crate::math::{Coordinate, ScaledRigid, WorldPoint, WorldVector};

/// A 4×4 single-precision matrix in the layout that probe shaders consume.
///
/// It is not used as a linear transformation. Instead, it packs the placement of an
/// influence volume:
///
/// | rows \ columns | 0..3                | 3                     |
/// |----------------|---------------------|-----------------------|
/// | 0..3           | rotation (3×3)      | translation           |
/// | 3              | scale on each axis  | free for the consumer |
///
/// Elements are addressed as `(row, column)`. [`UniformMatrix::to_cols_array()`]
/// produces the column-major form that graphics APIs expect.
//---
// Design note: This is not a `euclid::Transform3D` because those use the row-vector
// convention and would make every index in this layout read transposed.
#[derive(Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct UniformMatrix {
    rows: [[f32; 4]; 4],
}

impl UniformMatrix {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [
            [1., 0., 0., 0.],
            [0., 1., 0., 0.],
            [0., 0., 1., 0.],
            [0., 0., 0., 1.],
        ],
    };

    /// Constructs a matrix from rows.
    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Constructs the packing of an unrotated, unscaled placement at `translation`.
    /// The scale row is left zero.
    #[inline]
    pub fn from_translation(translation: WorldPoint) -> Self {
        let mut m = Self::IDENTITY;
        m.set_translation(translation);
        m
    }

    /// Constructs the packing of `placement`.
    #[inline]
    pub fn from_scaled_rigid(placement: &ScaledRigid) -> Self {
        let mut m = Self::IDENTITY;
        for (column, axis) in placement.rotation_axes().into_iter().enumerate() {
            m.rows[0][column] = axis.x;
            m.rows[1][column] = axis.y;
            m.rows[2][column] = axis.z;
        }
        m.set_scale(placement.scale);
        m.set_translation(placement.translation.to_point());
        m
    }

    /// Returns the element at the given row and column.
    ///
    /// Panics if either index is not less than 4.
    #[inline]
    #[track_caller]
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.rows[row][column]
    }

    /// Replaces the element at the given row and column.
    ///
    /// Panics if either index is not less than 4.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, row: usize, column: usize, value: f32) {
        self.rows[row][column] = value;
    }

    /// Writes `translation` into the first three rows of the last column.
    #[inline]
    pub fn set_translation(&mut self, translation: WorldPoint) {
        self.rows[0][3] = translation.x;
        self.rows[1][3] = translation.y;
        self.rows[2][3] = translation.z;
    }

    /// Writes `scale` into the first three columns of the last row.
    #[inline]
    pub fn set_scale(&mut self, scale: WorldVector) {
        self.rows[3][0] = scale.x;
        self.rows[3][1] = scale.y;
        self.rows[3][2] = scale.z;
    }

    /// Returns the rotation axis stored in `column` (0, 1, or 2), multiplied by the
    /// scale stored in the same column of the last row.
    #[inline]
    #[track_caller]
    pub fn scaled_axis(&self, column: usize) -> WorldVector {
        let r = &self.rows;
        WorldVector::new(r[0][column], r[1][column], r[2][column]) * r[3][column]
    }

    /// Returns the rows.
    #[inline]
    pub const fn to_rows_array(self) -> [[f32; 4]; 4] {
        self.rows
    }

    /// Returns the columns, which is the order GPU uniform buffers expect.
    #[inline]
    pub fn to_cols_array(self) -> [[f32; 4]; 4] {
        let r = self.rows;
        core::array::from_fn(|column| [r[0][column], r[1][column], r[2][column], r[3][column]])
    }

    /// The element in the bottom right corner, which the packing leaves to the consumer.
    #[inline]
    pub fn packed_scalar(&self) -> Coordinate {
        self.rows[3][3]
    }
}

impl Default for UniformMatrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Debug for UniformMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniformMatrix")
            .field(&self.rows[0])
            .field(&self.rows[1])
            .field(&self.rows[2])
            .field(&self.rows[3])
            .finish()
    }
}
