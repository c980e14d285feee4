use bytemuck::{Pod, Zeroable};
use std::ops::{Index, IndexMut, Mul};

use super::{Vector3, EPS};
use crate::{
    buffer::Buffer4,
    error::{MathError, MathResult},
};

/// Tolerance for the debug-only checks on rotation axes and orthogonality.
pub(crate) const PRECONDITION_EPS: f32 = 1e-3;

#[inline]
pub(crate) fn debug_assert_unit_axis(axis: Vector3) {
    debug_assert!(
        (axis.length_square() - 1.0).abs() < PRECONDITION_EPS,
        "Rotation axis {:?} is not a unit vector!",
        axis
    );
}


/// A row-major 3x3 matrix.
///
/// Each field is the row that produces the matching component of `self * v`, so the nine
/// floats are laid out exactly as `[row 0, row 1, row 2]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Matrix3 {
    pub x: Vector3,
    pub y: Vector3,
    pub z: Vector3,
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Vector3) -> Self::Output {
        self.multiply_vector(rhs)
    }
}

impl Mul<Matrix3> for Matrix3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<Matrix3> for f32 {
    type Output = Matrix3;
    #[inline]
    fn mul(self, rhs: Matrix3) -> Self::Output {
        rhs.scale(self, self, self)
    }
}

impl Index<usize> for Matrix3 {
    type Output = Vector3;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < 3, "Invalid index {} for Matrix3!", index);
        &bytemuck::cast_ref::<_, [Vector3; 3]>(self)[index]
    }
}

impl IndexMut<usize> for Matrix3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        debug_assert!(index < 3, "Invalid index {} for Matrix3!", index);
        &mut bytemuck::cast_mut::<_, [Vector3; 3]>(self)[index]
    }
}

impl From<[f32; 9]> for Matrix3 {
    #[inline]
    fn from(value: [f32; 9]) -> Self {
        Self::from_array(value)
    }
}

impl Matrix3 {
    #[inline]
    pub fn new(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }

    /// Builds a matrix from nine row-major elements.
    #[inline]
    pub fn from_array(elements: [f32; 9]) -> Self {
        bytemuck::cast(elements)
    }

    pub fn try_from_slice(elements: &[f32]) -> MathResult<Self> {
        let elements: [f32; 9] = elements.try_into().map_err(|_| MathError::InvalidLength {
            expected: 9,
            found: elements.len(),
        })?;
        Ok(Self::from_array(elements))
    }

    /// The nine elements in row-major order.
    #[inline]
    pub fn as_array(&self) -> &[f32; 9] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn column(self, index: usize) -> Vector3 {
        Vector3::new(self.x[index], self.y[index], self.z[index])
    }

    /// Plain row-by-column product, 27 multiplications.
    #[inline]
    pub fn multiply(self, rhs: Self) -> Self {
        let a = self.as_array();
        let b = rhs.as_array();
        Self::from_array([
            a[0] * b[0] + a[1] * b[3] + a[2] * b[6],
            a[0] * b[1] + a[1] * b[4] + a[2] * b[7],
            a[0] * b[2] + a[1] * b[5] + a[2] * b[8],
            a[3] * b[0] + a[4] * b[3] + a[5] * b[6],
            a[3] * b[1] + a[4] * b[4] + a[5] * b[7],
            a[3] * b[2] + a[4] * b[5] + a[5] * b[8],
            a[6] * b[0] + a[7] * b[3] + a[8] * b[6],
            a[6] * b[1] + a[7] * b[4] + a[8] * b[7],
            a[6] * b[2] + a[7] * b[5] + a[8] * b[8],
        ])
    }

    /// Multiplies `v` as a column vector.
    #[inline]
    pub fn multiply_vector(self, v: Vector3) -> Vector3 {
        Vector3 {
            x: self.x.dot(v),
            y: self.y.dot(v),
            z: self.z.dot(v),
        }
    }

    /// Returns `self * R`, where `R` rotates about `axis` by the angle whose sine and
    /// cosine are `sin` and `cos`. The rotation is applied to a vector before `self`.
    #[inline]
    pub fn rotate(self, axis: Vector3, sin: f32, cos: f32) -> Self {
        self.multiply(Self::rotation(axis, sin, cos))
    }

    /// Rodrigues' rotation about the unit vector `axis`, counterclockwise when looking down
    /// the axis towards the origin.
    ///
    /// `sin` and `cos` are the sine and cosine of the rotation angle. `axis` must be
    /// normalized beforehand.
    #[inline]
    pub fn rotation(axis: Vector3, sin: f32, cos: f32) -> Self {
        debug_assert_unit_axis(axis);
        let Vector3 {
            x: ux,
            y: uy,
            z: uz,
        } = axis;
        let (s, c) = (sin, cos);
        let c1 = 1.0 - c;
        Self::from_array([
            c + ux * ux * c1,
            ux * uy * c1 - uz * s,
            ux * uz * c1 + uy * s,
            uy * ux * c1 + uz * s,
            c + uy * uy * c1,
            uy * uz * c1 - ux * s,
            ux * uz * c1 - uy * s,
            uy * uz * c1 + ux * s,
            c + uz * uz * c1,
        ])
    }

    /// Same as [`Matrix3::rotation`], taking the angle in radians.
    #[inline]
    pub fn axis_angle(axis: Vector3, rad: f32) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self::rotation(axis, sin, cos)
    }

    #[inline]
    pub fn rotation_x(sin: f32, cos: f32) -> Self {
        Self::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, cos, -sin),
            Vector3::new(0.0, sin, cos),
        )
    }

    #[inline]
    pub fn rotation_y(sin: f32, cos: f32) -> Self {
        Self::new(
            Vector3::new(cos, 0.0, sin),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-sin, 0.0, cos),
        )
    }

    #[inline]
    pub fn rotation_z(sin: f32, cos: f32) -> Self {
        Self::new(
            Vector3::new(cos, -sin, 0.0),
            Vector3::new(sin, cos, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
    }

    /// Scales each row by one factor: row 0 by `x`, row 1 by `y`, row 2 by `z`.
    ///
    /// This is `scale_matrix(x, y, z) * self`, a scale applied after `self`, not a
    /// per-column scale.
    #[inline]
    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        Self {
            x: self.x.scale(x),
            y: self.y.scale(y),
            z: self.z.scale(z),
        }
    }

    #[inline]
    pub fn scale_matrix(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            Vector3::new(x, 0.0, 0.0),
            Vector3::new(0.0, y, 0.0),
            Vector3::new(0.0, 0.0, z),
        )
    }

    #[inline]
    pub fn transpose(self) -> Self {
        Self {
            x: Vector3 {
                x: self.x.x,
                y: self.y.x,
                z: self.z.x,
            },
            y: Vector3 {
                x: self.x.y,
                y: self.y.y,
                z: self.z.y,
            },
            z: Vector3 {
                x: self.x.z,
                y: self.y.z,
                z: self.z.z,
            },
        }
    }

    /// Orthonormal basis looking from `p` towards `q`.
    ///
    /// The columns are the basis vectors: column 2 points from `q` back to `p`, column 0 is
    /// `up x z` normalized and column 1 completes the right-handed frame. `up` must not be
    /// parallel to `p - q`, and is checked against the same tolerance as rotation axes.
    #[inline]
    pub fn look_at(p: Vector3, q: Vector3, up: Vector3) -> Self {
        let z = (p - q).norm();
        let side = up.cross(z);
        debug_assert!(
            side.length_square() > PRECONDITION_EPS,
            "Look-at up vector {:?} is parallel to the view direction!",
            up
        );
        let x = side.norm();
        let y = z.cross(x);
        Self::new(
            Vector3::new(x.x, y.x, z.x),
            Vector3::new(x.y, y.y, z.y),
            Vector3::new(x.z, y.z, z.z),
        )
    }

    /// Writes a row-major 4x4 matrix with `self` as the upper left block, `translation` as
    /// the last column and `[0, 0, 0, 1]` as the bottom row.
    #[inline]
    pub fn write_buffer(self, translation: Vector3, out: &mut Buffer4) {
        let a = self.as_array();
        let t = translation;
        #[rustfmt::skip]
        let buffer = [
            a[0], a[1], a[2], t.x,
            a[3], a[4], a[5], t.y,
            a[6], a[7], a[8], t.z,
            0.0,  0.0,  0.0,  1.0,
        ];
        *out = buffer;
    }

    #[inline]
    pub fn to_buffer(self, translation: Vector3) -> Buffer4 {
        let mut buffer = [0.0; 16];
        self.write_buffer(translation, &mut buffer);
        buffer
    }

    #[inline]
    pub fn det(self) -> f32 {
        let a = self.as_array();
        a[0] * (a[4] * a[8] - a[5] * a[7]) - a[1] * (a[3] * a[8] - a[5] * a[6])
            + a[2] * (a[3] * a[7] - a[4] * a[6])
    }

    #[inline]
    pub fn trace(self) -> f32 {
        self.x.x + self.y.y + self.z.z
    }

    /// Whether `self * self^T` is close to the identity.
    #[inline]
    pub fn is_orthogonal(self) -> bool {
        let p = self.multiply(self.transpose());
        let i = Self::identity();
        p.as_array()
            .iter()
            .zip(i.as_array())
            .all(|(a, b)| (a - b).abs() < PRECONDITION_EPS)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.x.is_valid() && self.y.is_valid() && self.z.is_valid()
    }

    #[inline]
    pub fn approx_equal(self, rhs: Self) -> bool {
        self.as_array()
            .iter()
            .zip(rhs.as_array())
            .all(|(a, b)| (a - b).abs() < EPS)
    }
}
