pub mod projection;

use bytemuck::{Pod, Zeroable};
use std::ops::Mul;

use crate::{
    buffer::Buffer4,
    error::{MathError, MathResult},
    types::{debug_assert_unit_axis, Matrix3, Vector3},
};

#[cfg(test)]
mod test_affine_matrix_4 {
    use super::AffineMatrix4;
    use crate::{
        error::MathError,
        types::{Matrix3, Vector3, EPS},
    };

    fn unit_axes() -> [Vector3; 5] {
        [
            Vector3::x(),
            Vector3::z(),
            Vector3::new(1.0, 1.0, 1.0).norm(),
            Vector3::new(0.6, -0.8, 0.0),
            Vector3::new(-2.0, 0.5, 4.0).norm(),
        ]
    }

    fn angles() -> impl Iterator<Item = f32> {
        (0..12).map(|n| n as f32 * std::f32::consts::TAU / 12.0 + 0.1)
    }

    fn get_transform() -> AffineMatrix4 {
        AffineMatrix4::new(
            Matrix3::axis_angle(Vector3::new(0.0, 0.6, 0.8), 0.9),
            Vector3::new(1.0, -2.0, 3.0),
        )
    }

    #[test]
    fn multiply_composes() {
        let a = get_transform();
        let b = AffineMatrix4::new(
            Matrix3::scale_matrix(2.0, 1.0, 0.5).rotate(Vector3::y(), 1.0, 0.0),
            Vector3::new(0.5, 0.25, -4.0),
        );
        let ab = a * b;
        assert!(ab.m.approx_equal(a.m * b.m));
        assert!(ab.t.approx_equal(a.m * b.t + a.t));
        let p = Vector3::new(3.0, -1.0, 2.0);
        assert!((ab * p - a * (b * p)).length() < 1e-4);
    }

    #[test]
    fn multiply_identity() {
        let a = get_transform();
        assert!((a * AffineMatrix4::identity()).approx_equal(a));
        assert!((AffineMatrix4::identity() * a).approx_equal(a));
    }

    #[test]
    fn multiply_point_and_vector() {
        let a = AffineMatrix4::new(
            Matrix3::scale_matrix(2.0, 3.0, 4.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let v = Vector3::new(1.0, -1.0, 0.5);
        assert!(a.multiply_point(v).approx_equal(Vector3::new(3.0, -2.0, 3.0)));
        assert!(a.multiply_vector(v).approx_equal(Vector3::new(2.0, -3.0, 2.0)));
        assert!(AffineMatrix4::identity().multiply_point(v).approx_equal(v));
    }

    #[test]
    fn rotate_keeps_translation() {
        let a = get_transform();
        let axis = Vector3::new(0.0, 0.0, 1.0);
        let (s, c) = 0.4f32.sin_cos();
        let r = a.rotate(axis, s, c);
        assert_eq!(r.t, a.t);
        assert!(r.m.approx_equal(a.m * Matrix3::rotation(axis, s, c)));
        assert!(r.approx_equal(a * AffineMatrix4::rotation(axis, s, c)));
    }

    #[test]
    fn rotation_has_no_translation() {
        let (s, c) = 1.3f32.sin_cos();
        let r = AffineMatrix4::rotation(Vector3::y(), s, c);
        assert_eq!(r.t, Vector3::zero());
        assert!(r.m.approx_equal(Matrix3::rotation_y(s, c)));
    }

    #[test]
    fn low_multiplication_rotation_matches() {
        for axis in unit_axes() {
            for angle in angles() {
                let (s, c) = angle.sin_cos();
                let a = AffineMatrix4::rotation(axis, s, c);
                let b = AffineMatrix4::rotation_low_mult(axis, s, c);
                assert!(a.approx_equal(b));
                assert_eq!(b.t, Vector3::zero());
            }
        }
    }

    #[test]
    fn inverse_round_trip() {
        for axis in unit_axes() {
            for angle in angles() {
                let (s, c) = angle.sin_cos();
                let a = AffineMatrix4::rotation(axis, s, c);
                let i = a * a.inverse();
                assert!(i.m.approx_equal(Matrix3::identity()));
                assert!(i.t.approx_equal(Vector3::zero()));
            }
        }
    }

    #[test]
    fn inverse_with_translation() {
        let a = get_transform();
        let a_inv = a.inverse();
        assert!(a_inv.m.approx_equal(a.m.transpose()));
        assert!(a_inv.t.approx_equal(-(a.m.transpose() * a.t)));
        assert!((a * a_inv).approx_equal(AffineMatrix4::identity()));
        assert!((a_inv * a).approx_equal(AffineMatrix4::identity()));
        let p = Vector3::new(-4.0, 0.5, 2.0);
        assert!((a_inv * (a * p)).approx_equal(p));
    }

    #[test]
    fn translation() {
        let a = AffineMatrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        let p = a * Vector3::new(2.0, 3.0, 1.0);
        assert!(p.approx_equal(Vector3::new(3.0, 5.0, 4.0)));
        assert!(a.multiply_vector(Vector3::x()).approx_equal(Vector3::x()));
    }

    #[test]
    fn look_at() {
        let p = Vector3::new(0.0, 0.0, 1.0);
        let a = AffineMatrix4::look_at(p, Vector3::zero(), Vector3::y());
        assert!(a.m.approx_equal(Matrix3::look_at(p, Vector3::zero(), Vector3::y())));
        assert_eq!(a.t, Vector3::zero());
        assert!(a.m.column(2).approx_equal(Vector3::z()));
    }

    #[test]
    fn look_at_eye() {
        let eye = Vector3::new(2.0, 3.0, 4.0);
        let target = Vector3::new(1.0, 1.0, 1.0);
        let view = AffineMatrix4::look_at_eye(eye, target, Vector3::z());
        assert!((view * eye).approx_equal(Vector3::zero()));
        let forward = view * target;
        assert!(forward.x.abs() < EPS && forward.y.abs() < EPS);
        assert!((forward.z + (eye - target).length()).abs() < EPS);
        assert!(view.m.is_orthogonal());
    }

    #[test]
    fn to_buffer() {
        let a = AffineMatrix4::new(
            Matrix3::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]),
            Vector3::new(10.0, 11.0, 12.0),
        );
        #[rustfmt::skip]
        let expected = [
            1.0, 2.0, 3.0, 10.0,
            4.0, 5.0, 6.0, 11.0,
            7.0, 8.0, 9.0, 12.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(a.to_buffer(), expected);
        assert_eq!(<[f32; 16]>::from(a), expected);
        assert_eq!(a.to_buffer(), a.m.to_buffer(a.t));
        let mut buffer = [0.0; 16];
        a.write_buffer(&mut buffer);
        assert_eq!(buffer, expected);
        assert!(AffineMatrix4::try_from_buffer(&buffer)
            .unwrap()
            .approx_equal(a));
    }

    #[test]
    fn from_non_affine_buffer() {
        let mut buffer = AffineMatrix4::identity().to_buffer();
        buffer[14] = -1.0;
        assert_eq!(
            AffineMatrix4::try_from_buffer(&buffer).unwrap_err(),
            MathError::NotAffine
        );
    }

    #[test]
    fn bytes_layout() {
        let a = get_transform();
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&a));
        assert_eq!(floats.len(), 12);
        assert_eq!(&floats[..9], a.m.as_array());
        assert_eq!(&floats[9..], a.t.as_array());
    }

    #[test]
    fn is_valid() {
        assert!(get_transform().is_valid());
        let a = AffineMatrix4::translation(Vector3::new(0.0, f32::NAN, 0.0));
        assert!(!a.is_valid());
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn inverse_scaled_panics_in_debug() {
        let a = AffineMatrix4::new(Matrix3::scale_matrix(2.0, 1.0, 1.0), Vector3::x());
        let _ = a.inverse();
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn low_mult_rotation_non_unit_axis_panics_in_debug() {
        let _ = AffineMatrix4::rotation_low_mult(Vector3::new(0.0, 2.0, 0.0), 1.0, 0.0);
    }
}

/// An affine map `y = m * x + t`.
///
/// Logically the 4x4 matrix `[[m, t], [0, 0, 0, 1]]`, stored without the constant bottom row.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct AffineMatrix4 {
    pub m: Matrix3,
    pub t: Vector3,
}

impl Mul<AffineMatrix4> for AffineMatrix4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: AffineMatrix4) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<Vector3> for AffineMatrix4 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Vector3) -> Self::Output {
        self.multiply_point(rhs)
    }
}

impl From<AffineMatrix4> for Buffer4 {
    #[inline]
    fn from(value: AffineMatrix4) -> Self {
        value.to_buffer()
    }
}

impl AffineMatrix4 {
    #[inline]
    pub fn new(m: Matrix3, t: Vector3) -> Self {
        Self { m, t }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
            t: Vector3::zero(),
        }
    }

    #[inline]
    pub fn translation(t: Vector3) -> Self {
        Self {
            m: Matrix3::identity(),
            t,
        }
    }

    /// Reads a row-major 4x4 buffer whose bottom row is exactly `[0, 0, 0, 1]`.
    pub fn try_from_buffer(buffer: &Buffer4) -> MathResult<Self> {
        if buffer[12..] != [0.0, 0.0, 0.0, 1.0] {
            return Err(MathError::NotAffine);
        }
        Ok(Self {
            m: Matrix3::from_array([
                buffer[0], buffer[1], buffer[2], buffer[4], buffer[5], buffer[6], buffer[8],
                buffer[9], buffer[10],
            ]),
            t: Vector3::new(buffer[3], buffer[7], buffer[11]),
        })
    }

    /// Composition `self ∘ rhs`: `rhs` is applied first.
    #[inline]
    pub fn multiply(self, rhs: Self) -> Self {
        Self {
            m: self.m.multiply(rhs.m),
            t: self.m.multiply_vector(rhs.t) + self.t,
        }
    }

    /// Transforms a point (implicit `w = 1`).
    #[inline]
    pub fn multiply_point(self, p: Vector3) -> Vector3 {
        self.m.multiply_vector(p) + self.t
    }

    /// Transforms a direction (implicit `w = 0`), ignoring the translation.
    #[inline]
    pub fn multiply_vector(self, v: Vector3) -> Vector3 {
        self.m.multiply_vector(v)
    }

    /// Same as `self * AffineMatrix4::rotation(axis, sin, cos)`. The translation is left
    /// untouched.
    #[inline]
    pub fn rotate(self, axis: Vector3, sin: f32, cos: f32) -> Self {
        Self {
            m: self.m.rotate(axis, sin, cos),
            t: self.t,
        }
    }

    /// Pure rotation about the unit vector `axis`, see [`Matrix3::rotation`].
    #[inline]
    pub fn rotation(axis: Vector3, sin: f32, cos: f32) -> Self {
        Self {
            m: Matrix3::rotation(axis, sin, cos),
            t: Vector3::zero(),
        }
    }

    /// Equivalent to [`AffineMatrix4::rotation`] with the shared products hoisted out, so
    /// fewer multiplications are issued. The temporaries depend on each other, which costs
    /// some instruction level parallelism.
    #[inline]
    pub fn rotation_low_mult(axis: Vector3, sin: f32, cos: f32) -> Self {
        debug_assert_unit_axis(axis);
        let Vector3 {
            x: ux,
            y: uy,
            z: uz,
        } = axis;
        let c = cos;
        let c1 = 1.0 - c;
        let uxc1 = ux * c1;
        let uyc1 = uy * c1;
        let uyzc1 = uz * uyc1;
        let uxs = ux * sin;
        let uys = uy * sin;
        let uzs = uz * sin;
        Self {
            m: Matrix3::from_array([
                c + ux * uxc1,
                uy * uxc1 - uzs,
                uz * uxc1 + uys,
                uy * uxc1 + uzs,
                c + uy * uyc1,
                uyzc1 - uxs,
                uz * uxc1 - uys,
                uyzc1 + uxs,
                c + uz * uz * c1,
            ]),
            t: Vector3::zero(),
        }
    }

    /// Rotation-only look-at basis, see [`Matrix3::look_at`]. The translation is zero.
    #[inline]
    pub fn look_at(p: Vector3, q: Vector3, up: Vector3) -> Self {
        Self {
            m: Matrix3::look_at(p, q, up),
            t: Vector3::zero(),
        }
    }

    /// View transform for a camera at `eye` looking at `target`: `eye` maps to the origin
    /// and `target` onto the negative Z axis.
    #[inline]
    pub fn look_at_eye(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        Self::look_at(eye, target, up)
            .inverse()
            .multiply(Self::translation(-eye))
    }

    /// Inverse of a rigid transform: `m^T` and `-(m^T * t)`.
    ///
    /// Only valid when `m` is a pure rotation. With scale or skew the result is silently wrong.
    #[inline]
    pub fn inverse(self) -> Self {
        debug_assert!(
            self.m.is_orthogonal(),
            "AffineMatrix4::inverse called on a non-orthogonal transform!"
        );
        let a = self.m.as_array();
        let t = self.t;
        Self {
            m: self.m.transpose(),
            t: Vector3::new(
                (-a[0] * t.x) - (a[3] * t.y) - (a[6] * t.z),
                (-a[1] * t.x) - (a[4] * t.y) - (a[7] * t.z),
                (-a[2] * t.x) - (a[5] * t.y) - (a[8] * t.z),
            ),
        }
    }

    /// Writes the row-major 4x4 form with `[0, 0, 0, 1]` as the bottom row.
    #[inline]
    pub fn write_buffer(self, out: &mut Buffer4) {
        self.m.write_buffer(self.t, out);
    }

    #[inline]
    pub fn to_buffer(self) -> Buffer4 {
        self.m.to_buffer(self.t)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.m.is_valid() && self.t.is_valid()
    }

    #[inline]
    pub fn approx_equal(self, rhs: Self) -> bool {
        self.m.approx_equal(rhs.m) && self.t.approx_equal(rhs.t)
    }
}
