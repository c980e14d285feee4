use super::EPS;
use crate::error::{MathError, MathResult};
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};


/// A three component vector.
///
/// The same type doubles as an RGB colour, see [`Vector3::r`], [`Vector3::g`] and
/// [`Vector3::b`].
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Neg for Vector3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Add for Vector3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vector3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs.scale(self)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Dot product.
impl Mul<Vector3> for Vector3 {
    type Output = f32;
    #[inline]
    fn mul(self, rhs: Vector3) -> Self::Output {
        self.dot(rhs)
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < 3, "Invalid index {} for Vector3!", index);
        &self.as_array()[index]
    }
}

impl IndexMut<usize> for Vector3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        debug_assert!(index < 3, "Invalid index {} for Vector3!", index);
        &mut bytemuck::cast_mut::<_, [f32; 3]>(self)[index]
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(value: [f32; 3]) -> Self {
        bytemuck::cast(value)
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(value: Vector3) -> Self {
        bytemuck::cast(value)
    }
}

impl Vector3 {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn x() -> Self {
        Self {
            x: 1.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn y() -> Self {
        Self {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn z() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 1.0,
        }
    }

    /// Reads a vector from 12 little-endian bytes (three `f32` values).
    pub fn try_from_le_bytes(bytes: &[u8]) -> MathResult<Self> {
        let bytes: &[u8; 12] = bytes.try_into().map_err(|_| MathError::InvalidLength {
            expected: 12,
            found: bytes.len(),
        })?;
        let component = |i: usize| {
            f32::from_le_bytes([bytes[4 * i], bytes[4 * i + 1], bytes[4 * i + 2], bytes[4 * i + 3]])
        };
        Ok(Self {
            x: component(0),
            y: component(1),
            z: component(2),
        })
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 3] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn r(self) -> f32 {
        self.x
    }

    #[inline]
    pub fn g(self) -> f32 {
        self.y
    }

    #[inline]
    pub fn b(self) -> f32 {
        self.z
    }

    #[inline]
    pub fn scale(self, k: f32) -> Self {
        Self {
            x: self.x * k,
            y: self.y * k,
            z: self.z * k,
        }
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length_square(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_square().sqrt()
    }

    #[inline]
    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    /// Divides the vector by its length.
    ///
    /// The vector must not be zero, there is no fallback for that case in release builds.
    #[inline]
    pub fn norm(self) -> Self {
        let length = self.length();
        debug_assert!(length > 0.0, "Attempt to normalize a zero length Vector3!");
        self / length
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Blends `self` and `rhs` as `self * alpha + rhs * (1 - alpha)`.
    ///
    /// Note the weighting: `alpha == 1.0` yields `self` and `alpha == 0.0` yields `rhs`,
    /// the reverse of the usual `lerp(a, b, t) = a * (1 - t) + b * t`.
    #[inline]
    pub fn lerp(self, rhs: Self, alpha: f32) -> Self {
        let beta = 1.0 - alpha;
        Self {
            x: self.x * alpha + rhs.x * beta,
            y: self.y * alpha + rhs.y * beta,
            z: self.z * alpha + rhs.z * beta,
        }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn approx_equal(self, rhs: Self) -> bool {
        (self.x - rhs.x).abs() < EPS && (self.y - rhs.y).abs() < EPS && (self.z - rhs.z).abs() < EPS
    }
}
