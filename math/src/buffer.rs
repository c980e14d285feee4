//! Dense row-major 4x4 matrices stored as flat `[f32; 16]` arrays.
//!
//! This is the format transforms are handed over in, and the format foreign matrices (for
//! example a projection) come in. Element `(row, col)` lives at `row * 4 + col`. APIs that
//! expect column-major data need [`transpose_buffer`] first; nothing here transposes
//! implicitly.
//!
//! Output buffers are taken as `&mut Buffer4` next to `&Buffer4` inputs, so an output can
//! never alias an input.

use crate::{
    error::{MathError, MathResult},
    transform::AffineMatrix4,
    types::Vector3,
};

pub type Buffer4 = [f32; 16];

#[rustfmt::skip]
pub const IDENTITY_BUFFER: Buffer4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];


/// Dense 4x4 product `out = a * b`.
#[inline]
pub fn multiply_buffers(a: &Buffer4, b: &Buffer4, out: &mut Buffer4) {
    for i in 0..4 {
        for j in 0..4 {
            out[i * 4 + j] = a[i * 4] * b[j]
                + a[i * 4 + 1] * b[4 + j]
                + a[i * 4 + 2] * b[8 + j]
                + a[i * 4 + 3] * b[12 + j];
        }
    }
}

/// `out = a * b` with the affine operand flattened first.
#[inline]
pub fn multiply_affine_with_buffer(a: AffineMatrix4, b: &Buffer4, out: &mut Buffer4) {
    multiply_buffers(&a.to_buffer(), b, out);
}

/// `out = a * b` with the affine operand flattened first.
#[inline]
pub fn multiply_buffer_with_affine(a: &Buffer4, b: AffineMatrix4, out: &mut Buffer4) {
    multiply_buffers(a, &b.to_buffer(), out);
}

/// Multiplies the homogeneous point `[p, 1]` by `a`, without the perspective divide.
#[inline]
pub fn multiply_buffer_point(a: &Buffer4, p: Vector3) -> [f32; 4] {
    std::array::from_fn(|i| a[i * 4] * p.x + a[i * 4 + 1] * p.y + a[i * 4 + 2] * p.z + a[i * 4 + 3])
}

#[inline]
pub fn transpose_buffer(a: &Buffer4) -> Buffer4 {
    std::array::from_fn(|n| a[(n % 4) * 4 + n / 4])
}

pub fn buffer_from_slice(elements: &[f32]) -> MathResult<&Buffer4> {
    elements.try_into().map_err(|_| MathError::InvalidLength {
        expected: 16,
        found: elements.len(),
    })
}
