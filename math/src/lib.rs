//! Single-precision vector and matrix primitives for real-time rendering.
//!
//! Everything here is a small `Copy` value type: [`types::Vector3`], the row-major
//! [`types::Matrix3`] and the compact affine transform [`transform::AffineMatrix4`]
//! (a 3x3 linear block plus a translation). Transforms are flattened into row-major
//! [`buffer::Buffer4`] arrays right before they are handed to a graphics API.
//!
//! Arithmetic preconditions (normalizing a zero vector, non-unit rotation axes, parallel
//! look-at vectors, inverting a non-rigid transform) are not checked in release builds.
//! Debug builds catch them with `debug_assert!`.

pub mod buffer;
pub mod error;
pub mod transform;
pub mod types;
