mod matrix;
mod vector;

pub use matrix::Matrix3;
pub use vector::Vector3;

pub(crate) use matrix::debug_assert_unit_axis;

pub(crate) const EPS: f32 = 1e-5;
