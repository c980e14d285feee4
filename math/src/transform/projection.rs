use crate::{
    buffer::Buffer4,
    types::{Matrix3, Vector3},
};

use super::AffineMatrix4;


/// Right-handed perspective projection as a row-major buffer.
///
/// The camera looks down the negative Z axis. Clip space follows Vulkan: depth ends up in
/// `[0, 1]` and Y points down. `aspect_ratio` is width over height.
#[inline]
pub fn perspective(fov_y_rad: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Buffer4 {
    let y_scale = (fov_y_rad * 0.5).tan().recip();
    let x_scale = y_scale / aspect_ratio;
    let z_scale = z_far / (z_near - z_far);
    let z_offset = (z_near * z_far) / (z_near - z_far);
    #[rustfmt::skip]
    let buffer = [
        x_scale, 0.0,      0.0,     0.0,
        0.0,     -y_scale, 0.0,     0.0,
        0.0,     0.0,      z_scale, z_offset,
        0.0,     0.0,      -1.0,    0.0,
    ];
    buffer
}

impl AffineMatrix4 {
    /// Orthographic projection of the box `min..max` onto Vulkan clip space.
    ///
    /// `max.z` is the near plane (depth 0) and `min.z` the far plane (depth 1), matching a
    /// camera that looks down the negative Z axis.
    #[inline]
    pub fn orthographic(min: Vector3, max: Vector3) -> AffineMatrix4 {
        let b = max - min;
        AffineMatrix4 {
            m: Matrix3::scale_matrix(2.0 / b.x, -2.0 / b.y, -1.0 / b.z),
            t: Vector3::new(
                -(max.x + min.x) / b.x,
                (max.y + min.y) / b.y,
                max.z / b.z,
            ),
        }
    }
}
