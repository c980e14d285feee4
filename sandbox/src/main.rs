use colored::{ColoredString, Colorize};
use std::{error::Error, result::Result};

use math::{
    buffer::{multiply_affine_with_buffer, multiply_buffers, Buffer4},
    error::MathResult,
    transform::{projection::perspective, AffineMatrix4},
    types::{Matrix3, Vector3},
};

const TOLERANCE: f32 = 1e-5;

enum Outcome {
    Pass,
    Fail(String),
}

impl Outcome {
    fn tag(&self) -> ColoredString {
        match self {
            Outcome::Pass => "PASS".green(),
            Outcome::Fail(_) => "FAIL".red(),
        }
        .bold()
    }
}

fn expect(condition: bool, message: impl FnOnce() -> String) -> Outcome {
    if condition {
        Outcome::Pass
    } else {
        Outcome::Fail(message())
    }
}

fn add_check() -> MathResult<Outcome> {
    let a = Vector3::new(1.0, 0.0, 0.5);
    let b = Vector3::new(0.0, 1.0, 0.5);
    let c = a + b;
    Ok(expect(
        c.x == a.x + b.x && c.y == a.y + b.y && c.z == a.z + b.z,
        || format!("{:?} + {:?} gave {:?}", a, b, c),
    ))
}

fn rotation_check() -> MathResult<Outcome> {
    let axis = Vector3::new(0.3, -0.5, 0.8).norm();
    let (s, c) = 0.75f32.sin_cos();
    let r = Matrix3::rotation(axis, s, c);
    Ok(expect(
        r.is_orthogonal() && (r.det() - 1.0).abs() < TOLERANCE,
        || format!("rotation about {:?} is not orthonormal: {:?}", axis, r),
    ))
}

fn inverse_check() -> MathResult<Outcome> {
    let a = AffineMatrix4::rotation(Vector3::y(), 0.6, 0.8).multiply(AffineMatrix4::translation(
        Vector3::new(4.0, -1.0, 2.0),
    ));
    let identity = a * a.inverse();
    Ok(expect(
        identity.approx_equal(AffineMatrix4::identity()),
        || format!("a * a^-1 gave {:?}", identity),
    ))
}

fn buffer_check() -> MathResult<Outcome> {
    let a = AffineMatrix4::rotation(Vector3::z(), 0.28, 0.96);
    let b = AffineMatrix4::translation(Vector3::new(0.5, 1.5, -2.0)).rotate(Vector3::x(), 0.6, 0.8);
    let mut out: Buffer4 = [0.0; 16];
    multiply_buffers(&a.to_buffer(), &b.to_buffer(), &mut out);
    let composed = AffineMatrix4::try_from_buffer(&out)?;
    Ok(expect(composed.approx_equal(a * b), || {
        format!("flat multiply gave {:?}, expected {:?}", composed, a * b)
    }))
}

fn upload_check() -> MathResult<Outcome> {
    let view = AffineMatrix4::look_at_eye(
        Vector3::new(0.0, -10.0, 10.0),
        Vector3::zero(),
        Vector3::z(),
    );
    let proj = perspective(std::f32::consts::FRAC_PI_3, 800.0 / 600.0, 1e-3, 1e3);
    let mut view_proj: Buffer4 = [0.0; 16];
    multiply_affine_with_buffer(view, &proj, &mut view_proj);
    let bytes: &[u8] = bytemuck::cast_slice(&view_proj);
    Ok(expect(
        bytes.len() == 64 && view_proj.iter().all(|v| v.is_finite()),
        || format!("view-projection buffer is not uploadable: {:?}", view_proj),
    ))
}

fn main() -> Result<(), Box<dyn Error>> {
    let checks: [(&str, fn() -> MathResult<Outcome>); 5] = [
        ("vector add", add_check),
        ("rotation orthogonality", rotation_check),
        ("affine inverse", inverse_check),
        ("flat buffer multiply", buffer_check),
        ("view-projection upload", upload_check),
    ];
    let mut failed = 0;
    for (name, check) in checks {
        let outcome = check()?;
        match &outcome {
            Outcome::Pass => println!("[{}]: {}", outcome.tag(), name),
            Outcome::Fail(reason) => {
                failed += 1;
                println!("[{}]: {}: {}", outcome.tag(), name, reason.as_str().dimmed());
            }
        }
    }
    if failed > 0 {
        return Err(format!("{} of {} checks failed", failed, checks.len()).into());
    }
    Ok(())
}
