//! Decompose command: 4x4 matrix to position, rotation and scale.
//!
//! The sixteen numbers are column-major (GPU layout) unless `--row-major`
//! is given. A negative determinant is reported as a negative X scale.

use crate::DecomposeArgs;
use anyhow::{bail, Result};
use serde_json::json;
use tracing::debug;
use xform_math::{Euler, Matrix4, Quaternion, RotationOrder, Vector3, RAD2DEG};

/// Runs the decompose command.
pub fn run(args: DecomposeArgs, _verbose: bool) -> Result<()> {
    let order: RotationOrder = args.order.parse()?;
    let (position, quaternion, scale, euler) = decompose(&args.elements, args.row_major, order)?;

    let angles = if args.degrees {
        euler.to_vector3() * RAD2DEG
    } else {
        euler.to_vector3()
    };

    if args.json {
        let out = json!({
            "position": position.to_array(),
            "quaternion": quaternion.to_array(),
            "euler": { "x": angles.x, "y": angles.y, "z": angles.z, "order": order.as_str() },
            "scale": scale.to_array(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let unit = if args.degrees { "deg" } else { "rad" };
        println!("position:   ({:.6}, {:.6}, {:.6})", position.x, position.y, position.z);
        println!(
            "quaternion: ({:.6}, {:.6}, {:.6}, {:.6})",
            quaternion.x, quaternion.y, quaternion.z, quaternion.w
        );
        println!("euler {order} ({unit}): ({:.6}, {:.6}, {:.6})", angles.x, angles.y, angles.z);
        println!("scale:      ({:.6}, {:.6}, {:.6})", scale.x, scale.y, scale.z);
    }
    Ok(())
}

fn decompose(
    elements: &[f64],
    row_major: bool,
    order: RotationOrder,
) -> Result<(Vector3, Quaternion, Vector3, Euler)> {
    if elements.len() != Matrix4::LEN {
        bail!("expected {} matrix elements, got {}", Matrix4::LEN, elements.len());
    }
    let mut m = Matrix4::from_slice(elements, 0)?;
    if row_major {
        m = m.transpose();
    }
    if m.determinant() == 0.0 {
        bail!("matrix is singular and has no rotation");
    }

    let (position, quaternion, scale) = m.decompose();
    debug!(?position, ?quaternion, ?scale, "decomposed");
    Ok((position, quaternion, scale, Euler::from_quaternion(quaternion, order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_round_trip_with_compose() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), 0.4);
        let m = Matrix4::compose(Vector3::new(1.0, -2.0, 3.0), q, Vector3::new(1.0, 2.0, 3.0));

        let (p, q2, s, e) = decompose(&m.to_array(), false, RotationOrder::YXZ).unwrap();
        assert_abs_diff_eq!(p, Vector3::new(1.0, -2.0, 3.0), epsilon = 1e-12);
        assert_abs_diff_eq!(s, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        assert!(q2.dot(q).abs() > 1.0 - 1e-12);
        assert_eq!(e.order, RotationOrder::YXZ);
    }

    #[test]
    fn test_row_major_input() {
        let m = Matrix4::make_translation(7.0, 8.0, 9.0);
        let rows = m.transpose().to_array();
        let (p, _, _, _) = decompose(&rows, true, RotationOrder::XYZ).unwrap();
        assert_eq!(p, Vector3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_mirror_goes_to_x_scale() {
        let m = Matrix4::make_scale(1.0, 1.0, -1.0);
        let (_, _, s, _) = decompose(&m.to_array(), false, RotationOrder::XYZ).unwrap();
        assert_eq!(s, Vector3::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(decompose(&[1.0; 4], false, RotationOrder::XYZ).is_err());
        assert!(decompose(&Matrix4::ZERO.to_array(), false, RotationOrder::XYZ).is_err());
    }
}
