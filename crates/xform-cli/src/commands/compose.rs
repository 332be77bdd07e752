//! Compose command: position, rotation and scale to a 4x4 matrix.

use crate::ComposeArgs;
use anyhow::Result;
use serde_json::json;
use tracing::debug;
use xform_math::{Matrix4, Quaternion};

/// Runs the compose command.
pub fn run(args: ComposeArgs, verbose: bool) -> Result<()> {
    let m = compose(&args)?;

    if args.json {
        let out = json!({ "elements": m.to_array() });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", super::format_matrix(&m, ""));
        if verbose {
            println!("determinant: {:.6}", m.determinant());
        }
    }
    Ok(())
}

fn compose(args: &ComposeArgs) -> Result<Matrix4> {
    let position = super::parse_vec3(&args.position)?;
    let euler = super::parse_euler(&args.euler, args.degrees)?;
    let scale = super::parse_vec3(&args.scale)?;
    debug!(?position, ?euler, ?scale, "composing");

    Ok(Matrix4::compose(position, Quaternion::from_euler(euler), scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use xform_math::Vector3;

    fn args(position: &str, euler: &str, scale: &str, degrees: bool) -> ComposeArgs {
        ComposeArgs {
            position: position.into(),
            euler: euler.into(),
            scale: scale.into(),
            degrees,
            json: false,
        }
    }

    #[test]
    fn test_compose_translation_scale() {
        let m = compose(&args("1,2,3", "0,0,0", "2,2,2", false)).unwrap();
        assert_eq!(m * Vector3::ONE, Vector3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_compose_degrees() {
        let m = compose(&args("0,0,0", "0,0,90", "1,1,1", true)).unwrap();
        assert_abs_diff_eq!(m * Vector3::X, Vector3::Y, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_bad_input() {
        assert!(compose(&args("1,2", "0,0,0", "1,1,1", false)).is_err());
        assert!(compose(&args("0,0,0", "0,0,0,XXX", "1,1,1", false)).is_err());
    }
}
