//! CLI command implementations

pub mod compose;
pub mod decompose;
pub mod eval;

use anyhow::{bail, Context, Result};
use xform_math::{Euler, Matrix4, RotationOrder, Vector3};

/// Parses `"x,y,z"` into a vector.
pub fn parse_vec3(s: &str) -> Result<Vector3> {
    let parts = parse_floats(s)?;
    if parts.len() != 3 {
        bail!("expected 3 comma-separated numbers, got {} in '{}'", parts.len(), s);
    }
    Ok(Vector3::new(parts[0], parts[1], parts[2]))
}

/// Parses `"x,y,z"` or `"x,y,z,ORDER"` into Euler angles.
///
/// With `degrees`, the three angles are converted to radians.
pub fn parse_euler(s: &str, degrees: bool) -> Result<Euler> {
    let mut fields: Vec<&str> = s.split(',').map(str::trim).collect();
    let order = match fields.len() {
        3 => RotationOrder::default(),
        4 => {
            let name = fields.pop().unwrap_or_default();
            name.parse::<RotationOrder>()?
        }
        n => bail!("expected 3 angles and an optional order, got {} fields in '{}'", n, s),
    };

    let v = parse_vec3(&fields.join(","))?;
    let v = if degrees { v * xform_math::DEG2RAD } else { v };
    Ok(Euler::from_vector3(v, order))
}

fn parse_floats(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .with_context(|| format!("invalid number '{}'", p.trim()))
        })
        .collect()
}

/// Formats a matrix as four rows in reading order.
pub fn format_matrix(m: &Matrix4, indent: &str) -> String {
    (0..4)
        .map(|row| {
            let cells: Vec<String> = (0..4).map(|col| format!("{:>12.6}", m.get(row, col))).collect();
            format!("{indent}[{}]", cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, 2.5,-3").unwrap(), Vector3::new(1.0, 2.5, -3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_parse_euler() {
        let e = parse_euler("0,90,0,zyx", true).unwrap();
        assert_eq!(e.order, RotationOrder::ZYX);
        assert_abs_diff_eq!(e.y, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);

        let e = parse_euler("0.5,0,0", false).unwrap();
        assert_eq!(e.order, RotationOrder::XYZ);
        assert_eq!(e.x, 0.5);

        assert!(parse_euler("0,0,0,ABC", false).is_err());
        assert!(parse_euler("0,0", false).is_err());
    }

    #[test]
    fn test_format_matrix_rows() {
        let text = format_matrix(&Matrix4::make_translation(1.0, 2.0, 3.0), "  ");
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("  [") && rows[0].trim_end().ends_with("1.000000]"));
        assert!(rows[3].contains("0.000000") && rows[3].ends_with("1.000000]"));
    }
}
