//! Scalar helpers shared by the vector, matrix and rotation types.
//!
//! - Linear interpolation ([`lerp`], [`inverse_lerp`], [`map_linear`])
//! - Smooth interpolation ([`smoothstep`], [`smootherstep`], [`damp`])
//! - Clamping and wrapping ([`clamp`], [`euclidean_modulo`], [`pingpong`])
//! - Angle conversion ([`deg_to_rad`], [`rad_to_deg`])
//!
//! # Usage
//!
//! ```rust
//! use xform_math::{lerp, smoothstep, map_linear};
//!
//! let mid = lerp(0.0, 10.0, 0.5);
//! assert_eq!(mid, 5.0);
//!
//! let smooth = smoothstep(0.0, 1.0, 0.5);
//! assert_eq!(smooth, 0.5);
//!
//! assert_eq!(map_linear(0.5, 0.0, 1.0, 0.0, 100.0), 50.0);
//! ```

/// Degrees-to-radians factor.
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians-to-degrees factor.
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Example
///
/// ```rust
/// use xform_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t` value.
/// Returns 0 when `a == b`.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a != b { (value - a) / (b - a) } else { 0.0 }
}

/// Maps `value` from range `[a1, a2]` to range `[b1, b2]`.
#[inline]
pub fn map_linear(value: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    b1 + (value - a1) * (b2 - b1) / (a2 - a1)
}

/// Clamps a value to the range [min, max].
///
/// ```rust
/// use xform_math::clamp;
///
/// assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// ```
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Modulo that always returns a result with the sign of `m`.
#[inline]
pub fn euclidean_modulo(n: f64, m: f64) -> f64 {
    ((n % m) + m) % m
}

/// Frame-rate independent damping towards `y`.
///
/// `lambda` is the damping strength, `dt` the elapsed time.
#[inline]
pub fn damp(x: f64, y: f64, lambda: f64, dt: f64) -> f64 {
    lerp(x, y, 1.0 - (-lambda * dt).exp())
}

/// Bounces `x` back and forth between 0 and `length`.
#[inline]
pub fn pingpong(x: f64, length: f64) -> f64 {
    length - (euclidean_modulo(x, length * 2.0) - length).abs()
}

/// Hermite smoothstep interpolation.
///
/// Returns 0 for `x <= edge0`, 1 for `x >= edge1`, and the cubic
/// `t * t * (3 - 2 * t)` in between.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let t = (x - edge0) / (edge1 - edge0);
    t * t * (3.0 - 2.0 * t)
}

/// Ken Perlin's smootherstep: zero first and second derivative at the edges.
#[inline]
pub fn smootherstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let t = (x - edge0) / (edge1 - edge0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Converts degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

/// Converts radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * RAD2DEG
}

/// Returns true if `value` is a power of two.
#[inline]
pub fn is_power_of_two(value: u64) -> bool {
    value.is_power_of_two()
}

/// Smallest power of two greater than or equal to `value`.
#[inline]
pub fn ceil_power_of_two(value: f64) -> f64 {
    2f64.powf(value.log2().ceil())
}

/// Largest power of two less than or equal to `value`.
#[inline]
pub fn floor_power_of_two(value: f64) -> f64 {
    2f64.powf(value.log2().floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(3.0, 3.0, 5.0), 0.0);
    }

    #[test]
    fn test_map_linear() {
        assert_eq!(map_linear(0.5, 0.0, 1.0, 0.0, 100.0), 50.0);
        assert_eq!(map_linear(50.0, 0.0, 100.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_euclidean_modulo() {
        assert_eq!(euclidean_modulo(5.0, 3.0), 2.0);
        assert_eq!(euclidean_modulo(-1.0, 3.0), 2.0);
    }

    #[test]
    fn test_pingpong() {
        assert_eq!(pingpong(0.5, 1.0), 0.5);
        assert_eq!(pingpong(1.5, 1.0), 0.5);
        assert_eq!(pingpong(2.0, 1.0), 0.0);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    }

    #[test]
    fn test_smootherstep() {
        assert_eq!(smootherstep(0.0, 1.0, 0.0), 0.0);
        assert_eq!(smootherstep(0.0, 1.0, 1.0), 1.0);
        assert_eq!(smootherstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_damp_limits() {
        assert_eq!(damp(0.0, 10.0, 1.0, 0.0), 0.0);
        assert!((damp(0.0, 10.0, 1000.0, 1.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_conversion() {
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((rad_to_deg(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_of_two() {
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(65));
        assert_eq!(ceil_power_of_two(65.0), 128.0);
        assert_eq!(floor_power_of_two(65.0), 64.0);
    }
}
