//! `approx` trait implementations for the kernel types.
//!
//! Comparisons are component-wise: two values are approximately equal when
//! every component is.

/// Implements `AbsDiffEq`, `RelativeEq` and `UlpsEq` over named `f64` fields.
macro_rules! impl_approx_fields {
    ($ty:ty, $($field:ident),+) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f64;

            #[inline]
            fn default_epsilon() -> f64 {
                f64::EPSILON
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                $(<f64 as approx::AbsDiffEq>::abs_diff_eq(&self.$field, &other.$field, epsilon))&&+
            }
        }

        impl approx::RelativeEq for $ty {
            #[inline]
            fn default_max_relative() -> f64 {
                f64::EPSILON
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                $(<f64 as approx::RelativeEq>::relative_eq(
                    &self.$field,
                    &other.$field,
                    epsilon,
                    max_relative,
                ))&&+
            }
        }

        impl approx::UlpsEq for $ty {
            #[inline]
            fn default_max_ulps() -> u32 {
                4
            }

            #[inline]
            fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
                $(<f64 as approx::UlpsEq>::ulps_eq(&self.$field, &other.$field, epsilon, max_ulps))&&+
            }
        }
    };
}

/// Implements `AbsDiffEq`, `RelativeEq` and `UlpsEq` over an `elements` array.
macro_rules! impl_approx_elements {
    ($ty:ty) => {
        impl approx::AbsDiffEq for $ty {
            type Epsilon = f64;

            #[inline]
            fn default_epsilon() -> f64 {
                f64::EPSILON
            }

            #[inline]
            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                self.elements
                    .iter()
                    .zip(other.elements.iter())
                    .all(|(a, b)| <f64 as approx::AbsDiffEq>::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $ty {
            #[inline]
            fn default_max_relative() -> f64 {
                f64::EPSILON
            }

            #[inline]
            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                self.elements
                    .iter()
                    .zip(other.elements.iter())
                    .all(|(a, b)| <f64 as approx::RelativeEq>::relative_eq(a, b, epsilon, max_relative))
            }
        }

        impl approx::UlpsEq for $ty {
            #[inline]
            fn default_max_ulps() -> u32 {
                4
            }

            #[inline]
            fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
                self.elements
                    .iter()
                    .zip(other.elements.iter())
                    .all(|(a, b)| <f64 as approx::UlpsEq>::ulps_eq(a, b, epsilon, max_ulps))
            }
        }
    };
}

pub(crate) use impl_approx_elements;
pub(crate) use impl_approx_fields;
