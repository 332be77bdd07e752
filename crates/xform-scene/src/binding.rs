//! Two values kept in sync through explicit setters.
//!
//! A [`Binding`] owns a pair of values `a` and `b` that describe the same
//! thing in two representations (an [`Euler`](xform_math::Euler) and a
//! [`Quaternion`](xform_math::Quaternion), for instance). Writing one side
//! through its setter recomputes the other side with the registered
//! conversion function.
//!
//! The recomputed side is assigned directly, never through its own setter,
//! and a setter does nothing when the new value equals the current one. So
//! a write triggers at most one conversion and the two conversions can never
//! re-trigger each other.
//!
//! # Usage
//!
//! ```rust
//! use xform_scene::Binding;
//!
//! let mut celsius_fahrenheit = Binding::new(
//!     0.0_f64,
//!     |c: &f64, _: &f64| c * 9.0 / 5.0 + 32.0,
//!     |f: &f64, _: &f64| (f - 32.0) * 5.0 / 9.0,
//! );
//! assert_eq!(*celsius_fahrenheit.b(), 32.0);
//!
//! celsius_fahrenheit.set_b(212.0);
//! assert_eq!(*celsius_fahrenheit.a(), 100.0);
//! ```

use tracing::trace;

/// A pair of values synchronized by conversion functions.
///
/// `a_to_b(a, old_b)` computes the new `b` after `a` changed; `b_to_a(b,
/// old_a)` computes the new `a` after `b` changed. The old value of the
/// side being replaced is passed so a conversion can keep metadata from it
/// (an Euler keeps its rotation order).
#[derive(Clone)]
pub struct Binding<A, B> {
    a: A,
    b: B,
    a_to_b: fn(&A, &B) -> B,
    b_to_a: fn(&B, &A) -> A,
}

impl<A: PartialEq, B: PartialEq> Binding<A, B> {
    /// Creates a binding from `a`, deriving `b` from it.
    pub fn new(a: A, a_to_b: fn(&A, &B) -> B, b_to_a: fn(&B, &A) -> A) -> Self
    where
        B: Default,
    {
        let b = a_to_b(&a, &B::default());
        Self { a, b, a_to_b, b_to_a }
    }

    /// Creates a binding from both values as given.
    ///
    /// The caller is responsible for `a` and `b` agreeing.
    pub fn from_parts(a: A, b: B, a_to_b: fn(&A, &B) -> B, b_to_a: fn(&B, &A) -> A) -> Self {
        Self { a, b, a_to_b, b_to_a }
    }

    /// The `a` side.
    #[inline]
    pub fn a(&self) -> &A {
        &self.a
    }

    /// The `b` side.
    #[inline]
    pub fn b(&self) -> &B {
        &self.b
    }

    /// Replaces `a` and recomputes `b`.
    ///
    /// Returns `false` without touching either side if `value == a`.
    pub fn set_a(&mut self, value: A) -> bool {
        if value == self.a {
            return false;
        }
        self.a = value;
        self.b = (self.a_to_b)(&self.a, &self.b);
        trace!("binding: a changed, b recomputed");
        true
    }

    /// Replaces `b` and recomputes `a`.
    ///
    /// Returns `false` without touching either side if `value == b`.
    pub fn set_b(&mut self, value: B) -> bool {
        if value == self.b {
            return false;
        }
        self.b = value;
        self.a = (self.b_to_a)(&self.b, &self.a);
        trace!("binding: b changed, a recomputed");
        true
    }

    /// Edits a copy of `a` in place and stores it through [`Self::set_a`].
    pub fn update_a(&mut self, f: impl FnOnce(&mut A)) -> bool
    where
        A: Clone,
    {
        let mut value = self.a.clone();
        f(&mut value);
        self.set_a(value)
    }

    /// Edits a copy of `b` in place and stores it through [`Self::set_b`].
    pub fn update_b(&mut self, f: impl FnOnce(&mut B)) -> bool
    where
        B: Clone,
    {
        let mut value = self.b.clone();
        f(&mut value);
        self.set_b(value)
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Binding<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("a", &self.a).field("b", &self.b).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(a: &i32, _: &i32) -> i32 {
        a * 2
    }

    fn halve(b: &i32, _: &i32) -> i32 {
        b / 2
    }

    #[test]
    fn test_new_derives_b() {
        let bind = Binding::new(21, double, halve);
        assert_eq!(*bind.a(), 21);
        assert_eq!(*bind.b(), 42);
    }

    #[test]
    fn test_set_either_side() {
        let mut bind = Binding::new(1, double, halve);
        assert!(bind.set_a(5));
        assert_eq!(*bind.b(), 10);
        assert!(bind.set_b(8));
        assert_eq!(*bind.a(), 4);
    }

    #[test]
    fn test_unchanged_value_does_not_fire() {
        fn boom(_: &i32, _: &i32) -> i32 {
            panic!("conversion must not run for an unchanged value")
        }
        let mut bind = Binding::from_parts(3, 6, boom, boom);
        assert!(!bind.set_a(3));
        assert!(!bind.set_b(6));
    }

    #[test]
    fn test_sync_write_does_not_retrigger() {
        // b_to_a panics: setting a must only run a_to_b.
        fn boom(_: &i32, _: &i32) -> i32 {
            panic!("reverse conversion fired")
        }
        let mut bind = Binding::from_parts(1, 2, double, boom);
        assert!(bind.set_a(7));
        assert_eq!(*bind.b(), 14);
    }

    #[test]
    fn test_conversion_sees_old_value() {
        // Keeps the sign of the previous b.
        fn signed(a: &i32, old: &i32) -> i32 {
            if *old < 0 { -a } else { *a }
        }
        let mut bind = Binding::from_parts(1, -1, signed, |b, _| b.abs());
        bind.set_a(4);
        assert_eq!(*bind.b(), -4);
    }

    #[test]
    fn test_update_closure() {
        let mut bind = Binding::new(1, double, halve);
        assert!(bind.update_a(|a| *a += 2));
        assert_eq!(*bind.b(), 6);
        assert!(!bind.update_b(|_| {}));
    }
}
