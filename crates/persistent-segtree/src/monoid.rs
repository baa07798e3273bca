//! Built-in [`Monoid`] implementations.
//!
//! Integer sums wrap on overflow so that aggregates over large values never
//! panic in debug builds; floating-point sums use plain addition.

use std::fmt;
use std::marker::PhantomData;

use crate::types::Monoid;

macro_rules! marker_monoid {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T>(PhantomData<fn() -> T>);

        impl<T> $name<T> {
            pub fn new() -> Self {
                $name(PhantomData)
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }
    };
}

marker_monoid!(
    /// Addition, identity `0`.
    Sum
);
marker_monoid!(
    /// Minimum, identity is the type's maximum value.
    Min
);
marker_monoid!(
    /// Maximum, identity is the type's minimum value.
    Max
);

macro_rules! int_monoids {
    ($($t:ty),*) => {$(
        impl Monoid for Sum<$t> {
            type Value = $t;

            fn identity(&self) -> $t {
                0
            }

            fn combine(&self, a: &$t, b: &$t) -> $t {
                a.wrapping_add(*b)
            }
        }

        impl Monoid for Min<$t> {
            type Value = $t;

            fn identity(&self) -> $t {
                <$t>::MAX
            }

            fn combine(&self, a: &$t, b: &$t) -> $t {
                (*a).min(*b)
            }
        }

        impl Monoid for Max<$t> {
            type Value = $t;

            fn identity(&self) -> $t {
                <$t>::MIN
            }

            fn combine(&self, a: &$t, b: &$t) -> $t {
                (*a).max(*b)
            }
        }
    )*};
}

macro_rules! float_monoids {
    ($($t:ty),*) => {$(
        impl Monoid for Sum<$t> {
            type Value = $t;

            fn identity(&self) -> $t {
                0.0
            }

            fn combine(&self, a: &$t, b: &$t) -> $t {
                a + b
            }
        }

        impl Monoid for Min<$t> {
            type Value = $t;

            fn identity(&self) -> $t {
                <$t>::INFINITY
            }

            fn combine(&self, a: &$t, b: &$t) -> $t {
                a.min(*b)
            }
        }

        impl Monoid for Max<$t> {
            type Value = $t;

            fn identity(&self) -> $t {
                <$t>::NEG_INFINITY
            }

            fn combine(&self, a: &$t, b: &$t) -> $t {
                a.max(*b)
            }
        }
    )*};
}

int_monoids!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_monoids!(f32, f64);

/// Monoid assembled from a caller-supplied identity and combine function.
///
/// ```
/// use persistent_segtree::{FnMonoid, Monoid};
///
/// let gcd = FnMonoid::new(0u64, |a: &u64, b: &u64| {
///     let (mut a, mut b) = (*a, *b);
///     while b != 0 {
///         (a, b) = (b, a % b);
///     }
///     a
/// });
/// assert_eq!(gcd.combine(&12, &18), 6);
/// assert_eq!(gcd.combine(&gcd.identity(), &9), 9);
/// ```
#[derive(Clone)]
pub struct FnMonoid<T, F> {
    identity: T,
    combine: F,
}

impl<T, F> FnMonoid<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    pub fn new(identity: T, combine: F) -> Self {
        Self { identity, combine }
    }
}

impl<T, F> Monoid for FnMonoid<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    type Value = T;

    fn identity(&self) -> T {
        self.identity.clone()
    }

    fn combine(&self, a: &T, b: &T) -> T {
        (self.combine)(a, b)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for FnMonoid<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMonoid")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sum_wraps() {
        let m = Sum::<u8>::new();
        assert_eq!(m.identity(), 0);
        assert_eq!(m.combine(&250, &10), 4);
    }

    #[test]
    fn min_max_identities_are_neutral() {
        let min = Min::<i32>::new();
        let max = Max::<i32>::new();
        for x in [-5, 0, 17, i32::MIN, i32::MAX] {
            assert_eq!(min.combine(&min.identity(), &x), x);
            assert_eq!(max.combine(&x, &max.identity()), x);
        }
    }

    #[test]
    fn float_monoids() {
        let sum = Sum::<f64>::new();
        let min = Min::<f64>::new();
        let max = Max::<f64>::new();
        assert_eq!(sum.combine(&1.5, &2.25), 3.75);
        assert_eq!(min.combine(&min.identity(), &-3.0), -3.0);
        assert_eq!(max.combine(&max.identity(), &-3.0), -3.0);
    }

    #[test]
    fn fn_monoid_uses_closure() {
        let concat = FnMonoid::new(String::new(), |a: &String, b: &String| format!("{a}{b}"));
        assert_eq!(concat.combine(&"ab".to_string(), &"cd".to_string()), "abcd");
        assert_eq!(concat.identity(), "");
        assert!(format!("{concat:?}").starts_with("FnMonoid"));
    }
}
