//! N-dimensional vector and matrix primitives used for polytope generation.

pub use {approx, smallvec};

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons and tiny offsets.
pub const EPSILON: Float = 0.000001;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

#[macro_use]
mod vector;

pub mod matrix;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::matrix::Matrix;
    pub use crate::vector::{Vector, VectorRef};
    pub use crate::{EPSILON, Float, vector};
}
pub use prelude::*;
