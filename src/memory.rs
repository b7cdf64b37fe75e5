use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{AddAssign, SubAssign},
};

/// Floating point type the engine computes in.
pub trait Primitive: Float + Zero + NumCast + AddAssign + SubAssign + Sum
                + PartialOrd + Copy + Default + Display + Debug + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Converts a pixel coordinate into the computation type.
#[inline(always)]
pub(crate) fn coord<T: Primitive>(v: usize) -> T {
    // every usize is representable (lossy) in f32/f64
    T::from(v).unwrap_or_else(T::max_value)
}
