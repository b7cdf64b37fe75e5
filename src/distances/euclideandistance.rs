use crate::{Center, DistanceFunction, Primitive, Sample};

/// Squared euclidean distance of two 3-channel features.
#[inline(always)]
pub fn square_distance<T: Primitive>(a: &[T; 3], b: &[T; 3]) -> T {
    a.iter().zip(b.iter())
        .map(|(av, bv)| *av - *bv)
        .map(|v| v * v)
        .sum()
}

/// Plain squared euclidean distance between a center's and a sample's color.
/// Positions are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, center: &Center<T>, sample: &Sample<T>) -> T {
        square_distance(&center.feature, &sample.feature)
    }
}
