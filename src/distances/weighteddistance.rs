use crate::{memory::coord, Center, DistanceFunction, Primitive, Sample};

/// Position-aware distance, fusing color similarity and spatial proximity:
///
/// `Σ channel_weights[c] · (center[c] - sample[c])² + spatial_weight · (Δrow² + Δcol²)`
///
/// The center's position is the position of the pixel it was seeded from. A nonzero
/// **spatial_weight** biases the clustering towards spatially compact regions of similar color.
///
/// ## Default
/// Channel weights `[2.3, 0.4, 1.0]` (tuned for a hue/saturation/value-like color space)
/// and a spatial weight of `0.05`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedDistance<T: Primitive> {
    pub channel_weights: [T; 3],
    pub spatial_weight: T,
}
impl<T: Primitive> WeightedDistance<T> {
    pub fn new(channel_weights: [T; 3], spatial_weight: T) -> Self {
        Self { channel_weights, spatial_weight }
    }
}
impl<T: Primitive> Default for WeightedDistance<T> {
    fn default() -> Self {
        Self {
            channel_weights: [T::from(2.3).unwrap(), T::from(0.4).unwrap(), T::one()],
            spatial_weight: T::from(0.05).unwrap(),
        }
    }
}

impl<T: Primitive> DistanceFunction<T> for WeightedDistance<T> {
    #[inline(always)]
    fn distance(&self, center: &Center<T>, sample: &Sample<T>) -> T {
        let color: T = center.feature.iter()
            .zip(sample.feature.iter())
            .zip(self.channel_weights.iter())
            .map(|((cv, sv), w)| *w * (*cv - *sv) * (*cv - *sv))
            .sum();
        let d_row = coord::<T>(center.row) - coord(sample.row);
        let d_col = coord::<T>(center.col) - coord(sample.col);
        color + self.spatial_weight * (d_row * d_row + d_col * d_col)
    }
}
