use crate::{Center, DistanceFunction, KMeans, KMeansError, memory::*};
use log::trace;
use rand::prelude::*;
use std::collections::BTreeSet;

/// Draw **k** distinct indices from `0..sample_cnt` by rejection, giving up after **max_draws**.
pub(crate) fn draw_distinct_indices(rnd: &mut dyn RngCore, sample_cnt: usize, k: usize, max_draws: usize)
		-> Result<BTreeSet<usize>, KMeansError> {
	let mut indices = BTreeSet::new();
	let mut draws = 0;
	while indices.len() < k {
		if draws >= max_draws {
			return Err(KMeansError::SeedingExhausted { k, draws });
		}
		indices.insert(rnd.gen_range(0..sample_cnt));
		draws += 1;
	}
	trace!("Drew {} distinct seed indices in {} draws", k, draws);
	Ok(indices)
}

#[inline(always)] pub(crate) fn calculate<T, D>(kmean: &mut KMeans<'_, T, D>) -> Result<(), KMeansError>
		where T: Primitive, D: DistanceFunction<T> {
	let (sample_cnt, k) = (kmean.samples.len(), kmean.centers.len());
	let max_draws = kmean.config.max_seed_draws.saturating_mul(k);
	let indices = draw_distinct_indices(kmean.config.rnd.as_mut(), sample_cnt, k, max_draws)?;

	// Copy chosen samples into the centers, in ascending index order
	kmean.centers.iter_mut()
		.zip(indices.iter().cloned())
		.for_each(|(c, idx)| *c = Center::from_sample(&kmean.samples[idx]));
	kmean.seed_indices = indices.into_iter().collect();
	kmean.last_centers = None;
	kmean.iteration = 0;
	Ok(())
}
