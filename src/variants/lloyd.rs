use crate::{Center, DistanceFunction, EmptyClusterPolicy, KMeans, KMeansError, Termination, abort_strategy, memory::*};
use log::{debug, warn};
use rand::prelude::*;

pub(crate) struct Lloyd;
impl Lloyd {
    pub(crate) fn update_labels<T, D>(kmean: &mut KMeans<'_, T, D>) -> Result<(), KMeansError>
                where T: Primitive, D: DistanceFunction<T> {
        if kmean.seed_indices.is_empty() {
            return Err(KMeansError::NotInitialized);
        }
        let (centers, distance) = (&kmean.centers, &kmean.distance);
        kmean.samples.iter_mut().for_each(|s| {
            // first minimum wins; ties never overwrite an earlier center
            let mut best_idx = 0;
            let mut best_dist = distance.distance(&centers[0], s);
            for (idx, c) in centers.iter().enumerate().skip(1) {
                let dist = distance.distance(c, s);
                if dist < best_dist {
                    best_idx = idx;
                    best_dist = dist;
                }
            }
            s.label = Some(best_idx);
        });
        Ok(())
    }

    pub(crate) fn update_centers<T, D>(kmean: &mut KMeans<'_, T, D>) -> Result<(), KMeansError>
                where T: Primitive, D: DistanceFunction<T> {
        if kmean.seed_indices.is_empty() {
            return Err(KMeansError::NotInitialized);
        }
        // Sum all samples in a cluster together, and count them
        let mut sums = vec![[T::zero(); 3]; kmean.centers.len()];
        let mut frequency = vec![0usize; kmean.centers.len()];
        kmean.samples.iter()
            .filter_map(|s| s.label.map(|l| (l, s)))
            .for_each(|(l, s)| {
                sums[l].iter_mut().zip(s.feature.iter()).for_each(|(acc, v)| *acc += *v);
                frequency[l] += 1;
            });

        if kmean.config.empty_cluster_policy == EmptyClusterPolicy::Fail {
            if let Some(cluster) = frequency.iter().position(|&f| f == 0) {
                return Err(KMeansError::EmptyCluster { cluster, iteration: kmean.iteration });
            }
        }

        kmean.last_centers = Some(kmean.centers.clone());
        for (k, (sum, cnt)) in sums.iter().zip(frequency.iter().cloned()).enumerate() {
            if cnt > 0 {
                let cnt = T::from(cnt).unwrap_or_else(T::max_value);
                kmean.centers[k].feature = sum.map(|v| v / cnt);
                continue;
            }
            match kmean.config.empty_cluster_policy {
                EmptyClusterPolicy::Reseed => {
                    let idx = kmean.config.rnd.gen_range(0..kmean.samples.len());
                    warn!("Cluster {} is empty in iteration {}, reseeding it from sample {}", k, kmean.iteration, idx);
                    kmean.centers[k] = Center::from_sample(&kmean.samples[idx]);
                }
                // Fail never gets here, empty clusters were rejected above
                EmptyClusterPolicy::KeepPrevious | EmptyClusterPolicy::Fail => {
                    warn!("Cluster {} is empty in iteration {}, keeping its center", k, kmean.iteration);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn calculate<T, D>(kmean: &mut KMeans<'_, T, D>, max_iteration: usize, radius: T) -> Result<Termination, KMeansError>
                where T: Primitive, D: DistanceFunction<T> {
        // Initialize centers and notify subscriber
        kmean.initialize_centers()?;
        (kmean.config.init_done)(kmean.centers.as_slice());

        let mut current_iter = 0;
        loop {
            let reason = abort_strategy::termination_reason(
                current_iter, max_iteration, radius, &kmean.centers, kmean.last_centers.as_deref());
            if let Some(reason) = reason {
                debug!("k-means finished after {} iterations: {:?}", current_iter, reason);
                return Ok(reason);
            }

            current_iter += 1;
            kmean.iteration = current_iter;
            Self::update_labels(kmean)?;
            Self::update_centers(kmean)?;

            // Notify subscriber about finished iteration
            let shift = kmean.center_shift().unwrap_or_else(T::zero);
            debug!("Iteration {} - center shift: {:e}", current_iter, shift);
            (kmean.config.iteration_done)(current_iter, kmean.centers.as_slice(), shift);
        }
    }
}
