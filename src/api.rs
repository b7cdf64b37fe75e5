use crate::{abort_strategy, memory::*, KMeansError, Termination};
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&[Center<T>]);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(usize, &[Center<T>], T);

/// Default amount of random draws the seeding may spend per requested center.
pub const DEFAULT_SEED_DRAWS_PER_CENTER: usize = 1000;

/// One input pixel: its position within the image, its color feature and the cluster it is
/// currently assigned to.
///
/// ## Fields
/// - **row**, **col**: Position of the pixel within the image
/// - **feature**: The pixel's 3 color channels
/// - **label**: Index of the assigned center, `None` until the first assignment pass
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<T: Primitive> {
    pub row: usize,
    pub col: usize,
    pub feature: [T; 3],
    pub label: Option<usize>,
}

/// Representative of one cluster.
///
/// **row** and **col** hold the position of the pixel the center was seeded from. They are
/// not re-averaged during updates and only matter to position-aware metrics like [`crate::WeightedDistance`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Center<T: Primitive> {
    pub feature: [T; 3],
    pub row: usize,
    pub col: usize,
}
impl<T: Primitive> Center<T> {
    pub(crate) fn from_sample(sample: &Sample<T>) -> Self {
        Self { feature: sample.feature, row: sample.row, col: sample.col }
    }
}

/// Distance between a center and a sample, used to assign samples to clusters.
///
/// Implemented for [`crate::EuclideanDistance`], [`crate::WeightedDistance`] and for any
/// closure of the shape `Fn(&Center<T>, &Sample<T>) -> T`. Implementations have to be pure:
/// the same pair must always produce the same distance.
pub trait DistanceFunction<T: Primitive> {
    fn distance(&self, center: &Center<T>, sample: &Sample<T>) -> T;
}
impl<T: Primitive, F> DistanceFunction<T> for F where F: Fn(&Center<T>, &Sample<T>) -> T {
    #[inline(always)]
    fn distance(&self, center: &Center<T>, sample: &Sample<T>) -> T {
        self(center, sample)
    }
}

/// What the center update does with a cluster that did not receive a single sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// The center keeps its value from the previous iteration.
    #[default]
    KeepPrevious,
    /// The center is replaced by a uniformly drawn sample (color and position).
    Reseed,
    /// The update aborts with [`KMeansError::EmptyCluster`].
    Fail,
}

/// This is a structure holding the configuration options of a clustering engine, such as
/// the random number generator to use, the empty-cluster handling, or a couple of callbacks,
/// that can be set to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the centers have been seeded
    /// ## Arguments
    /// - **centers**: The freshly seeded centers
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **iteration_id**: Number of the current iteration
    /// - **centers**: Centers after the iteration's update
    /// - **shift**: Summed squared movement of all centers during the iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<dyn RngCore>,
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
    /// Random draws allowed per center while seeding
    pub(crate) max_seed_draws: usize,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(StdRng::from_entropy()),
            empty_cluster_policy: EmptyClusterPolicy::default(),
            max_seed_draws: DEFAULT_SEED_DRAWS_PER_CENTER,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("empty_cluster_policy", &self.empty_cluster_policy)
            .field("max_seed_draws", &self.max_seed_draws)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centers were seeded, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration of a running calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator used for seeding (and re-seeding of empty clusters).
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(rnd); self
    }
    /// Set how the center update treats clusters without samples.
    /// ## Default
    /// [`EmptyClusterPolicy::KeepPrevious`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Set the amount of random draws the seeding may use per center, before giving up
    /// with [`KMeansError::SeedingExhausted`].
    /// ## Default
    /// [`DEFAULT_SEED_DRAWS_PER_CENTER`]
    pub fn max_seed_draws(mut self, draws_per_center: usize) -> Self {
        self.config.max_seed_draws = draws_per_center; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Entrypoint of this crate's API-Surface: the clustering engine.
///
/// An instance takes a copy of one image's pixels, and owns them together with the k centers for
/// its whole lifetime. Callers only ever receive copies of the engine's state
/// (see [`KMeans::result_samples`] and [`KMeans::result_centers`]).
///
/// ## Generics
/// - **T**: Primitive type used for all calculations ([`f32`] or [`f64`])
/// - **D**: Distance metric used to assign samples to centers
pub struct KMeans<'a, T: Primitive, D: DistanceFunction<T>> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) samples: Vec<Sample<T>>,
    pub(crate) centers: Vec<Center<T>>,
    /// Centers before the most recent update. `None` until the first update.
    pub(crate) last_centers: Option<Vec<Center<T>>>,
    pub(crate) seed_indices: Vec<usize>,
    pub(crate) iteration: usize,
    pub(crate) distance: D,
    pub(crate) config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive, D: DistanceFunction<T>> KMeans<'a, T, D> {
    /// Create a new instance of the [`KMeans`] engine.
    ///
    /// ## Arguments
    /// - **pixels**: 3-channel pixels [row-major] = [<pixel(0,0)>,<pixel(0,1)>,...]
    /// - **rows**, **cols**: Extents of the image
    /// - **k**: Amount of clusters to search for
    /// - **distance**: Metric used to assign pixels to clusters
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidDimensions`] if `pixels.len() != rows * cols`
    /// - [`KMeansError::InsufficientData`] if the image has no pixels
    /// - [`KMeansError::InvalidK`] if `k == 0` or `k` exceeds the amount of pixels
    pub fn new<P>(pixels: &[[P; 3]], rows: usize, cols: usize, k: usize, distance: D, config: KMeansConfig<'a, T>)
            -> Result<Self, KMeansError> where P: Copy + Into<T> {
        let sample_cnt = rows.checked_mul(cols)
            .ok_or_else(|| KMeansError::InvalidDimensions(format!("{}x{} pixels overflow", rows, cols)))?;
        if pixels.len() != sample_cnt {
            return Err(KMeansError::InvalidDimensions(
                format!("expected {}x{} = {} pixels, got {}", rows, cols, sample_cnt, pixels.len())));
        }
        if sample_cnt == 0 {
            return Err(KMeansError::InsufficientData("image has no pixels".to_string()));
        }
        if k == 0 || k > sample_cnt {
            return Err(KMeansError::InvalidK { k, sample_cnt });
        }

        let samples = pixels.iter().enumerate()
            .map(|(i, px)| Sample {
                row: i / cols,
                col: i % cols,
                feature: px.map(Into::into),
                label: None,
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            samples,
            centers: vec![Center::default(); k],
            last_centers: None,
            seed_indices: Vec::with_capacity(k),
            iteration: 0,
            distance,
            config,
        })
    }

    /// Seed the k centers with k distinct, uniformly drawn samples (a.k.a. Forgy).
    ///
    /// Samples are drawn by rejection: indices are drawn until k distinct ones were found.
    /// Centers are filled in ascending sample index order. Forgets the center history.
    ///
    /// ## Errors
    /// [`KMeansError::SeedingExhausted`] when the configured draw budget ran out.
    pub fn initialize_centers(&mut self) -> Result<(), KMeansError> {
        crate::inits::randomsample::calculate(self)
    }

    /// Assign every sample to its nearest center. On equal distances, the lower center index wins.
    pub fn update_labels(&mut self) -> Result<(), KMeansError> {
        crate::variants::Lloyd::update_labels(self)
    }

    /// Remember the current centers as history, then move every center to the mean color of the
    /// samples currently assigned to it. Empty clusters are handled according to the configured
    /// [`EmptyClusterPolicy`].
    pub fn update_centers(&mut self) -> Result<(), KMeansError> {
        crate::variants::Lloyd::update_centers(self)
    }

    /// Check whether a running calculation has to stop: either **current_iter** reached
    /// **max_iteration**, or the summed squared movement of all centers during the last update
    /// is `<= radius`. Before the first update, only the iteration bound is checked.
    pub fn is_terminate(&self, current_iter: usize, max_iteration: usize, radius: T) -> bool {
        abort_strategy::termination_reason(
            current_iter, max_iteration, radius, &self.centers, self.last_centers.as_deref()
        ).is_some()
    }

    /// Summed squared (plain euclidean) movement of all centers during the last update.
    /// `None` before the first update.
    pub fn center_shift(&self) -> Option<T> {
        self.last_centers.as_deref()
            .map(|last| abort_strategy::check_convergence(&self.centers, last))
    }

    /// Execute the complete k-means calculation.
    /// 1. seed k centers randomly
    /// 2. assign each sample to its nearest center
    /// 3. move the centers to the mean of their samples
    /// 4. check the termination conditions, if none is fulfilled, return to step 2
    ///
    /// ## Arguments
    /// - **max_iteration**: Upper bound of assignment/update cycles
    /// - **radius**: Convergence radius on the summed squared center movement per iteration
    ///
    /// ## Example
    /// ```rust
    /// use pixel_kmeans::*;
    /// use rand::prelude::*;
    ///
    /// let pixels: Vec<[u8; 3]> = (0..64u8).map(|i| if i < 32 { [10, 20, 30] } else { [200, 180, 160] }).collect();
    /// let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(7)).build();
    /// let mut kmean: KMeans<f32, _> = KMeans::new(&pixels, 8, 8, 2, EuclideanDistance, conf).unwrap();
    /// kmean.run(100, 1e-3).unwrap();
    ///
    /// // every pixel is assigned to one of the two clusters
    /// assert!(kmean.labels().iter().all(|l| matches!(l, Some(0) | Some(1))));
    /// println!("Centers: {:?}", kmean.result_centers());
    /// ```
    pub fn run(&mut self, max_iteration: usize, radius: T) -> Result<Termination, KMeansError> {
        crate::variants::Lloyd::calculate(self, max_iteration, radius)
    }

    /// Copy of all samples in row-major order, including their current labels.
    pub fn result_samples(&self) -> Vec<Sample<T>> {
        self.samples.clone()
    }

    /// Copy of the current centers.
    pub fn result_centers(&self) -> Vec<Center<T>> {
        self.centers.clone()
    }

    /// Labels of all samples in row-major order.
    pub fn labels(&self) -> Vec<Option<usize>> {
        self.samples.iter().map(|s| s.label).collect()
    }

    /// Sample indices the current centers were seeded from, in ascending order.
    pub fn seed_indices(&self) -> &[usize] {
        &self.seed_indices
    }

    /// Amount of samples assigned to each center.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.centers.len()];
        self.samples.iter().filter_map(|s| s.label).for_each(|l| sizes[l] += 1);
        sizes
    }

    /// Sum of the distances (as measured by the engine's metric) from each labeled sample to its center.
    pub fn distsum(&self) -> T {
        self.samples.iter()
            .filter_map(|s| s.label.map(|l| self.distance.distance(&self.centers[l], s)))
            .sum()
    }

    /// Amount of assignment/update cycles performed by the last [`KMeans::run`].
    pub fn iterations(&self) -> usize { self.iteration }
    pub fn k(&self) -> usize { self.centers.len() }
    pub fn sample_cnt(&self) -> usize { self.samples.len() }
    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use crate::{EuclideanDistance, WeightedDistance};

    #[test]
    fn construction_flattens_row_major() {
        let pixels: Vec<[u8; 3]> = (0..6u8).map(|i| [i, i * 2, i * 3]).collect();
        let kmean: KMeans<f64, _> = KMeans::new(&pixels, 2, 3, 2, EuclideanDistance, seeded_config(1)).unwrap();

        assert_eq!(kmean.sample_cnt(), 6);
        assert_eq!((kmean.rows(), kmean.cols(), kmean.k()), (2, 3, 2));
        let samples = kmean.result_samples();
        assert_eq!((samples[4].row, samples[4].col), (1, 1));
        assert_eq!(samples[4].feature, [4.0, 8.0, 12.0]);
        assert!(samples.iter().all(|s| s.label.is_none()));
        assert_eq!(kmean.result_centers(), vec![Center::default(); 2]);
        assert_eq!(kmean.center_shift(), None);
    }

    #[test]
    fn construction_rejects_invalid_k() {
        let pixels = uniform_image(2, 2, [1u8, 2, 3]);
        let res = KMeans::<f32, _>::new(&pixels, 2, 2, 0, EuclideanDistance, seeded_config(1));
        assert_eq!(res.err(), Some(KMeansError::InvalidK { k: 0, sample_cnt: 4 }));
        let res = KMeans::<f32, _>::new(&pixels, 2, 2, 5, EuclideanDistance, seeded_config(1));
        assert_eq!(res.err(), Some(KMeansError::InvalidK { k: 5, sample_cnt: 4 }));
        assert!(KMeans::<f32, _>::new(&pixels, 2, 2, 4, EuclideanDistance, seeded_config(1)).is_ok());
    }

    #[test]
    fn construction_rejects_bad_grids() {
        let pixels = uniform_image(2, 2, [1u8, 2, 3]);
        let res = KMeans::<f32, _>::new(&pixels, 3, 2, 1, EuclideanDistance, seeded_config(1));
        assert!(matches!(res, Err(KMeansError::InvalidDimensions(_))));
        let res = KMeans::<f32, _>::new(&pixels, usize::MAX, 2, 1, EuclideanDistance, seeded_config(1));
        assert!(matches!(res, Err(KMeansError::InvalidDimensions(_))));

        let empty: Vec<[u8; 3]> = Vec::new();
        let res = KMeans::<f32, _>::new(&empty, 0, 5, 1, EuclideanDistance, seeded_config(1));
        assert!(matches!(res, Err(KMeansError::InsufficientData(_))));
    }

    #[test]
    fn accepts_float_channels() {
        let pixels = vec![[0.25f32, 0.5, 0.75], [1.0, 1.0, 1.0]];
        let kmean: KMeans<f64, _> = KMeans::new(&pixels, 1, 2, 1, WeightedDistance::default(), seeded_config(3)).unwrap();
        assert_eq!(kmean.result_samples()[0].feature, [0.25, 0.5, 0.75]);
    }

    #[test]
    fn closures_are_distance_functions() {
        let constant = |_: &Center<f32>, _: &Sample<f32>| 1.0f32;
        let s = Sample { row: 0, col: 0, feature: [1.0, 2.0, 3.0], label: None };
        assert_eq!(constant.distance(&Center::default(), &s), 1.0);
    }

    #[test]
    fn cluster_sizes_and_distsum() {
        let pixels = vec![[0u8, 0, 0], [0, 0, 2], [10, 0, 0], [12, 0, 0]];
        let mut kmean: KMeans<f64, _> = KMeans::new(&pixels, 2, 2, 2, EuclideanDistance, seeded_config(5)).unwrap();
        assert_eq!(kmean.cluster_sizes(), vec![0, 0]);
        assert_eq!(kmean.distsum(), 0.0);

        kmean.run(20, 0.0).unwrap();
        let mut sizes = kmean.cluster_sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![2, 2]);
        // {[0,0,0], [0,0,2]} around [0,0,1], {[10,0,0], [12,0,0]} around [11,0,0]
        assert_approx_eq!(kmean.distsum(), 4.0, 1e-12);
    }

    #[test]
    fn config_debug_names_options() {
        let conf = KMeansConfig::<f32>::build().empty_cluster_policy(EmptyClusterPolicy::Fail).max_seed_draws(3).build();
        let dbg = format!("{:?}", conf);
        assert!(dbg.contains("Fail"));
        assert!(dbg.contains("max_seed_draws: 3"));
    }
}
