//! # pixel-kmeans - API documentation
//!
//! pixel-kmeans is a small rust library, clustering the pixels of an image into k groups by
//! color (and optionally position) similarity, using the k-means algorithm.
//! It is meant as a color-quantization / segmentation primitive: given an image, it partitions the
//! pixels into k clusters and reports each cluster's representative color and location, plus the
//! per-pixel cluster assignment.
//!
//! ## Design target
//! The crate only contains the clustering engine. Decoding images, converting color spaces,
//! or displaying results is left to the caller, who hands in a plain row-major buffer of 3-channel
//! pixels and reads back labeled samples and centers.
//!
//! ## Distance metrics
//! The engine is generic over its distance metric (see [`DistanceFunction`]):
//! - [`EuclideanDistance`]: plain squared euclidean distance of the colors
//! - [`WeightedDistance`]: per-channel weighted color distance plus a weighted spatial term,
//!   biasing the clustering towards compact regions
//! - any closure `Fn(&Center<T>, &Sample<T>) -> T`
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use pixel_kmeans::*;
//! use rand::prelude::*;
//!
//! let (rows, cols, k) = (32, 48, 4);
//!
//! // Generate some random pixels
//! let mut rnd = StdRng::seed_from_u64(1337);
//! let pixels: Vec<[u8; 3]> = (0..rows * cols).map(|_| rnd.gen()).collect();
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(rnd)
//!     .iteration_done(&|nr, _, shift| println!("Iteration {} - center shift: {:.2}", nr, shift))
//!     .build();
//! let mut kmean: KMeans<f32, _> = KMeans::new(&pixels, rows, cols, k, WeightedDistance::default(), conf).unwrap();
//! let termination = kmean.run(100, 1.0).unwrap();
//!
//! println!("Stopped: {:?}", termination);
//! println!("Centers: {:?}", kmean.result_centers());
//! println!("Labels: {:?}", kmean.labels());
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It copies the pixels into its own sample list on
//! construction, and owns them together with the k centers for its lifetime. The individual steps
//! ([`KMeans::initialize_centers`], [`KMeans::update_labels`], [`KMeans::update_centers`],
//! [`KMeans::is_terminate`]) are public, [`KMeans::run`] chains them until either the iteration bound or
//! the convergence radius is hit.
//!
//! Randomness is only used for seeding (and, if configured, re-seeding empty clusters), and comes from the
//! generator passed in through [`KMeansConfig`]. A seeded generator makes every run reproducible.
//!
//! The engine logs its progress through the [`log`] facade.

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod variants;
mod inits;
mod distances;
mod abort_strategy;

pub use abort_strategy::Termination;
pub use api::{Center, DistanceFunction, EmptyClusterPolicy, KMeans, KMeansConfig, KMeansConfigBuilder, Sample,
    InitDoneCallbackFn, IterationDoneCallbackFn, DEFAULT_SEED_DRAWS_PER_CENTER};
pub use distances::{square_distance, EuclideanDistance, WeightedDistance};
pub use error::KMeansError;
pub use memory::Primitive;
