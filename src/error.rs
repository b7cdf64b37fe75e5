use thiserror::Error;

/// Errors reported by the clustering engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansError {
    /// The requested cluster count is 0 or exceeds the number of samples
    #[error("Invalid k value: {k} (image has {sample_cnt} pixels)")]
    InvalidK { k: usize, sample_cnt: usize },

    /// Pixel buffer does not match the given grid extents
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// The image contains no pixels
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The random seeding ran out of draws before finding k distinct samples
    #[error("Could not draw {k} distinct seed samples within {draws} draws")]
    SeedingExhausted { k: usize, draws: usize },

    /// A cluster lost all of its samples and the policy forbids continuing
    #[error("Cluster {cluster} received no samples in iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },

    /// Centers were used before `initialize_centers()` seeded them
    #[error("Centers have not been initialized. Call initialize_centers() or run() first.")]
    NotInitialized,
}
