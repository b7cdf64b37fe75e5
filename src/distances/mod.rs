mod euclideandistance;
mod weighteddistance;

pub use euclideandistance::{square_distance, EuclideanDistance};
pub use weighteddistance::WeightedDistance;
