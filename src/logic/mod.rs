pub mod recommendation;
pub mod rotation;
pub mod seasons;
pub mod yield_estimator;

#[cfg(test)]
pub(crate) mod testing;

pub use recommendation::RecommendationResolver;
pub use rotation::RotationResolver;
pub use yield_estimator::YieldEstimator;
