pub mod crops;
pub mod rotations;
pub mod yields;

pub use crops::KnowledgeBase;
pub use rotations::RotationRuleSet;
pub use yields::YieldScoringModel;
