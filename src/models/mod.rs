pub mod crop;
pub mod recommendation;
pub mod rotation;
pub mod yield_prediction;

pub use crop::*;
pub use recommendation::*;
pub use rotation::*;
pub use yield_prediction::*;
