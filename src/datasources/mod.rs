pub mod prediction;

pub use prediction::{
    PredictionClient, PredictionService, RecommendBody, RecommendResponse, RotationBody,
    RotationResponse, YieldBody, YieldResponse,
};
