use crate::datasources::{PredictionService, RecommendBody};
use crate::error::Result;
use crate::knowledge::KnowledgeBase;
use crate::models::{
    CropProfile, RecommendationRequest, RecommendationResult, RecommendationSource, Season,
};
use std::sync::Arc;

pub const DEGRADED_NOTICE: &str =
    "Failed to reach the recommendation service. Showing offline recommendations.";

/// Reconciles the remote recommendation service with the local knowledge base.
///
/// - Remote names are enriched with local profiles where one exists
/// - An empty remote answer falls back to the local bucket as-is
/// - A failed remote call falls back too, with [`DEGRADED_NOTICE`] attached
///
/// Only validation errors leave `resolve`; service failures never do.
pub struct RecommendationResolver {
    service: Option<Arc<dyn PredictionService>>,
    knowledge: KnowledgeBase,
}

impl RecommendationResolver {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            service: Some(service),
            knowledge: KnowledgeBase::new(),
        }
    }

    /// Knowledge base only; no network calls are made.
    pub fn offline() -> Self {
        Self {
            service: None,
            knowledge: KnowledgeBase::new(),
        }
    }

    pub async fn resolve(&self, request: &RecommendationRequest) -> Result<RecommendationResult> {
        let (soil, season) = request.validate()?;

        let service = match self.service {
            Some(ref service) => service,
            None => {
                tracing::info!("Prediction service disabled, using knowledge base");
                return Ok(RecommendationResult::new(
                    self.knowledge.lookup(soil, season),
                    RecommendationSource::FallbackLocal,
                ));
            }
        };

        let body = RecommendBody::new(soil, request.location.as_deref(), request.readings);

        match service.recommend(&body).await {
            Ok(response) => {
                let names = response.crop_names();
                if names.is_empty() {
                    tracing::info!(
                        "{} returned no crops, using knowledge base",
                        service.service_name()
                    );
                    return Ok(RecommendationResult::new(
                        self.knowledge.lookup(soil, season),
                        RecommendationSource::FallbackLocal,
                    ));
                }

                let (crops, matched) = self.enrich(&names, season);
                let source = if matched > 0 {
                    RecommendationSource::RemoteEnriched
                } else {
                    RecommendationSource::Remote
                };
                tracing::debug!(
                    total = crops.len(),
                    matched,
                    "Enriched remote recommendations"
                );
                Ok(RecommendationResult::new(crops, source))
            }
            Err(e) => {
                tracing::warn!("Failed to get crop recommendations: {}", e);
                Ok(
                    RecommendationResult::new(
                        self.knowledge.lookup(soil, season),
                        RecommendationSource::FallbackError,
                    )
                    .with_notice(DEGRADED_NOTICE),
                )
            }
        }
    }

    /// Replace each name with its knowledge-base profile, or synthesize one.
    /// Returns the profiles and how many came from the knowledge base.
    fn enrich(&self, names: &[String], season: Season) -> (Vec<CropProfile>, usize) {
        let mut matched = 0;
        let crops = names
            .iter()
            .map(|name| match self.knowledge.find_by_name(name) {
                Some(profile) => {
                    matched += 1;
                    profile
                }
                None => CropProfile::synthesized(name.as_str(), season),
            })
            .collect();
        (crops, matched)
    }
}
