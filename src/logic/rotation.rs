use super::seasons::season_sequence;
use crate::datasources::{PredictionService, RotationBody};
use crate::error::{CropWiseError, Result};
use crate::knowledge::RotationRuleSet;
use crate::models::{
    format_metric, RotationPath, RotationPlan, RotationPrediction, RotationRequest, RotationStep,
};
use std::sync::Arc;

pub const MODEL_NITROGEN_NOTE: &str = "Based on model prediction";

/// Builds rotation plans from the rule set or from the remote rotation model.
///
/// With a service configured, `resolve` takes the remote-augmented path and a
/// failed call is returned as `ServiceUnavailable`. It does not fall back to
/// the rule set, unlike crop recommendations.
pub struct RotationResolver {
    service: Option<Arc<dyn PredictionService>>,
    rules: RotationRuleSet,
}

impl RotationResolver {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            service: Some(service),
            rules: RotationRuleSet::new(),
        }
    }

    pub fn offline() -> Self {
        Self {
            service: None,
            rules: RotationRuleSet::new(),
        }
    }

    pub async fn resolve(&self, request: &RotationRequest) -> Result<RotationPlan> {
        match self.service {
            Some(ref service) => self.remote_plan(service.as_ref(), request).await,
            None => self.rule_set_plan(request),
        }
    }

    /// Canonical four-year plan for the previous crop and soil.
    pub fn rule_set_plan(&self, request: &RotationRequest) -> Result<RotationPlan> {
        let (crop1, soil) = request.validate()?;
        tracing::info!(crop = crop1, soil = soil.key(), "Building rule-set rotation");
        let plan = self.rules.plan_for(crop1, soil);
        Ok(attach_seasons(plan, request))
    }

    /// The user's own sequence annotated with the remote model's figures.
    pub async fn remote_plan(
        &self,
        service: &dyn PredictionService,
        request: &RotationRequest,
    ) -> Result<RotationPlan> {
        let (crop1, soil) = request.validate()?;

        let planned = request.planned_crops();
        let body = RotationBody {
            region: request.region.clone(),
            soil_type: soil.key().to_string(),
            start_season: request.start_season,
            crop1: crop1.to_string(),
            crop2: request.crop2.clone(),
            crop3: request.crop3.clone(),
            number_of_seasons: request.number_of_seasons,
        };

        let response = service.rotation(&body).await.map_err(|e| {
            tracing::warn!("Failed to get rotation prediction: {}", e);
            match e {
                CropWiseError::ServiceUnavailable(msg) => CropWiseError::ServiceUnavailable(msg),
                other => CropWiseError::ServiceUnavailable(other.to_string()),
            }
        })?;
        let prediction = RotationPrediction::from(response);

        let mut steps = vec![RotationStep::new(1, crop1, "Current crop", "🌾")];
        for (crop, icon) in planned.iter().zip(["🌱", "🌿"]) {
            let year = steps.len() as u32 + 1;
            steps.push(RotationStep::new(year, crop, "Planned crop", icon));
        }

        let plan = RotationPlan {
            steps,
            soil_health_note: format!(
                "Predicted yield: {}",
                format_metric(prediction.yield_t_per_ha, "tons/ha")
            ),
            nitrogen_balance: MODEL_NITROGEN_NOTE.to_string(),
            pest_reduction: format!(
                "Carbon impact: {}",
                format_metric(prediction.carbon_kg_co2, "kg CO2/ha")
            ),
            path: RotationPath::RemoteAugmented,
            season_sequence: Vec::new(),
            prediction: Some(prediction),
        };
        Ok(attach_seasons(plan, request))
    }
}

fn attach_seasons(plan: RotationPlan, request: &RotationRequest) -> RotationPlan {
    match request.start_season {
        Some(start) => {
            let n = request
                .number_of_seasons
                .map(|n| n as usize)
                .unwrap_or_else(|| plan.len());
            plan.with_season_sequence(season_sequence(start, n))
        }
        None => plan,
    }
}
