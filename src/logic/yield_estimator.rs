use crate::datasources::{PredictionService, YieldBody};
use crate::error::Result;
use crate::knowledge::YieldScoringModel;
use crate::models::{FactorBreakdown, YieldPredictionInput, YieldPredictionResult};

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent(multiplier: f64) -> i64 {
    (multiplier * 100.0).round() as i64
}

/// Local, synchronous yield estimate from the scoring tables.
///
/// predicted = base(crop) × season × region, rounded to 2 decimals.
/// Confidence is the capped mean of per-table scores (90/85/85 when the key
/// exists, 70 otherwise). The factor breakdown is derived from the two
/// multipliers; it is not a soil, rainfall or temperature model.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldEstimator {
    model: YieldScoringModel,
}

impl YieldEstimator {
    pub fn new() -> Self {
        Self {
            model: YieldScoringModel::new(),
        }
    }

    pub fn estimate(&self, input: &YieldPredictionInput) -> Result<YieldPredictionResult> {
        let keys = input.validate()?;

        let base = self.model.base_yield(&keys.crop);
        let season = self.model.season_multiplier(&keys.season);
        let region = self.model.region_multiplier(&keys.state);

        let predicted_yield = round2(base.value * season.value * region.value);
        let confidence = self.model.blend_confidence(base, season, region);

        let factors = FactorBreakdown {
            soil_impact: percent(region.value),
            rainfall_impact: percent(season.value),
            temperature_impact: percent((region.value + season.value) / 2.0),
        };

        let total_production_tons = input.area_hectares.map(|area| round2(predicted_yield * area));

        tracing::debug!(
            crop = %keys.crop,
            season = %keys.season,
            state = %keys.state,
            predicted_yield,
            confidence,
            "Yield estimate"
        );

        Ok(YieldPredictionResult {
            predicted_yield,
            confidence,
            factors,
            total_production_tons,
        })
    }
}

/// The remote `/yield` figure for the same input, kept apart from the local
/// estimate. `None` when the service had no number.
pub async fn remote_yield_reference(
    service: &dyn PredictionService,
    input: &YieldPredictionInput,
) -> Result<Option<f64>> {
    let keys = input.validate()?;
    let body = YieldBody {
        crop: keys.crop,
        season: keys.season,
        state: keys.state,
        area_hectares: input.area_hectares,
    };
    let response = service.predict_yield(&body).await?;
    Ok(response.yield_t_per_ha.map(round2))
}
