use crate::error::{CropWiseError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldPredictionInput {
    pub crop: String,
    pub season: String,
    /// State or region, e.g. "punjab" or "Uttar Pradesh"
    pub state: String,
    pub area_hectares: Option<f64>,
}

/// Normalised lookup keys for the scoring tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldKeys {
    pub crop: String,
    pub season: String,
    pub state: String,
}

impl YieldPredictionInput {
    pub fn new(crop: impl Into<String>, season: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            season: season.into(),
            state: state.into(),
            area_hectares: None,
        }
    }

    pub fn with_area(mut self, hectares: f64) -> Self {
        self.area_hectares = Some(hectares);
        self
    }

    pub fn validate(&self) -> Result<YieldKeys> {
        let crop = self.crop.trim().to_lowercase();
        let season = self.season.trim().to_lowercase();
        let state = self
            .state
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");

        if crop.is_empty() || season.is_empty() || state.is_empty() {
            return Err(CropWiseError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }

        if let Some(area) = self.area_hectares {
            if !area.is_finite() || area < 0.0 {
                return Err(CropWiseError::Validation(
                    "Area must be a non-negative number of hectares".to_string(),
                ));
            }
        }

        Ok(YieldKeys {
            crop,
            season,
            state,
        })
    }
}

/// Multiplier-derived percentages; display labels, not physical models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub soil_impact: i64,
    pub rainfall_impact: i64,
    pub temperature_impact: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= 85 {
            ConfidenceBand::High
        } else if confidence >= 70 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "High",
            ConfidenceBand::Moderate => "Moderate",
            ConfidenceBand::Low => "Low",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPredictionResult {
    /// tons/hectare, 2 decimals
    pub predicted_yield: f64,
    /// 0-95
    pub confidence: u8,
    pub factors: FactorBreakdown,
    /// predicted_yield × area, only when an area was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_production_tons: Option<f64>,
}

impl YieldPredictionResult {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}
