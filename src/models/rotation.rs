use super::crop::{Season, SoilType};
use crate::error::{CropWiseError, Result};
use serde::{Deserialize, Serialize};

/// Marker rendered in place of a number the remote service did not provide.
pub const UNAVAILABLE: &str = "unavailable";

pub const MAX_SEASONS: u32 = 12;

/// Render an optional remote figure with two decimals, never as 0 or blank.
pub fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2} {}", v, unit),
        None => UNAVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationRequest {
    /// Last crop grown
    pub crop1: String,
    pub crop2: Option<String>,
    pub crop3: Option<String>,
    pub soil_type: Option<SoilType>,
    pub region: Option<String>,
    pub start_season: Option<Season>,
    pub number_of_seasons: Option<u32>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl RotationRequest {
    pub fn new(crop1: impl Into<String>, soil_type: SoilType) -> Self {
        Self {
            crop1: crop1.into(),
            soil_type: Some(soil_type),
            ..Default::default()
        }
    }

    pub fn with_crop2(mut self, crop: impl Into<String>) -> Self {
        self.crop2 = non_blank(crop);
        self
    }

    pub fn with_crop3(mut self, crop: impl Into<String>) -> Self {
        self.crop3 = non_blank(crop);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = non_blank(region);
        self
    }

    pub fn with_start_season(mut self, season: Season) -> Self {
        self.start_season = Some(season);
        self
    }

    pub fn with_number_of_seasons(mut self, n: u32) -> Self {
        self.number_of_seasons = Some(n);
        self
    }

    /// Returns the trimmed last crop and the soil type.
    pub fn validate(&self) -> Result<(&str, SoilType)> {
        let crop1 = self.crop1.trim();
        if crop1.is_empty() {
            return Err(CropWiseError::Validation(
                "Please select the last crop grown".to_string(),
            ));
        }
        let soil = self.soil_type.ok_or_else(|| {
            CropWiseError::Validation("Please select a soil type".to_string())
        })?;
        if let Some(n) = self.number_of_seasons {
            if n == 0 || n > MAX_SEASONS {
                return Err(CropWiseError::Validation(format!(
                    "Number of seasons must be between 1 and {}",
                    MAX_SEASONS
                )));
            }
        }
        Ok((crop1, soil))
    }

    /// Planned follow-up crops, blanks skipped.
    pub fn planned_crops(&self) -> Vec<&str> {
        [self.crop2.as_deref(), self.crop3.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationStep {
    /// 1-based
    pub year: u32,
    pub crop: String,
    pub benefit: String,
    pub icon: String,
}

impl RotationStep {
    pub fn new(year: u32, crop: &str, benefit: &str, icon: &str) -> Self {
        Self {
            year,
            crop: crop.to_string(),
            benefit: benefit.to_string(),
            icon: icon.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationPath {
    RuleSet,
    RemoteAugmented,
}

impl RotationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationPath::RuleSet => "rule-set",
            RotationPath::RemoteAugmented => "remote-augmented",
        }
    }
}

impl std::fmt::Display for RotationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw numbers returned by the remote rotation model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationPrediction {
    pub yield_t_per_ha: Option<f64>,
    pub carbon_kg_co2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationPlan {
    pub steps: Vec<RotationStep>,
    pub soil_health_note: String,
    pub nitrogen_balance: String,
    pub pest_reduction: String,
    pub path: RotationPath,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub season_sequence: Vec<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<RotationPrediction>,
}

impl RotationPlan {
    pub fn with_season_sequence(mut self, seasons: Vec<Season>) -> Self {
        self.season_sequence = seasons;
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Years run 1, 2, 3... with no gaps.
    pub fn years_are_contiguous(&self) -> bool {
        self.steps
            .iter()
            .enumerate()
            .all(|(i, step)| step.year as usize == i + 1)
    }

    pub fn crops(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.crop.as_str()).collect()
    }
}
