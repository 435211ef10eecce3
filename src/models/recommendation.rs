use super::crop::{CropProfile, Season, SoilType};
use crate::error::{CropWiseError, Result};
use serde::{Deserialize, Serialize};

/// Optional field measurements forwarded to the recommendation service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgronomicReadings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nitrogen: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phosphorous: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub soil_type: Option<SoilType>,
    pub season: Option<Season>,
    /// Only sent to the remote service for regional context
    pub location: Option<String>,
    pub readings: AgronomicReadings,
}

impl RecommendationRequest {
    pub fn new(soil_type: SoilType, season: Season) -> Self {
        Self {
            soil_type: Some(soil_type),
            season: Some(season),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = if location.trim().is_empty() {
            None
        } else {
            Some(location)
        };
        self
    }

    pub fn with_readings(mut self, readings: AgronomicReadings) -> Self {
        self.readings = readings;
        self
    }

    /// Soil type and season must both be chosen before anything is dispatched.
    pub fn validate(&self) -> Result<(SoilType, Season)> {
        match (self.soil_type, self.season) {
            (Some(soil), Some(season)) => Ok((soil, season)),
            (None, _) => Err(CropWiseError::Validation(
                "Please select a soil type".to_string(),
            )),
            (_, None) => Err(CropWiseError::Validation(
                "Please select a season".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationSource {
    /// Remote names, none of them known locally
    Remote,
    /// Remote names with at least one replaced by a local profile
    RemoteEnriched,
    /// Remote returned nothing (or is switched off); local table used
    FallbackLocal,
    /// Remote call failed; local table used
    FallbackError,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Remote => "remote",
            RecommendationSource::RemoteEnriched => "remote-enriched",
            RecommendationSource::FallbackLocal => "fallback-local",
            RecommendationSource::FallbackError => "fallback-error",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            RecommendationSource::FallbackLocal | RecommendationSource::FallbackError
        )
    }
}

impl std::fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the display layer should frame a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    /// Offline recommendations shown because the service failed
    Degraded,
    /// Nothing matched, and the service was healthy
    NoDataAvailable,
    /// Nothing to show, and the service was down
    ServiceUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub crops: Vec<CropProfile>,
    pub source: RecommendationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl RecommendationResult {
    pub fn new(crops: Vec<CropProfile>, source: RecommendationSource) -> Self {
        Self {
            crops,
            source,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn availability(&self) -> Availability {
        let failed = self.source == RecommendationSource::FallbackError;
        match (self.crops.is_empty(), failed) {
            (false, false) => Availability::Available,
            (false, true) => Availability::Degraded,
            (true, false) => Availability::NoDataAvailable,
            (true, true) => Availability::ServiceUnavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_soil_and_season() {
        let req = RecommendationRequest::default();
        assert!(matches!(req.validate(), Err(CropWiseError::Validation(_))));

        let req = RecommendationRequest {
            soil_type: Some(SoilType::Red),
            ..Default::default()
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("season"));

        let req = RecommendationRequest::new(SoilType::Red, Season::Kharif);
        assert_eq!(req.validate().unwrap(), (SoilType::Red, Season::Kharif));
    }

    #[test]
    fn blank_location_is_dropped() {
        let req = RecommendationRequest::new(SoilType::Black, Season::Rabi).with_location("   ");
        assert!(req.location.is_none());

        let req = RecommendationRequest::new(SoilType::Black, Season::Rabi).with_location("Nagpur");
        assert_eq!(req.location.as_deref(), Some("Nagpur"));
    }

    #[test]
    fn source_flags() {
        assert_eq!(RecommendationSource::RemoteEnriched.as_str(), "remote-enriched");
        assert_eq!(
            serde_json::to_string(&RecommendationSource::FallbackError).unwrap(),
            "\"fallback-error\""
        );
        assert!(RecommendationSource::FallbackLocal.is_fallback());
        assert!(!RecommendationSource::Remote.is_fallback());
    }

    #[test]
    fn availability_distinguishes_no_match_from_service_down() {
        let profile = CropProfile::synthesized("Millet", Season::Kharif);

        let empty_ok = RecommendationResult::new(vec![], RecommendationSource::FallbackLocal);
        assert_eq!(empty_ok.availability(), Availability::NoDataAvailable);

        let empty_down = RecommendationResult::new(vec![], RecommendationSource::FallbackError);
        assert_eq!(empty_down.availability(), Availability::ServiceUnavailable);

        let offline =
            RecommendationResult::new(vec![profile.clone()], RecommendationSource::FallbackError);
        assert_eq!(offline.availability(), Availability::Degraded);

        let remote = RecommendationResult::new(vec![profile], RecommendationSource::Remote);
        assert_eq!(remote.availability(), Availability::Available);
    }
}
