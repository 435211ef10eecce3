//! Client for the remote crop prediction service.
//!
//! The service is an opaque oracle: `POST /recommend`, `POST /rotation` and
//! `POST /yield` under the configured API prefix. Responses are shape-checked
//! here; every failure (transport, timeout, non-2xx, malformed body) comes out
//! as [`CropWiseError::ServiceUnavailable`].

use crate::config::ServiceConfig;
use crate::error::{CropWiseError, Result};
use crate::models::{AgronomicReadings, RotationPrediction, Season, SoilType};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendBody {
    pub soil: String,
    pub location: Option<String>,
    #[serde(flatten)]
    pub readings: AgronomicReadings,
}

impl RecommendBody {
    pub fn new(soil: SoilType, location: Option<&str>, readings: AgronomicReadings) -> Self {
        Self {
            soil: soil.key().to_string(),
            location: location.map(str::to_string),
            readings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendResponse {
    pub crops: Vec<String>,
}

impl RecommendResponse {
    /// Trimmed names in service order, blanks dropped.
    pub fn crop_names(&self) -> Vec<String> {
        self.crops
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RotationBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub soil_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_season: Option<Season>,
    pub crop1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RotationResponse {
    #[serde(default)]
    pub yield_t_per_ha: Option<f64>,
    #[serde(default)]
    pub carbon_kg_co2: Option<f64>,
}

impl RotationResponse {
    fn validate(self) -> Result<Self> {
        if let Some(y) = self.yield_t_per_ha {
            if y < 0.0 {
                return Err(CropWiseError::InvalidData(format!(
                    "negative yield {} t/ha",
                    y
                )));
            }
        }
        Ok(self)
    }
}

impl From<RotationResponse> for RotationPrediction {
    fn from(response: RotationResponse) -> Self {
        RotationPrediction {
            yield_t_per_ha: response.yield_t_per_ha,
            carbon_kg_co2: response.carbon_kg_co2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldBody {
    pub crop: String,
    pub season: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_hectares: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct YieldResponse {
    #[serde(default)]
    pub yield_t_per_ha: Option<f64>,
}

impl YieldResponse {
    fn validate(self) -> Result<Self> {
        match self.yield_t_per_ha {
            Some(y) if y < 0.0 => Err(CropWiseError::InvalidData(format!(
                "negative yield {} t/ha",
                y
            ))),
            _ => Ok(self),
        }
    }
}

/// The remote prediction service as seen by the resolvers.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn recommend(&self, body: &RecommendBody) -> Result<RecommendResponse>;

    async fn rotation(&self, body: &RotationBody) -> Result<RotationResponse>;

    async fn predict_yield(&self, body: &YieldBody) -> Result<YieldResponse>;

    /// Name for logging
    fn service_name(&self) -> &str;
}

pub struct PredictionClient {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl PredictionClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn post_json<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(endpoint);
        tracing::debug!(%url, "POST prediction service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropWiseError::ServiceUnavailable(format!(
                "/{} returned {}: {}",
                endpoint,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response.json::<R>().await.map_err(|e| {
            CropWiseError::ServiceUnavailable(format!(
                "Failed to parse /{} response: {}",
                endpoint, e
            ))
        })
    }

    fn transport_error(&self, endpoint: &str, e: reqwest::Error) -> CropWiseError {
        if e.is_timeout() {
            CropWiseError::ServiceUnavailable(format!(
                "/{} timed out after {}s",
                endpoint, self.config.timeout_secs
            ))
        } else {
            CropWiseError::ServiceUnavailable(format!("/{}: {}", endpoint, e))
        }
    }

    /// True when the service host answers at all; any HTTP status counts.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.config.url.trim_end_matches('/');
        match self.client.get(url).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "Prediction service reachable");
                Ok(true)
            }
            Err(e) => {
                tracing::debug!("Prediction service unreachable: {}", e);
                Ok(false)
            }
        }
    }
}

fn invalid_to_unavailable(endpoint: &str, e: CropWiseError) -> CropWiseError {
    match e {
        CropWiseError::InvalidData(msg) => {
            CropWiseError::ServiceUnavailable(format!("/{} sent invalid data: {}", endpoint, msg))
        }
        other => other,
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn recommend(&self, body: &RecommendBody) -> Result<RecommendResponse> {
        self.post_json("recommend", body).await
    }

    async fn rotation(&self, body: &RotationBody) -> Result<RotationResponse> {
        let response: RotationResponse = self.post_json("rotation", body).await?;
        response
            .validate()
            .map_err(|e| invalid_to_unavailable("rotation", e))
    }

    async fn predict_yield(&self, body: &YieldBody) -> Result<YieldResponse> {
        let response: YieldResponse = self.post_json("yield", body).await?;
        response
            .validate()
            .map_err(|e| invalid_to_unavailable("yield", e))
    }

    fn service_name(&self) -> &str {
        "prediction service"
    }
}
