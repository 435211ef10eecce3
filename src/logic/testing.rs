//! In-process stand-in for the prediction service.

use crate::datasources::{
    PredictionService, RecommendBody, RecommendResponse, RotationBody, RotationResponse,
    YieldBody, YieldResponse,
};
use crate::error::{CropWiseError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct StubService {
    fail: bool,
    crops: Vec<String>,
    rotation: RotationResponse,
    yield_response: YieldResponse,
    calls: AtomicUsize,
    last_recommend: Mutex<Option<RecommendBody>>,
    last_rotation: Mutex<Option<RotationBody>>,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as an unreachable service would.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_crops(mut self, crops: &[&str]) -> Self {
        self.crops = crops.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_rotation(mut self, yield_t_per_ha: Option<f64>, carbon_kg_co2: Option<f64>) -> Self {
        self.rotation = RotationResponse {
            yield_t_per_ha,
            carbon_kg_co2,
        };
        self
    }

    pub fn with_yield(mut self, yield_t_per_ha: Option<f64>) -> Self {
        self.yield_response = YieldResponse { yield_t_per_ha };
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_recommend_body(&self) -> Option<RecommendBody> {
        self.last_recommend.lock().unwrap().clone()
    }

    pub fn last_rotation_body(&self) -> Option<RotationBody> {
        self.last_rotation.lock().unwrap().clone()
    }

    fn record(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(CropWiseError::ServiceUnavailable(
                "connection refused".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PredictionService for StubService {
    async fn recommend(&self, body: &RecommendBody) -> Result<RecommendResponse> {
        *self.last_recommend.lock().unwrap() = Some(body.clone());
        self.record()?;
        Ok(RecommendResponse {
            crops: self.crops.clone(),
        })
    }

    async fn rotation(&self, body: &RotationBody) -> Result<RotationResponse> {
        *self.last_rotation.lock().unwrap() = Some(body.clone());
        self.record()?;
        Ok(self.rotation)
    }

    async fn predict_yield(&self, _body: &YieldBody) -> Result<YieldResponse> {
        self.record()?;
        Ok(self.yield_response)
    }

    fn service_name(&self) -> &str {
        "stub service"
    }
}
