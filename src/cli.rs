use crate::error::{CropWiseError, Result};
use crate::models::{
    AgronomicReadings, RecommendationRequest, RotationRequest, Season, SoilType,
    YieldPredictionInput,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropwise",
    version,
    about = "Crop recommendations, rotation plans and yield estimates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest crops for a soil type and season
    Recommend(RecommendArgs),
    /// Plan a crop rotation
    Rotate(RotateArgs),
    /// Estimate yield for a crop, season and state
    Yield(YieldArgs),
    /// Validate config and test the prediction service
    Check,
    /// Run interactive setup
    Init,
}

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    /// alluvial, black, red, laterite, desert or mountain
    #[arg(long)]
    pub soil: Option<String>,
    /// kharif, rabi or zaid
    #[arg(long)]
    pub season: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub temperature: Option<f64>,
    #[arg(long)]
    pub humidity: Option<f64>,
    #[arg(long)]
    pub rainfall: Option<f64>,
    #[arg(long)]
    pub ph: Option<f64>,
    #[arg(long)]
    pub nitrogen: Option<f64>,
    #[arg(long)]
    pub phosphorous: Option<f64>,
    #[arg(long)]
    pub potassium: Option<f64>,
    #[arg(long)]
    pub carbon: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub struct RotateArgs {
    /// Last crop grown
    #[arg(long)]
    pub crop1: Option<String>,
    #[arg(long)]
    pub soil: Option<String>,
    #[arg(long)]
    pub crop2: Option<String>,
    #[arg(long)]
    pub crop3: Option<String>,
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub start_season: Option<String>,
    /// Number of seasons to lay out
    #[arg(long)]
    pub seasons: Option<u32>,
    /// Use the built-in rotation rules instead of the service
    #[arg(long)]
    pub offline: bool,
}

#[derive(Args, Debug, Default)]
pub struct YieldArgs {
    #[arg(long)]
    pub crop: Option<String>,
    #[arg(long)]
    pub season: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    /// Land area in hectares
    #[arg(long)]
    pub area: Option<f64>,
    /// Also ask the service for its own figure (shown separately)
    #[arg(long)]
    pub remote_reference: bool,
}

fn parse_soil(value: Option<&str>) -> Result<Option<SoilType>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => SoilType::from_str(v)
            .map(Some)
            .ok_or_else(|| CropWiseError::Validation(format!("Unknown soil type '{}'", v))),
    }
}

fn parse_season(value: Option<&str>) -> Result<Option<Season>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Season::from_str(v)
            .map(Some)
            .ok_or_else(|| CropWiseError::Validation(format!("Unknown season '{}'", v))),
    }
}

impl RecommendArgs {
    pub fn to_request(&self) -> Result<RecommendationRequest> {
        let request = RecommendationRequest {
            soil_type: parse_soil(self.soil.as_deref())?,
            season: parse_season(self.season.as_deref())?,
            location: None,
            readings: AgronomicReadings {
                temperature: self.temperature,
                humidity: self.humidity,
                rainfall: self.rainfall,
                ph: self.ph,
                nitrogen: self.nitrogen,
                phosphorous: self.phosphorous,
                potassium: self.potassium,
                carbon: self.carbon,
            },
        };
        Ok(match self.location {
            Some(ref location) => request.with_location(location.as_str()),
            None => request,
        })
    }
}

impl RotateArgs {
    pub fn to_request(&self) -> Result<RotationRequest> {
        let mut request = RotationRequest {
            crop1: self.crop1.clone().unwrap_or_default(),
            soil_type: parse_soil(self.soil.as_deref())?,
            start_season: parse_season(self.start_season.as_deref())?,
            number_of_seasons: self.seasons,
            ..Default::default()
        };
        if let Some(ref crop) = self.crop2 {
            request = request.with_crop2(crop.as_str());
        }
        if let Some(ref crop) = self.crop3 {
            request = request.with_crop3(crop.as_str());
        }
        if let Some(ref region) = self.region {
            request = request.with_region(region.as_str());
        }
        Ok(request)
    }
}

impl YieldArgs {
    pub fn to_input(&self) -> YieldPredictionInput {
        YieldPredictionInput {
            crop: self.crop.clone().unwrap_or_default(),
            season: self.season.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            area_hectares: self.area,
        }
    }
}
