//! Plain-text rendering of results for the terminal.

use crate::models::{
    format_metric, Availability, RecommendationResult, RotationPlan, YieldPredictionResult,
};
use std::fmt::Write;

pub fn recommendations(result: &RecommendationResult) -> String {
    let mut out = String::new();

    if let Some(ref notice) = result.notice {
        let _ = writeln!(out, "! {}", notice);
        let _ = writeln!(out);
    }

    match result.availability() {
        Availability::NoDataAvailable => {
            let _ = writeln!(out, "No Recommendations Available");
            let _ = writeln!(
                out,
                "No crops match this soil type and season. Try a different combination."
            );
            return out;
        }
        Availability::ServiceUnavailable => {
            let _ = writeln!(out, "No Recommendations Available");
            let _ = writeln!(
                out,
                "The recommendation service is down and no offline data exists for this combination."
            );
            return out;
        }
        Availability::Available | Availability::Degraded => {}
    }

    let _ = writeln!(out, "Recommended crops ({})", result.source);
    for (i, crop) in result.crops.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {}", i + 1, crop.name);
        let _ = writeln!(out, "   Best season:   {}", crop.best_season);
        let _ = writeln!(out, "   Water needs:   {}", crop.water_need);
        let _ = writeln!(out, "   Average yield: {}", crop.average_yield);
        let _ = writeln!(out, "   Tip: {}", crop.tip);
    }
    out
}

pub fn rotation(plan: &RotationPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rotation plan ({})", plan.path);

    for step in &plan.steps {
        let season = (step.year as usize)
            .checked_sub(1)
            .and_then(|i| plan.season_sequence.get(i))
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  Year {}{}: {} {} - {}",
            step.year, season, step.icon, step.crop, step.benefit
        );
    }

    if plan.season_sequence.len() > plan.steps.len() {
        let seasons: Vec<&str> = plan.season_sequence.iter().map(|s| s.as_str()).collect();
        let _ = writeln!(out, "  Season cycle: {}", seasons.join(" -> "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Soil health:      {}", plan.soil_health_note);
    let _ = writeln!(out, "Nitrogen balance: {}", plan.nitrogen_balance);
    let _ = writeln!(out, "Pest reduction:   {}", plan.pest_reduction);
    out
}

pub fn yield_estimate(result: &YieldPredictionResult, remote_reference: Option<Option<f64>>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Predicted yield: {:.2} tons/hectare", result.predicted_yield);
    let _ = writeln!(
        out,
        "Confidence:      {}% ({})",
        result.confidence,
        result.confidence_band()
    );
    if let Some(total) = result.total_production_tons {
        let _ = writeln!(out, "Total production: {:.2} tons", total);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Factor impact analysis");
    let _ = writeln!(out, "  Soil fertility: {}%", result.factors.soil_impact);
    let _ = writeln!(out, "  Rainfall:       {}%", result.factors.rainfall_impact);
    let _ = writeln!(out, "  Temperature:    {}%", result.factors.temperature_impact);

    if let Some(reference) = remote_reference {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Service reference (not used above): {}",
            format_metric(reference, "tons/hectare")
        );
    }
    out
}
