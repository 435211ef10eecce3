use crate::models::{RotationPath, RotationPlan, RotationStep, SoilType};

struct StepEntry {
    crop: &'static str,
    benefit: &'static str,
    icon: &'static str,
}

struct RuleEntry {
    steps: [StepEntry; 4],
    soil_health_note: &'static str,
    nitrogen_balance: &'static str,
    pest_reduction: &'static str,
}

impl RuleEntry {
    fn to_plan(&self) -> RotationPlan {
        RotationPlan {
            steps: self
                .steps
                .iter()
                .enumerate()
                .map(|(i, s)| RotationStep::new(i as u32 + 1, s.crop, s.benefit, s.icon))
                .collect(),
            soil_health_note: self.soil_health_note.to_string(),
            nitrogen_balance: self.nitrogen_balance.to_string(),
            pest_reduction: self.pest_reduction.to_string(),
            path: RotationPath::RuleSet,
            season_sequence: Vec::new(),
            prediction: None,
        }
    }
}

const fn step(crop: &'static str, benefit: &'static str, icon: &'static str) -> StepEntry {
    StepEntry {
        crop,
        benefit,
        icon,
    }
}

const RULES: &[(&str, RuleEntry)] = &[
    (
        "wheat-alluvial",
        RuleEntry {
            steps: [
                step("Chickpea", "Nitrogen fixation", "🟤"),
                step("Wheat", "High yield with nitrogen", "🌾"),
                step("Maize", "Deep root system", "🌽"),
                step("Mustard", "Pest control & oil", "🌻"),
            ],
            soil_health_note: "This rotation improves nitrogen balance through legumes and reduces pest risk with diverse crops.",
            nitrogen_balance: "Excellent - Chickpea adds 40-60 kg N/ha",
            pest_reduction: "High - Diverse crops break pest cycles",
        },
    ),
    (
        "rice-alluvial",
        RuleEntry {
            steps: [
                step("Wheat", "Winter crop utilization", "🌾"),
                step("Chickpea", "Nitrogen fixation", "🟤"),
                step("Rice", "Water utilization", "🌾"),
                step("Mustard", "Soil conditioning", "🌻"),
            ],
            soil_health_note: "Rice-wheat system with legume break improves soil structure and nutrient cycling.",
            nitrogen_balance: "Good - Balanced N cycling",
            pest_reduction: "Medium - Regular crop diversity",
        },
    ),
    (
        "cotton-black",
        RuleEntry {
            steps: [
                step("Soybean", "Nitrogen enrichment", "🫘"),
                step("Cotton", "Cash crop income", "🤍"),
                step("Wheat", "Cereal nutrition", "🌾"),
                step("Chickpea", "Nitrogen addition", "🟤"),
            ],
            soil_health_note: "This plan maintains black soil fertility while maximizing cotton productivity and soil health.",
            nitrogen_balance: "Very Good - Multiple legumes",
            pest_reduction: "High - Cotton pest cycle broken",
        },
    ),
];

const DEFAULT_RULE: RuleEntry = RuleEntry {
    steps: [
        step("Wheat", "Stable cereal base", "🌾"),
        step("Chickpea", "Nitrogen fixation", "🟤"),
        step("Maize", "High biomass", "🌽"),
        step("Mustard", "Pest deterrent", "🌻"),
    ],
    soil_health_note: "This balanced rotation improves nitrogen balance and reduces pest risk through crop diversity.",
    nitrogen_balance: "Good - Legume inclusion",
    pest_reduction: "Medium-High - Crop diversity",
};

pub fn rule_key(previous_crop: &str, soil: SoilType) -> String {
    format!("{}-{}", previous_crop.trim().to_lowercase(), soil.key())
}

/// Pre-authored four-year rotations keyed by previous crop and soil.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationRuleSet;

impl RotationRuleSet {
    pub fn new() -> Self {
        Self
    }

    /// Exact rule for the pair, if one was authored.
    pub fn get(&self, previous_crop: &str, soil: SoilType) -> Option<RotationPlan> {
        let key = rule_key(previous_crop, soil);
        RULES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, rule)| rule.to_plan())
    }

    /// Rule for the pair, or the default plan. Never empty.
    pub fn plan_for(&self, previous_crop: &str, soil: SoilType) -> RotationPlan {
        match self.get(previous_crop, soil) {
            Some(plan) => plan,
            None => {
                tracing::debug!(
                    key = %rule_key(previous_crop, soil),
                    "No rotation rule, using default plan"
                );
                self.default_plan()
            }
        }
    }

    pub fn default_plan(&self) -> RotationPlan {
        DEFAULT_RULE.to_plan()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        RULES.iter().map(|(k, _)| *k).collect()
    }
}
