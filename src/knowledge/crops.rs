//! Local crop knowledge base.
//!
//! Keys are `"{soil}-{season}"`. Only part of the soil × season grid is
//! populated; a missing bucket means "no local data", not an error.

use crate::models::{CropProfile, Season, SoilType, WaterNeed};

struct CropEntry {
    name: &'static str,
    best_season: Season,
    water_need: WaterNeed,
    average_yield: &'static str,
    tip: &'static str,
}

impl CropEntry {
    fn to_profile(&self) -> CropProfile {
        CropProfile {
            name: self.name.to_string(),
            best_season: self.best_season,
            water_need: self.water_need,
            average_yield: self.average_yield.to_string(),
            tip: self.tip.to_string(),
        }
    }
}

// Definition order matters: name searches walk buckets top to bottom.
const CROP_TABLE: &[(&str, &[CropEntry])] = &[
    (
        "alluvial-kharif",
        &[
            CropEntry {
                name: "Rice",
                best_season: Season::Kharif,
                water_need: WaterNeed::High,
                average_yield: "4-5 tons/hectare",
                tip: "Rice thrives in alluvial soils with abundant water supply during monsoon season.",
            },
            CropEntry {
                name: "Cotton",
                best_season: Season::Kharif,
                water_need: WaterNeed::Medium,
                average_yield: "1.5-2 tons/hectare",
                tip: "Cotton requires well-drained alluvial soil and moderate rainfall.",
            },
            CropEntry {
                name: "Sugarcane",
                best_season: Season::Kharif,
                water_need: WaterNeed::High,
                average_yield: "70-80 tons/hectare",
                tip: "Sugarcane grows excellently in fertile alluvial soils with consistent irrigation.",
            },
        ],
    ),
    (
        "alluvial-rabi",
        &[
            CropEntry {
                name: "Wheat",
                best_season: Season::Rabi,
                water_need: WaterNeed::Medium,
                average_yield: "3-4 tons/hectare",
                tip: "Wheat grows well in alluvial soils with moderate irrigation and cool winters.",
            },
            CropEntry {
                name: "Barley",
                best_season: Season::Rabi,
                water_need: WaterNeed::Low,
                average_yield: "2.5-3 tons/hectare",
                tip: "Barley is drought-resistant and suitable for alluvial soils with limited water.",
            },
            CropEntry {
                name: "Mustard",
                best_season: Season::Rabi,
                water_need: WaterNeed::Low,
                average_yield: "1-1.5 tons/hectare",
                tip: "Mustard is ideal for alluvial soils and requires minimal water during growing season.",
            },
        ],
    ),
    (
        "black-kharif",
        &[
            CropEntry {
                name: "Cotton",
                best_season: Season::Kharif,
                water_need: WaterNeed::Medium,
                average_yield: "2-2.5 tons/hectare",
                tip: "Black cotton soil is perfect for cotton cultivation with its water retention properties.",
            },
            CropEntry {
                name: "Soybean",
                best_season: Season::Kharif,
                water_need: WaterNeed::Medium,
                average_yield: "1.5-2 tons/hectare",
                tip: "Soybean grows well in black soil with good drainage and moderate water.",
            },
        ],
    ),
    (
        "black-rabi",
        &[
            CropEntry {
                name: "Wheat",
                best_season: Season::Rabi,
                water_need: WaterNeed::Medium,
                average_yield: "3.5-4.5 tons/hectare",
                tip: "Black soil provides excellent nutrition for wheat with its high water retention.",
            },
            CropEntry {
                name: "Chickpea",
                best_season: Season::Rabi,
                water_need: WaterNeed::Low,
                average_yield: "1.5-2 tons/hectare",
                tip: "Chickpea is well-suited for black soil and requires minimal irrigation.",
            },
        ],
    ),
    (
        "red-kharif",
        &[
            CropEntry {
                name: "Millet",
                best_season: Season::Kharif,
                water_need: WaterNeed::Low,
                average_yield: "1-1.5 tons/hectare",
                tip: "Millet is drought-resistant and grows well in red soil with minimal water needs.",
            },
            CropEntry {
                name: "Groundnut",
                best_season: Season::Kharif,
                water_need: WaterNeed::Medium,
                average_yield: "2-2.5 tons/hectare",
                tip: "Groundnut thrives in well-drained red soil with moderate rainfall.",
            },
        ],
    ),
    (
        "red-rabi",
        &[CropEntry {
            name: "Ragi",
            best_season: Season::Rabi,
            water_need: WaterNeed::Low,
            average_yield: "1.5-2 tons/hectare",
            tip: "Ragi is highly nutritious and grows well in red soil with minimal water requirements.",
        }],
    ),
];

pub fn bucket_key(soil: SoilType, season: Season) -> String {
    format!("{}-{}", soil.key(), season.key())
}

/// Read-only view over the crop table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn new() -> Self {
        Self
    }

    /// Pre-authored candidates for a soil and season, in table order.
    /// Empty when the combination has no entry.
    pub fn lookup(&self, soil: SoilType, season: Season) -> Vec<CropProfile> {
        let key = bucket_key(soil, season);
        let crops = self.lookup_key(&key);
        tracing::debug!(bucket = %key, count = crops.len(), "Knowledge base lookup");
        crops
    }

    pub fn lookup_key(&self, key: &str) -> Vec<CropProfile> {
        CROP_TABLE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, entries)| entries.iter().map(CropEntry::to_profile).collect())
            .unwrap_or_default()
    }

    /// First profile whose name matches case-insensitively, searching buckets
    /// in definition order. A crop listed under several buckets resolves to
    /// the earliest one.
    pub fn find_by_name(&self, name: &str) -> Option<CropProfile> {
        let wanted = name.trim().to_lowercase();
        CROP_TABLE
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .find(|entry| entry.name.to_lowercase() == wanted)
            .map(CropEntry::to_profile)
    }

    pub fn bucket_keys(&self) -> Vec<&'static str> {
        CROP_TABLE.iter().map(|(k, _)| *k).collect()
    }

    pub fn has_bucket(&self, soil: SoilType, season: Season) -> bool {
        let key = bucket_key(soil, season);
        CROP_TABLE.iter().any(|(k, _)| *k == key)
    }
}
