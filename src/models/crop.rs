use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Desert,
    Mountain,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Desert,
        SoilType::Mountain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "Alluvial Soil",
            SoilType::Black => "Black Soil (Regur)",
            SoilType::Red => "Red Soil",
            SoilType::Laterite => "Laterite Soil",
            SoilType::Desert => "Desert Soil",
            SoilType::Mountain => "Mountain Soil",
        }
    }

    /// Lower-case token used in table keys and on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            SoilType::Alluvial => "alluvial",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Laterite => "laterite",
            SoilType::Desert => "desert",
            SoilType::Mountain => "mountain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alluvial" | "alluvial soil" => Some(SoilType::Alluvial),
            "black" | "black soil" | "regur" => Some(SoilType::Black),
            "red" | "red soil" => Some(SoilType::Red),
            "laterite" | "laterite soil" => Some(SoilType::Laterite),
            "desert" | "desert soil" | "arid sandy" => Some(SoilType::Desert),
            "mountain" | "mountain soil" => Some(SoilType::Mountain),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Indian cropping seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Monsoon, June - October
    Kharif,
    /// Winter, November - April
    Rabi,
    /// Summer, April - June
    Zaid,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::Kharif, Season::Rabi, Season::Zaid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Zaid => "zaid",
        }
    }

    pub fn months(&self) -> &'static str {
        match self {
            Season::Kharif => "June - October",
            Season::Rabi => "November - April",
            Season::Zaid => "April - June",
        }
    }

    pub fn next(&self) -> Season {
        match self {
            Season::Kharif => Season::Rabi,
            Season::Rabi => Season::Zaid,
            Season::Zaid => Season::Kharif,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" | "monsoon" => Some(Season::Kharif),
            "rabi" | "winter" => Some(Season::Rabi),
            "zaid" | "summer" => Some(Season::Zaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterNeed {
    Low,
    Medium,
    High,
    Variable,
}

impl WaterNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterNeed::Low => "Low",
            WaterNeed::Medium => "Medium",
            WaterNeed::High => "High",
            WaterNeed::Variable => "Variable",
        }
    }
}

impl std::fmt::Display for WaterNeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate crop with its agronomic attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    pub best_season: Season,
    pub water_need: WaterNeed,
    /// Display-only range, e.g. "3-4 tons/hectare"
    pub average_yield: String,
    pub tip: String,
}

impl CropProfile {
    pub const UNKNOWN_YIELD: &'static str = "Varies by conditions";
    pub const GENERIC_TIP: &'static str =
        "Contact your local agricultural extension for specific guidance.";

    /// Minimal profile for a crop the knowledge base has never heard of.
    pub fn synthesized(name: impl Into<String>, season: Season) -> Self {
        Self {
            name: name.into(),
            best_season: season,
            water_need: WaterNeed::Variable,
            average_yield: Self::UNKNOWN_YIELD.to_string(),
            tip: Self::GENERIC_TIP.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_type_from_str_valid() {
        assert_eq!(SoilType::from_str("alluvial"), Some(SoilType::Alluvial));
        assert_eq!(SoilType::from_str("Black"), Some(SoilType::Black));
        assert_eq!(SoilType::from_str("regur"), Some(SoilType::Black));
        assert_eq!(SoilType::from_str(" RED "), Some(SoilType::Red));
        assert_eq!(SoilType::from_str("Mountain Soil"), Some(SoilType::Mountain));
    }

    #[test]
    fn soil_type_from_str_invalid() {
        assert_eq!(SoilType::from_str("loam"), None);
        assert_eq!(SoilType::from_str(""), None);
    }

    #[test]
    fn soil_type_key_round_trip() {
        for soil in SoilType::ALL {
            assert_eq!(SoilType::from_str(soil.key()), Some(soil));
        }
    }

    #[test]
    fn season_from_str() {
        assert_eq!(Season::from_str("kharif"), Some(Season::Kharif));
        assert_eq!(Season::from_str("Rabi"), Some(Season::Rabi));
        assert_eq!(Season::from_str("ZAID"), Some(Season::Zaid));
        assert_eq!(Season::from_str("spring"), None);
    }

    #[test]
    fn season_next_cycles() {
        assert_eq!(Season::Kharif.next(), Season::Rabi);
        assert_eq!(Season::Rabi.next(), Season::Zaid);
        assert_eq!(Season::Zaid.next(), Season::Kharif);
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        assert_eq!(
            serde_json::to_string(&SoilType::Alluvial).unwrap(),
            "\"alluvial\""
        );
        assert_eq!(serde_json::to_string(&Season::Rabi).unwrap(), "\"rabi\"");
    }

    #[test]
    fn synthesized_profile_defaults() {
        let profile = CropProfile::synthesized("Quinoa", Season::Zaid);
        assert_eq!(profile.name, "Quinoa");
        assert_eq!(profile.best_season, Season::Zaid);
        assert_eq!(profile.water_need, WaterNeed::Variable);
        assert_eq!(profile.average_yield, "Varies by conditions");
        assert!(!profile.tip.is_empty());
    }
}
