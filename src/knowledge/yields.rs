/// Base yields, tons/hectare
const BASE_YIELDS: &[(&str, f64)] = &[
    ("wheat", 3.5),
    ("rice", 4.0),
    ("corn", 5.2),
    ("cotton", 1.8),
    ("soybean", 2.1),
    ("sugarcane", 75.0),
    ("barley", 2.8),
    ("millet", 1.5),
];

const SEASON_MULTIPLIERS: &[(&str, f64)] = &[
    ("kharif", 1.2), // monsoon crops do well
    ("rabi", 1.0),
    ("zaid", 0.8), // summer heat
];

/// State-wise agricultural efficiency
const REGION_MULTIPLIERS: &[(&str, f64)] = &[
    ("punjab", 1.3),
    ("haryana", 1.2),
    ("uttar_pradesh", 1.1),
    ("bihar", 0.9),
    ("madhya_pradesh", 1.0),
    ("gujarat", 1.1),
    ("maharashtra", 1.0),
    ("karnataka", 0.9),
    ("andhra_pradesh", 1.1),
    ("rajasthan", 0.8),
];

pub const DEFAULT_BASE_YIELD: f64 = 3.0;
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

pub const CROP_KNOWN_CONFIDENCE: u32 = 90;
pub const SEASON_KNOWN_CONFIDENCE: u32 = 85;
pub const REGION_KNOWN_CONFIDENCE: u32 = 85;
pub const UNKNOWN_CONFIDENCE: u32 = 70;
/// Hard ceiling, not a statistical bound
pub const CONFIDENCE_CAP: u8 = 95;

fn find(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// One table lookup: the value used and whether the key was present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup {
    pub value: f64,
    pub known: bool,
}

impl Lookup {
    fn resolve(found: Option<f64>, default: f64) -> Self {
        match found {
            Some(value) => Self { value, known: true },
            None => Self {
                value: default,
                known: false,
            },
        }
    }
}

/// Static per-crop, per-season and per-region scoring tables.
///
/// Keys are lower-case; states use underscores (`uttar_pradesh`).
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldScoringModel;

impl YieldScoringModel {
    pub fn new() -> Self {
        Self
    }

    pub fn base_yield(&self, crop: &str) -> Lookup {
        Lookup::resolve(find(BASE_YIELDS, crop), DEFAULT_BASE_YIELD)
    }

    pub fn season_multiplier(&self, season: &str) -> Lookup {
        Lookup::resolve(find(SEASON_MULTIPLIERS, season), DEFAULT_MULTIPLIER)
    }

    pub fn region_multiplier(&self, state: &str) -> Lookup {
        Lookup::resolve(find(REGION_MULTIPLIERS, state), DEFAULT_MULTIPLIER)
    }

    /// Average of the per-table scores, rounded, then capped.
    pub fn blend_confidence(&self, crop: Lookup, season: Lookup, region: Lookup) -> u8 {
        let score = |l: Lookup, known: u32| if l.known { known } else { UNKNOWN_CONFIDENCE };
        let total = score(crop, CROP_KNOWN_CONFIDENCE)
            + score(season, SEASON_KNOWN_CONFIDENCE)
            + score(region, REGION_KNOWN_CONFIDENCE);
        let average = (total as f64 / 3.0).round() as u8;
        average.min(CONFIDENCE_CAP)
    }

    pub fn known_crops(&self) -> Vec<&'static str> {
        BASE_YIELDS.iter().map(|(k, _)| *k).collect()
    }

    pub fn known_states(&self) -> Vec<&'static str> {
        REGION_MULTIPLIERS.iter().map(|(k, _)| *k).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_lookups() {
        let model = YieldScoringModel::new();
        assert_eq!(model.base_yield("wheat"), Lookup { value: 3.5, known: true });
        assert_eq!(model.season_multiplier("zaid").value, 0.8);
        assert_eq!(model.region_multiplier("rajasthan").value, 0.8);
    }

    #[test]
    fn unknown_lookups_use_defaults() {
        let model = YieldScoringModel::new();
        let crop = model.base_yield("quinoa");
        assert!(!crop.known);
        assert!((crop.value - 3.0).abs() < 0.001);

        let season = model.season_multiplier("spring");
        assert!(!season.known);
        assert!((season.value - 1.0).abs() < 0.001);

        assert!(!model.region_multiplier("kerala").known);
    }

    #[test]
    fn confidence_blend() {
        let model = YieldScoringModel::new();
        let all_known = model.blend_confidence(
            model.base_yield("wheat"),
            model.season_multiplier("kharif"),
            model.region_multiplier("punjab"),
        );
        assert_eq!(all_known, 87);

        let unknown_crop = model.blend_confidence(
            model.base_yield("quinoa"),
            model.season_multiplier("kharif"),
            model.region_multiplier("punjab"),
        );
        assert_eq!(unknown_crop, 80);

        let none_known = model.blend_confidence(
            model.base_yield("quinoa"),
            model.season_multiplier("spring"),
            model.region_multiplier("kerala"),
        );
        assert_eq!(none_known, 70);
    }

    #[test]
    fn confidence_never_exceeds_cap() {
        let model = YieldScoringModel::new();
        let known = Lookup {
            value: 1.0,
            known: true,
        };
        assert!(model.blend_confidence(known, known, known) <= CONFIDENCE_CAP);
    }
}
