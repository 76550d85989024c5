//! Latitude-band climate model.
//!
//! Seven contiguous bands cover the full latitude range; each carries a
//! survival multiplier applied whenever a bird's survival chance is
//! (re)computed. The temperate band is the optimal breeding ground.

use serde::Serialize;

/// A latitude band with its survival multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClimateZone {
    /// Display name
    pub name: &'static str,
    /// Inclusive lower latitude bound (degrees)
    pub min_latitude: f32,
    /// Survival multiplier in [0.5, 1.0]
    pub survival_modifier: f32,
}

/// Bands ordered north to south; a latitude belongs to the first band whose
/// lower bound it reaches, so every bound is inclusive below and exclusive
/// above (the Arctic band closes the domain at 90).
pub const ZONES: [ClimateZone; 7] = [
    ClimateZone { name: "Arctic", min_latitude: 66.5, survival_modifier: 0.55 },
    ClimateZone { name: "Subarctic", min_latitude: 50.0, survival_modifier: 0.75 },
    ClimateZone { name: "Temperate", min_latitude: 35.0, survival_modifier: 1.0 },
    ClimateZone { name: "Subtropical", min_latitude: 23.5, survival_modifier: 0.9 },
    ClimateZone { name: "Tropical", min_latitude: -23.5, survival_modifier: 0.7 },
    ClimateZone { name: "Southern Temperate", min_latitude: -60.0, survival_modifier: 0.85 },
    ClimateZone { name: "Antarctic", min_latitude: -90.0, survival_modifier: 0.5 },
];

/// Fallback for inputs outside [-90, 90].
const DEFAULT_ZONE: ClimateZone =
    ClimateZone { name: "Temperate", min_latitude: 35.0, survival_modifier: 1.0 };

/// Resolve the climate zone for a latitude.
///
/// Linear scan returning the first matching band; out-of-range input falls
/// back to the temperate zone.
pub fn zone_for(latitude: f32) -> &'static ClimateZone {
    for zone in &ZONES {
        if latitude >= zone.min_latitude {
            return zone;
        }
    }
    &DEFAULT_ZONE
}

/// Survival multiplier for a latitude.
pub fn survival_modifier(latitude: f32) -> f32 {
    zone_for(latitude).survival_modifier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_domain_covered() {
        // Every latitude in [-90, 90] resolves to exactly one band.
        let mut lat = -90.0f32;
        while lat <= 90.0 {
            let zone = zone_for(lat);
            assert!(ZONES.iter().any(|z| z.name == zone.name), "no zone at {}", lat);
            assert!((0.5..=1.0).contains(&zone.survival_modifier));
            lat += 0.25;
        }
    }

    #[test]
    fn test_band_boundaries() {
        // Bounds are inclusive below: 50 is Subarctic, just under is Temperate.
        assert_eq!(zone_for(50.0).name, "Subarctic");
        assert_eq!(zone_for(49.999).name, "Temperate");
        assert_eq!(zone_for(66.5).name, "Arctic");
        assert_eq!(zone_for(35.0).name, "Temperate");
        assert_eq!(zone_for(23.5).name, "Subtropical");
        assert_eq!(zone_for(-23.5).name, "Tropical");
        assert_eq!(zone_for(-23.501).name, "Southern Temperate");
        assert_eq!(zone_for(-60.0).name, "Southern Temperate");
        assert_eq!(zone_for(-60.001).name, "Antarctic");
        assert_eq!(zone_for(90.0).name, "Arctic");
        assert_eq!(zone_for(-90.0).name, "Antarctic");
    }

    #[test]
    fn test_optimal_band_is_temperate() {
        assert_eq!(survival_modifier(45.0), 1.0);
        assert!(survival_modifier(70.0) < 1.0);
        assert!(survival_modifier(0.0) < 1.0);
    }

    #[test]
    fn test_out_of_range_falls_back_to_temperate() {
        assert_eq!(zone_for(-120.0).name, "Temperate");
        assert_eq!(zone_for(f32::NAN).name, "Temperate");
    }
}
