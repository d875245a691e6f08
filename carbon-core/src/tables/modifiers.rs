use serde::Serialize;

use crate::models::{Rainfall, SiteQuality, SoilType};

/// Multiplier on the reference increment for a site quality class.
pub fn site_quality_factor(site: SiteQuality) -> f64 {
    match site {
        SiteQuality::Low => 0.75,
        SiteQuality::Medium => 1.0,
        SiteQuality::High => 1.2,
    }
}

/// Multiplier on the reference increment for a rainfall class.
pub fn rainfall_factor(rainfall: Rainfall) -> f64 {
    match rainfall {
        Rainfall::Low => 0.8,
        Rainfall::Medium => 1.0,
        Rainfall::High => 1.15,
    }
}

/// Multiplier on the reference increment for a soil type.
pub fn soil_factor(soil: SoilType) -> f64 {
    match soil {
        SoilType::Sandy => 0.85,
        SoilType::Loam => 1.0,
        SoilType::Clay => 0.9,
        SoilType::Alluvial => 1.1,
        SoilType::Laterite => 0.8,
        SoilType::Degraded => 0.7,
    }
}

/// Site modifiers resolved for one project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModifierSet {
    pub site: f64,
    pub rainfall: f64,
    pub soil: f64,
}

impl ModifierSet {
    pub fn resolve(
        site: SiteQuality,
        rainfall: Rainfall,
        soil: SoilType,
    ) -> Self {
        Self {
            site: site_quality_factor(site),
            rainfall: rainfall_factor(rainfall),
            soil: soil_factor(soil),
        }
    }

    /// Combined multiplier applied to the species increment.
    pub fn product(&self) -> f64 {
        self.site * self.rainfall * self.soil
    }
}
