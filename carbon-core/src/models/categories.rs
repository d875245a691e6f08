use serde::{Deserialize, Serialize};

use crate::SequestrationError;

/// Species categories available in the built-in species table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesId {
    TeakModerate,
    EucalyptusFast,
    NativeMixedSlow,
    PineModerate,
    AcaciaFast,
    MangroveSlow,
}

impl SpeciesId {
    pub const ALL: [SpeciesId; 6] = [
        Self::TeakModerate,
        Self::EucalyptusFast,
        Self::NativeMixedSlow,
        Self::PineModerate,
        Self::AcaciaFast,
        Self::MangroveSlow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeakModerate => "teak_moderate",
            Self::EucalyptusFast => "eucalyptus_fast",
            Self::NativeMixedSlow => "native_mixed_slow",
            Self::PineModerate => "pine_moderate",
            Self::AcaciaFast => "acacia_fast",
            Self::MangroveSlow => "mangrove_slow",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|id| id.as_str() == wanted)
    }
}

/// Site quality class of the planting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteQuality {
    Low,
    Medium,
    High,
}

/// Average rainfall class of the planting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rainfall {
    Low,
    Medium,
    High,
}

/// Dominant soil type of the planting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    Loam,
    Clay,
    Alluvial,
    Laterite,
    Degraded,
}

impl SiteQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Rainfall {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandy => "sandy",
            Self::Loam => "loam",
            Self::Clay => "clay",
            Self::Alluvial => "alluvial",
            Self::Laterite => "laterite",
            Self::Degraded => "degraded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandy" => Some(Self::Sandy),
            "loam" => Some(Self::Loam),
            "clay" => Some(Self::Clay),
            "alluvial" => Some(Self::Alluvial),
            "laterite" => Some(Self::Laterite),
            "degraded" => Some(Self::Degraded),
            _ => None,
        }
    }
}

/// Parses a categorical form value, reporting unknown values against `field`.
pub(crate) fn parse_category<T>(
    field: &str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, SequestrationError> {
    parse(value).ok_or_else(|| SequestrationError::unknown(field, value))
}
