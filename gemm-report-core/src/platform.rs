//! Hardware platforms and tuning states covered by the report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Benchmarked hardware platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// StarFive VisionFive 2 (RISC-V, IMG BXE-4-32 GPU)
    StarFive,
    /// Banana Pi BPI-F3 (RISC-V, SpacemiT K1)
    BananaPi,
    /// Intel Iris Xe integrated graphics
    IntelXe,
}

impl Platform {
    /// Panel order used by every multi-platform chart and the summary
    pub const ALL: [Self; 3] = [Self::StarFive, Self::BananaPi, Self::IntelXe];

    /// Full board name used for chart titles and the summary
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::StarFive => "StarFive VisionFive 2",
            Self::BananaPi => "Banana Pi BPI-F3",
            Self::IntelXe => "Intel Iris Xe",
        }
    }

    /// Compact label for category axes
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::StarFive => "StarFive",
            Self::BananaPi => "Banana Pi",
            Self::IntelXe => "Intel Xe",
        }
    }

    /// Stable machine key, matching the serde representation
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StarFive => "star_five",
            Self::BananaPi => "banana_pi",
            Self::IntelXe => "intel_xe",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a platform key is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform '{0}' (expected one of: star_five, banana_pi, intel_xe)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "star_five" | "starfive" => Ok(Self::StarFive),
            "banana_pi" | "bananapi" => Ok(Self::BananaPi),
            "intel_xe" | "intelxe" | "intel" => Ok(Self::IntelXe),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

/// Whether a measurement was taken before or after CLBlast tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tuning {
    /// Default CLBlast kernel parameters
    Before,
    /// Parameters produced by the tuner
    After,
}

impl Tuning {
    /// Legend label shared by all charts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Before => "Before tuning",
            Self::After => "After tuning",
        }
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_keys_and_aliases() {
        assert_eq!("star_five".parse::<Platform>(), Ok(Platform::StarFive));
        assert_eq!("StarFive".parse::<Platform>(), Ok(Platform::StarFive));
        assert_eq!("banana-pi".parse::<Platform>(), Ok(Platform::BananaPi));
        assert_eq!("intel".parse::<Platform>(), Ok(Platform::IntelXe));
        assert!("jetson".parse::<Platform>().is_err());
    }

    #[test]
    fn key_round_trips_through_from_str() {
        for platform in Platform::ALL {
            assert_eq!(platform.key().parse::<Platform>(), Ok(platform));
        }
    }
}
