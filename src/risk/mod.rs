//! Risk scoring - worst-case RPN computation and threshold banding

pub mod bands;
pub mod rpn;

pub use bands::{classify, continuity_findings, default_bands, resolve_color, BandMatch, RiskBand};
pub use rpn::{worst_case, RiskSummary};

use serde::{Deserialize, Serialize};

/// Scoring scale for severity/occurrence/detection ratings.
///
/// Scores are integers in [1, max]. The scale is fixed per project; all
/// ratings within a project use the same bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ScoringScale {
    #[default]
    OneToTen,
    OneToFive,
}

impl ScoringScale {
    /// Highest rating on this scale
    pub fn max(&self) -> u8 {
        match self {
            ScoringScale::OneToTen => 10,
            ScoringScale::OneToFive => 5,
        }
    }

    /// Worst-case detection score: "cannot detect"
    ///
    /// Used when a failure mode has no controls. The default is deliberately
    /// the least favorable value so unmitigated risk never reads low.
    pub fn worst_detection(&self) -> u8 {
        self.max()
    }

    /// Highest possible RPN on this scale (max severity x occurrence x detection)
    pub fn max_rpn(&self) -> u16 {
        let m = self.max() as u16;
        m * m * m
    }

    /// Check a rating against the scale bounds
    pub fn contains(&self, score: u8) -> bool {
        (1..=self.max()).contains(&score)
    }
}

impl std::fmt::Display for ScoringScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringScale::OneToTen => write!(f, "1-10"),
            ScoringScale::OneToFive => write!(f, "1-5"),
        }
    }
}

impl std::str::FromStr for ScoringScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1-10" | "one_to_ten" | "10" => Ok(ScoringScale::OneToTen),
            "1-5" | "one_to_five" | "5" => Ok(ScoringScale::OneToFive),
            _ => Err(format!("Unknown scale: {}. Use 1-10 or 1-5", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_bounds() {
        assert_eq!(ScoringScale::OneToTen.max(), 10);
        assert_eq!(ScoringScale::OneToFive.max(), 5);
        assert_eq!(ScoringScale::OneToTen.max_rpn(), 1000);
        assert_eq!(ScoringScale::OneToFive.max_rpn(), 125);
    }

    #[test]
    fn test_scale_contains() {
        assert!(ScoringScale::OneToTen.contains(1));
        assert!(ScoringScale::OneToTen.contains(10));
        assert!(!ScoringScale::OneToTen.contains(0));
        assert!(!ScoringScale::OneToTen.contains(11));
        assert!(!ScoringScale::OneToFive.contains(6));
    }

    #[test]
    fn test_worst_detection_is_scale_max() {
        assert_eq!(ScoringScale::OneToTen.worst_detection(), 10);
        assert_eq!(ScoringScale::OneToFive.worst_detection(), 5);
    }

    #[test]
    fn test_scale_from_str() {
        assert_eq!("1-10".parse::<ScoringScale>().unwrap(), ScoringScale::OneToTen);
        assert_eq!("1-5".parse::<ScoringScale>().unwrap(), ScoringScale::OneToFive);
        assert!("1-7".parse::<ScoringScale>().is_err());
    }
}
