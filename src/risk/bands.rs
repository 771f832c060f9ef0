//! Threshold banding - classify an RPN into a labeled, colored risk category

use serde::{Deserialize, Serialize};

use crate::risk::ScoringScale;

/// Label returned when an RPN falls outside every configured band
pub const FALLBACK_LABEL: &str = "Unknown";

/// Neutral gray used for the fallback band and unrecognized color names
pub const NEUTRAL_GRAY: &str = "#9e9e9e";

/// One threshold band: inclusive [min, max] range with a label and color.
///
/// Bands are ordered; the first matching band wins. Continuity and
/// non-overlap are the band editor's concern, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskBand {
    pub label: String,
    pub min: u16,
    pub max: u16,
    /// Symbolic name ("red") or literal hex ("#c62828")
    pub color: String,
}

impl RiskBand {
    pub fn new(label: &str, min: u16, max: u16, color: &str) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
            color: color.to_string(),
        }
    }

    /// Inclusive range check
    pub fn contains(&self, rpn: u16) -> bool {
        (self.min..=self.max).contains(&rpn)
    }
}

/// The band a value classified into
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandMatch {
    pub label: String,
    /// Always a hex color string
    pub color: String,
}

/// Classify an RPN against an ordered band list.
///
/// Returns the first band whose inclusive range contains the value, with its
/// color resolved to hex. Values outside every band (including 0, meaning
/// "risk not computable") get the fallback label and neutral gray. Total
/// function - never fails.
pub fn classify(rpn: u16, bands: &[RiskBand]) -> BandMatch {
    for band in bands {
        if band.contains(rpn) {
            return BandMatch {
                label: band.label.clone(),
                color: resolve_color(&band.color),
            };
        }
    }

    BandMatch {
        label: FALLBACK_LABEL.to_string(),
        color: NEUTRAL_GRAY.to_string(),
    }
}

/// Resolve a color to hex: literal `#...` strings pass through unchanged,
/// symbolic names go through a fixed table, anything else is neutral gray.
pub fn resolve_color(color: &str) -> String {
    if color.starts_with('#') {
        return color.to_string();
    }

    match color.to_lowercase().as_str() {
        "green" => "#2e7d32",
        "yellow" => "#f9a825",
        "orange" => "#ef6c00",
        "red" => "#c62828",
        "blue" => "#1565c0",
        "purple" => "#6a1b9a",
        "gray" | "grey" => NEUTRAL_GRAY,
        _ => NEUTRAL_GRAY,
    }
    .to_string()
}

/// Platform default band set for a scoring scale
pub fn default_bands(scale: ScoringScale) -> Vec<RiskBand> {
    match scale {
        ScoringScale::OneToTen => vec![
            RiskBand::new("Low", 1, 69, "green"),
            RiskBand::new("Medium", 70, 99, "yellow"),
            RiskBand::new("High", 100, 150, "orange"),
            RiskBand::new("Critical", 151, 1000, "red"),
        ],
        ScoringScale::OneToFive => vec![
            RiskBand::new("Low", 1, 19, "green"),
            RiskBand::new("Medium", 20, 44, "yellow"),
            RiskBand::new("High", 45, 79, "orange"),
            RiskBand::new("Critical", 80, 125, "red"),
        ],
    }
}

/// Check a band list for gaps or overlaps across the scale's scoring range.
///
/// Returns human-readable findings for the band editor to surface as
/// warnings. An empty result means the list is contiguous and covers
/// [1, max_rpn].
pub fn continuity_findings(bands: &[RiskBand], scale: ScoringScale) -> Vec<String> {
    let mut findings = Vec::new();

    if bands.is_empty() {
        findings.push("no bands configured".to_string());
        return findings;
    }

    let mut sorted: Vec<&RiskBand> = bands.iter().collect();
    sorted.sort_by_key(|b| b.min);

    if sorted[0].min > 1 {
        findings.push(format!("values 1-{} are unbanded", sorted[0].min - 1));
    }

    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b.min > a.max + 1 {
            findings.push(format!(
                "gap between '{}' (max {}) and '{}' (min {})",
                a.label, a.max, b.label, b.min
            ));
        } else if b.min <= a.max {
            findings.push(format!(
                "'{}' and '{}' overlap ({}-{})",
                a.label,
                b.label,
                b.min,
                a.max.min(b.max)
            ));
        }
    }

    if let Some(top) = sorted.last() {
        if top.max < scale.max_rpn() {
            findings.push(format!(
                "values {}-{} are unbanded",
                top.max + 1,
                scale.max_rpn()
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_first_matching_band() {
        let bands = default_bands(ScoringScale::OneToTen);
        assert_eq!(classify(1, &bands).label, "Low");
        assert_eq!(classify(69, &bands).label, "Low");
        assert_eq!(classify(70, &bands).label, "Medium");
        assert_eq!(classify(99, &bands).label, "Medium");
        assert_eq!(classify(100, &bands).label, "High");
        assert_eq!(classify(150, &bands).label, "High");
        assert_eq!(classify(151, &bands).label, "Critical");
        assert_eq!(classify(1000, &bands).label, "Critical");
    }

    #[test]
    fn test_classify_rpn_224_is_critical() {
        let bands = default_bands(ScoringScale::OneToTen);
        let m = classify(224, &bands);
        assert_eq!(m.label, "Critical");
        assert_eq!(m.color, "#c62828");
    }

    #[test]
    fn test_classify_out_of_range_falls_back() {
        let bands = default_bands(ScoringScale::OneToTen);
        let m = classify(0, &bands);
        assert_eq!(m.label, FALLBACK_LABEL);
        assert_eq!(m.color, NEUTRAL_GRAY);
    }

    #[test]
    fn test_classify_empty_band_list_falls_back() {
        let m = classify(500, &[]);
        assert_eq!(m.label, FALLBACK_LABEL);
    }

    #[test]
    fn test_resolve_symbolic_colors() {
        assert_eq!(resolve_color("green"), "#2e7d32");
        assert_eq!(resolve_color("RED"), "#c62828");
        assert_eq!(resolve_color("grey"), NEUTRAL_GRAY);
    }

    #[test]
    fn test_resolve_hex_passthrough() {
        assert_eq!(resolve_color("#abcdef"), "#abcdef");
    }

    #[test]
    fn test_resolve_unknown_name_is_gray() {
        assert_eq!(resolve_color("chartreuse"), NEUTRAL_GRAY);
    }

    #[test]
    fn test_default_bands_are_contiguous() {
        assert!(continuity_findings(&default_bands(ScoringScale::OneToTen), ScoringScale::OneToTen)
            .is_empty());
        assert!(
            continuity_findings(&default_bands(ScoringScale::OneToFive), ScoringScale::OneToFive)
                .is_empty()
        );
    }

    #[test]
    fn test_continuity_detects_gap() {
        let bands = vec![
            RiskBand::new("Low", 1, 50, "green"),
            RiskBand::new("High", 60, 1000, "red"),
        ];
        let findings = continuity_findings(&bands, ScoringScale::OneToTen);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("gap"));
    }

    #[test]
    fn test_continuity_detects_overlap_and_uncovered_top() {
        let bands = vec![
            RiskBand::new("Low", 1, 100, "green"),
            RiskBand::new("High", 80, 900, "red"),
        ];
        let findings = continuity_findings(&bands, ScoringScale::OneToTen);
        assert!(findings.iter().any(|f| f.contains("overlap")));
        assert!(findings.iter().any(|f| f.contains("901-1000")));
    }
}
