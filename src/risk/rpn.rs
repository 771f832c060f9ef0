//! Worst-case RPN computation over a failure mode's causes, effects, and controls

use serde::Serialize;

use crate::entities::{Cause, Control, Effect};
use crate::risk::ScoringScale;

/// Worst-case risk summary for one failure mode.
///
/// `max_rpn == max_severity * max_occurrence * max_detection` always holds;
/// all fields are zero when the failure mode has no causes or no effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub max_rpn: u16,
    pub max_severity: u8,
    pub max_occurrence: u8,
    pub max_detection: u8,
}

impl RiskSummary {
    /// True when risk could not be computed (missing causes or effects)
    pub fn is_zero(&self) -> bool {
        self.max_rpn == 0
    }
}

/// Compute the worst-case risk score for one failure mode.
///
/// Risk needs both a cause and an effect; with either missing the summary is
/// all zeros. The detection score is the minimum detection rating among the
/// attached controls, or the scale's worst value when no controls exist -
/// an unmitigated failure mode is assumed undetectable, never best-case.
///
/// Every cause x effect pair is scored as severity x occurrence x detection
/// and the maximum is kept. Ties keep the first-encountered pair, so the
/// result is deterministic for a given slice order (the store preserves
/// insertion order).
pub fn worst_case(
    causes: &[Cause],
    effects: &[Effect],
    controls: &[Control],
    scale: ScoringScale,
) -> RiskSummary {
    if causes.is_empty() || effects.is_empty() {
        return RiskSummary::default();
    }

    let detection = controls
        .iter()
        .map(|c| c.detection)
        .min()
        .unwrap_or_else(|| scale.worst_detection());

    let mut best = RiskSummary::default();
    for cause in causes {
        for effect in effects {
            let rpn = effect.severity as u16 * cause.occurrence as u16 * detection as u16;
            if rpn > best.max_rpn {
                best = RiskSummary {
                    max_rpn: rpn,
                    max_severity: effect.severity,
                    max_occurrence: cause.occurrence,
                    max_detection: detection,
                };
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};
    use crate::entities::control::ControlType;

    fn fm_id() -> EntityId {
        EntityId::new(EntityPrefix::Fm)
    }

    fn cause(occurrence: u8) -> Cause {
        Cause::new(fm_id(), "cause".to_string(), occurrence)
    }

    fn effect(severity: u8) -> Effect {
        Effect::new(fm_id(), "effect".to_string(), severity)
    }

    fn control(detection: u8) -> Control {
        Control::new(
            fm_id(),
            "control".to_string(),
            ControlType::Detection,
            detection,
            5,
        )
    }

    #[test]
    fn test_no_causes_yields_zero() {
        let summary = worst_case(&[], &[effect(9)], &[control(2)], ScoringScale::OneToTen);
        assert_eq!(summary, RiskSummary::default());
        assert!(summary.is_zero());
    }

    #[test]
    fn test_no_effects_yields_zero() {
        let summary = worst_case(&[cause(9)], &[], &[], ScoringScale::OneToTen);
        assert_eq!(summary.max_rpn, 0);
    }

    #[test]
    fn test_no_controls_defaults_to_worst_detection() {
        let summary = worst_case(&[cause(3)], &[effect(4)], &[], ScoringScale::OneToTen);
        assert_eq!(summary.max_detection, 10);
        assert_eq!(summary.max_rpn, 120); // 4 * 3 * 10
    }

    #[test]
    fn test_no_controls_on_five_point_scale() {
        let summary = worst_case(&[cause(3)], &[effect(4)], &[], ScoringScale::OneToFive);
        assert_eq!(summary.max_detection, 5);
        assert_eq!(summary.max_rpn, 60);
    }

    #[test]
    fn test_detection_is_minimum_across_controls() {
        let summary = worst_case(
            &[cause(5)],
            &[effect(5)],
            &[control(7), control(2), control(9)],
            ScoringScale::OneToTen,
        );
        assert_eq!(summary.max_detection, 2);
        assert_eq!(summary.max_rpn, 50);
    }

    #[test]
    fn test_worst_case_pairing() {
        // Scenario: causes {5, 8}, effects {7, 3}, controls {4, 9}.
        // detection = min(4, 9) = 4; best pair is sev 7 x occ 8 x det 4 = 224.
        let summary = worst_case(
            &[cause(5), cause(8)],
            &[effect(7), effect(3)],
            &[control(4), control(9)],
            ScoringScale::OneToTen,
        );
        assert_eq!(summary.max_rpn, 224);
        assert_eq!(summary.max_severity, 7);
        assert_eq!(summary.max_occurrence, 8);
        assert_eq!(summary.max_detection, 4);
    }

    #[test]
    fn test_product_invariant_holds() {
        let summary = worst_case(
            &[cause(2), cause(6), cause(9)],
            &[effect(1), effect(8)],
            &[control(3)],
            ScoringScale::OneToTen,
        );
        assert_eq!(
            summary.max_rpn,
            summary.max_severity as u16 * summary.max_occurrence as u16 * summary.max_detection as u16
        );
    }

    #[test]
    fn test_tie_keeps_first_encountered_pair() {
        // 4x6 and 6x4 both give 24; first pair in iteration order wins.
        let summary = worst_case(
            &[cause(6), cause(4)],
            &[effect(4), effect(6)],
            &[control(1)],
            ScoringScale::OneToTen,
        );
        assert_eq!(summary.max_rpn, 24);
        assert_eq!(summary.max_occurrence, 6);
        assert_eq!(summary.max_severity, 4);
    }

    #[test]
    fn test_maximum_possible_rpn() {
        let summary = worst_case(&[cause(10)], &[effect(10)], &[], ScoringScale::OneToTen);
        assert_eq!(summary.max_rpn, 1000);
        assert_eq!(summary.max_rpn, ScoringScale::OneToTen.max_rpn());
    }
}
