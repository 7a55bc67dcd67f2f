use serde::Serialize;

use crate::terms::LinguisticSet;

/// Rules firing at or below this strength are left out of `EvaluationResult::active_rules`.
pub const ACTIVE_RULE_THRESHOLD: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RuleResult {
    pub rule_name: &'static str,
    pub firing_strength: f64,
    pub output_set: LinguisticSet,
}

impl RuleResult {
    pub fn is_active(&self) -> bool {
        self.firing_strength > ACTIVE_RULE_THRESHOLD
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// Fan speed in percent
    pub speed: f64,
    /// Rules that contributed noticeably, in rule table order
    pub active_rules: Vec<RuleResult>,
}

/// Current operating point, as drawn on top of a control surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FanState {
    pub temperature: f64,
    pub occupancy: f64,
    pub fan_speed: f64,
}

impl FanState {
    pub fn new(temperature: f64, occupancy: f64, result: &EvaluationResult) -> Self {
        Self { temperature, occupancy, fan_speed: result.speed }
    }
}

#[test]
fn test_rule_result_activity() {
    let result =
        |firing_strength| RuleResult { rule_name: "Hot & Crowded", firing_strength, output_set: LinguisticSet::High };

    assert!(result(0.5).is_active());
    assert!(!result(0.01).is_active());
    assert!(!result(0.).is_active());
}
