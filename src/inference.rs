use serde::Deserialize;

use crate::error::{ensure_finite, Result};
use crate::ops::*;
use crate::outputs::{EvaluationResult, RuleResult};
use crate::rules::evaluate_rules_with;
use crate::terms::{LinguisticSet, MembershipDegree};
use crate::variable::{
    occupancy_membership, temperature_membership, FAN_SPEED, FAN_SPEED_RANGE, OCCUPANCY, TEMPERATURE,
};

/// Output universe resolution: one sample per percent of fan speed.
const OUTPUT_SAMPLES: usize = 101;

/// Sampled fan speed universe, laid out the same way as `Linspace`.
const OUTPUT_UNIVERSE: [f64; OUTPUT_SAMPLES] = {
    let start = *FAN_SPEED_RANGE.start();
    let step = (*FAN_SPEED_RANGE.end() - start) / (OUTPUT_SAMPLES - 1) as f64;
    let mut universe = [0.; OUTPUT_SAMPLES];
    let mut i = 0;

    while i < OUTPUT_SAMPLES {
        universe[i] = start + step * i as f64;
        i += 1;
    }

    universe
};

/// Operators used by each inference stage. The default is classic Mamdani inference:
/// min conjunction, clipping, max aggregation and centroid defuzzification.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InferenceOps {
    pub and_op: AndOp,
    pub imp_op: ImplicationOp,
    pub prod_link: ProductionLink,
    pub defuzz_op: DefuzzificationOp,
}

/// Maps temperature and occupancy readings to a fan speed. Holds no state between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct FanController {
    ops: InferenceOps,
}

impl FanController {
    pub fn new(ops: InferenceOps) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> InferenceOps {
        self.ops
    }

    pub fn eval(&self, temperature: f64, occupancy: f64) -> EvaluationResult {
        // Fuzzificate crisp inputs
        let temperature_degrees = temperature_membership(temperature);
        let occupancy_degrees = occupancy_membership(occupancy);

        let rules = evaluate_rules_with(self.ops.and_op, &temperature_degrees, &occupancy_degrees);
        let clip_levels = clip_levels(&rules);

        // Aggregate the implied output sets over the sampled universe
        let aggregated: [f64; OUTPUT_SAMPLES] = std::array::from_fn(|i| {
            let x = OUTPUT_UNIVERSE[i];
            let implied = LinguisticSet::ALL.map(|set| {
                let membership = FAN_SPEED.shape(set).eval(x);

                self.ops.imp_op.call(clip_levels.degree(set), membership)
            });

            self.ops.prod_link.fold(implied)
        });

        // Defuzzificate
        let speed = self.ops.defuzz_op.call(&OUTPUT_UNIVERSE, &aggregated);

        log::trace!("temperature={temperature} occupancy={occupancy} -> speed={speed:.3}");

        EvaluationResult { speed, active_rules: rules.into_iter().filter(RuleResult::is_active).collect() }
    }

    /// Like `eval`, but rejects NaN and infinite readings instead of producing an unspecified speed.
    pub fn try_eval(&self, temperature: f64, occupancy: f64) -> Result<EvaluationResult> {
        let temperature = ensure_finite(TEMPERATURE.name, temperature)?;
        let occupancy = ensure_finite(OCCUPANCY.name, occupancy)?;

        Ok(self.eval(temperature, occupancy))
    }
}

/// Strongest firing per output set, 0 for sets no rule fired.
fn clip_levels(rules: &[RuleResult]) -> MembershipDegree {
    MembershipDegree::from_fn(|set| {
        rules.iter().filter(|r| r.output_set == set).map(|r| r.firing_strength).fold(0., f64::max)
    })
}

/// Runs the default Mamdani pipeline on a pair of crisp readings.
pub fn evaluate(temperature: f64, occupancy: f64) -> EvaluationResult {
    FanController::default().eval(temperature, occupancy)
}

/// Checked variant of `evaluate` for values that did not go through input validation yet.
pub fn try_evaluate(temperature: f64, occupancy: f64) -> Result<EvaluationResult> {
    FanController::default().try_eval(temperature, occupancy)
}

#[cfg(test)]
fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

#[test]
fn test_output_universe() {
    use crate::linspace::Linspace;

    let sampled: Vec<f64> = Linspace::new(*FAN_SPEED_RANGE.start(), *FAN_SPEED_RANGE.end(), OUTPUT_SAMPLES).collect();

    assert_eq!(OUTPUT_UNIVERSE.to_vec(), sampled);
    assert_eq!(OUTPUT_UNIVERSE[0], 0.);
    assert_eq!(OUTPUT_UNIVERSE[OUTPUT_SAMPLES - 1], 100.);
}

#[test]
fn test_speed_bands() {
    let cold_empty = evaluate(10., 0.);
    let hot_crowded = evaluate(40., 20.);

    assert!(cold_empty.speed < 35., "{}", cold_empty.speed);
    assert!(hot_crowded.speed > 65., "{}", hot_crowded.speed);
    assert_close(cold_empty.speed, 20.160493827160494);
    assert_close(hot_crowded.speed, 81.69483568075117);

    assert_eq!(cold_empty.active_rules.len(), 1);
    assert_eq!(cold_empty.active_rules[0].rule_name, "Cold & Empty");
    assert_eq!(hot_crowded.active_rules[0].rule_name, "Hot & Crowded");
}

#[test]
fn test_mixed_rules() {
    let comfortable = evaluate(24., 8.);

    assert_close(comfortable.speed, 50.);
    assert_eq!(comfortable.active_rules.len(), 1);
    assert_eq!(comfortable.active_rules[0].output_set, LinguisticSet::Medium);

    let result = evaluate(22., 5.);
    let names: Vec<_> = result.active_rules.iter().map(|r| r.rule_name).collect();

    assert_close(result.speed, 31.413515687851955);
    assert_eq!(names, ["Comfort & Empty", "Comfort & Some People"]);
    assert_close(result.active_rules[0].firing_strength, 1. / 3.);
    assert_close(result.active_rules[1].firing_strength, 0.25);
}

#[test]
fn test_zero_firing_fallback() {
    for (temperature, occupancy) in [(-20., 5.), (5., -3.), (-40., -40.)] {
        let result = evaluate(temperature, occupancy);

        assert_eq!(result.speed, 0.);
        assert!(result.active_rules.is_empty());
    }
}

#[test]
fn test_speed_bounds_and_extrapolation() {
    for temperature in (-30..=80).step_by(5) {
        for occupancy in (-5..=40).step_by(3) {
            let result = evaluate(temperature as f64, occupancy as f64);

            assert!((0. ..=100.).contains(&result.speed), "{temperature} {occupancy} -> {}", result.speed);
            assert!(result.active_rules.len() <= 9);
            assert!(result.active_rules.iter().all(|r| r.firing_strength > 0.01));
        }
    }

    // Past the hot and crowded shoulders the answer saturates
    assert_eq!(evaluate(100., 100.).speed, evaluate(40., 20.).speed);
}

#[test]
fn test_deterministic() {
    let first = evaluate(27.3, 11.6);
    let second = evaluate(27.3, 11.6);

    assert_eq!(first.speed.to_bits(), second.speed.to_bits());
    assert_eq!(first, second);
}

#[test]
fn test_try_evaluate() {
    use crate::error::FanControlError;

    assert_eq!(try_evaluate(24., 8.), Ok(evaluate(24., 8.)));
    assert!(matches!(
        try_evaluate(f64::NAN, 8.),
        Err(FanControlError::NonFiniteInput { input: "temperature", .. })
    ));
    assert!(matches!(
        try_evaluate(24., f64::NEG_INFINITY),
        Err(FanControlError::NonFiniteInput { input: "occupancy", .. })
    ));
}

#[test]
fn test_alternative_ops() {
    let larsen = FanController::new(InferenceOps { imp_op: ImplicationOp::Prod, ..Default::default() });
    let mom = FanController::new(InferenceOps { defuzz_op: DefuzzificationOp::MeanOfMaximum, ..Default::default() });
    let bisector = FanController::new(InferenceOps { defuzz_op: DefuzzificationOp::Bisector, ..Default::default() });

    assert_close(mom.eval(24., 8.).speed, 50.);
    assert_close(bisector.eval(24., 8.).speed, 50.);
    assert_close(larsen.eval(24., 8.).speed, 50.);

    for controller in [larsen, mom, bisector] {
        assert!(controller.eval(10., 0.).speed < 35.);
        assert!(controller.eval(40., 20.).speed > 65.);
        assert_eq!(controller.eval(-20., -20.).speed, 0.);
    }

    let product = FanController::new(InferenceOps { and_op: AndOp::Prod, ..Default::default() });
    let result = product.eval(22., 5.);

    // 22°C is comfortable to degree 0.5
    assert_close(result.active_rules[0].firing_strength, 0.5 / 3.);
    assert_close(result.active_rules[1].firing_strength, 0.125);
    assert_close(result.speed, 32.08934169278996);
}

#[test]
fn test_inference_ops_config() {
    let ops: InferenceOps = serde_json::from_str(r#"{"defuzz_op": "Bisector", "and_op": "Prod"}"#).unwrap();

    assert_eq!(ops.defuzz_op, DefuzzificationOp::Bisector);
    assert_eq!(ops.and_op, AndOp::Prod);
    assert_eq!(ops.imp_op, ImplicationOp::Min);
    assert_eq!(ops.prod_link, ProductionLink::Max);

    let ops: InferenceOps = serde_json::from_str(r#"{"imp_op": "Prod"}"#).unwrap();

    assert_eq!(ops, InferenceOps { imp_op: ImplicationOp::Prod, ..Default::default() });

    let ops: InferenceOps = serde_json::from_str("{}").unwrap();

    assert_eq!(FanController::new(ops).ops(), FanController::default().ops());
}
