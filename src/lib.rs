//! Fuzzy fan speed control.
//!
//! Temperature and occupancy readings are fuzzified into Low / Medium / High degrees, fed
//! through a fixed nine rule Mamdani rule base and defuzzified into a fan speed percentage.

mod error;
mod inference;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod surface;
mod terms;
mod variable;

pub use error::{FanControlError, Result};
pub use inference::{evaluate, try_evaluate, FanController, InferenceOps};
pub use math::{trapezoidal, triangular};
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, ProductionLink};
pub use outputs::{EvaluationResult, FanState, RuleResult, ACTIVE_RULE_THRESHOLD};
pub use rules::{evaluate_rules, Rule, RULES};
pub use surface::{sample_surface, AxisRange, SurfaceAxes, SurfaceGrid, MAX_AXIS_POINTS};
pub use terms::{LinguisticSet, MembershipDegree};
pub use variable::{
    occupancy_membership, output_membership, temperature_membership, Shape, Variable, FAN_SPEED, FAN_SPEED_RANGE,
    OCCUPANCY, OCCUPANCY_RANGE, TEMPERATURE, TEMPERATURE_RANGE,
};

#[test]
fn test_office_day() {
    // Morning: cool and empty, noon: warm and busy, evening: hot and nearly empty
    let readings = [(17.5, 1.), (23., 9.), (31., 2.)];
    let states: Vec<_> = readings
        .iter()
        .map(|&(temperature, occupancy)| FanState::new(temperature, occupancy, &evaluate(temperature, occupancy)))
        .collect();

    assert!(states[0].fan_speed < 35.);
    assert!(states[1].fan_speed > states[0].fan_speed);
    assert!((35. ..=65.).contains(&states[2].fan_speed), "{}", states[2].fan_speed);

    let noon = evaluate(23., 9.);
    let names: Vec<_> = noon.active_rules.iter().map(|r| r.rule_name).collect();

    assert!(names.contains(&"Comfort & Some People"));
    assert!(noon.active_rules.iter().all(|r| RULES.iter().any(|rule| rule.name == r.rule_name)));

    let json = serde_json::to_value(&noon).unwrap();

    assert_eq!(json["active_rules"][0]["output_set"], "Medium");
    assert!(json["speed"].as_f64().is_some());
}

#[test]
fn test_slider_sweep_is_smooth() {
    // Temperature slider moves in half degree steps
    let mut previous: Option<f64> = None;

    for occupancy in [0., 5., 12., 20.] {
        for step in 0..=60 {
            let temperature = *TEMPERATURE_RANGE.start() + step as f64 * 0.5;
            let speed = evaluate(temperature, occupancy).speed;

            if let Some(previous) = previous {
                assert!((speed - previous).abs() < 20., "{temperature} {occupancy}: {previous} -> {speed}");
            }
            previous = Some(speed);
        }
        previous = None;
    }
}
