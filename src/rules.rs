use crate::ops::AndOp;
use crate::outputs::RuleResult;
use crate::terms::{LinguisticSet, MembershipDegree};

use crate::terms::LinguisticSet::{High, Low, Medium};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub temperature: LinguisticSet,
    pub occupancy: LinguisticSet,
    pub output: LinguisticSet,
}

impl Rule {
    const fn new(
        name: &'static str,
        temperature: LinguisticSet,
        occupancy: LinguisticSet,
        output: LinguisticSet,
    ) -> Self {
        Rule { name, temperature, occupancy, output }
    }

    pub fn firing_strength(&self, and_op: AndOp, temperature: &MembershipDegree, occupancy: &MembershipDegree) -> f64 {
        and_op.call(temperature.degree(self.temperature), occupancy.degree(self.occupancy))
    }
}

/// The full temperature x occupancy cross product. Order only matters for display.
pub const RULES: [Rule; 9] = [
    Rule::new("Cold & Empty", Low, Low, Low),
    Rule::new("Cold & Some People", Low, Medium, Low),
    // Body heat compensation
    Rule::new("Cold & Crowded", Low, High, Medium),
    Rule::new("Comfort & Empty", Medium, Low, Low),
    Rule::new("Comfort & Some People", Medium, Medium, Medium),
    Rule::new("Comfort & Crowded", Medium, High, High),
    Rule::new("Hot & Empty", High, Low, Medium),
    Rule::new("Hot & Some People", High, Medium, High),
    Rule::new("Hot & Crowded", High, High, High),
];

/// Fires every rule, in table order.
pub fn evaluate_rules(temperature: &MembershipDegree, occupancy: &MembershipDegree) -> Vec<RuleResult> {
    evaluate_rules_with(AndOp::Min, temperature, occupancy)
}

pub(crate) fn evaluate_rules_with(
    and_op: AndOp,
    temperature: &MembershipDegree,
    occupancy: &MembershipDegree,
) -> Vec<RuleResult> {
    RULES
        .iter()
        .map(|rule| RuleResult {
            rule_name: rule.name,
            firing_strength: rule.firing_strength(and_op, temperature, occupancy),
            output_set: rule.output,
        })
        .collect()
}

#[test]
fn test_rule_table() {
    let expected = [
        ((Low, Low), Low),
        ((Low, Medium), Low),
        ((Low, High), Medium),
        ((Medium, Low), Low),
        ((Medium, Medium), Medium),
        ((Medium, High), High),
        ((High, Low), Medium),
        ((High, Medium), High),
        ((High, High), High),
    ];

    for (rule, ((temperature, occupancy), output)) in RULES.iter().zip(expected) {
        assert_eq!((rule.temperature, rule.occupancy, rule.output), (temperature, occupancy, output));
    }

    // Every antecedent pair appears exactly once
    for temperature in LinguisticSet::ALL {
        for occupancy in LinguisticSet::ALL {
            let matches = RULES.iter().filter(|r| r.temperature == temperature && r.occupancy == occupancy).count();

            assert_eq!(matches, 1);
        }
    }

    let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
    names.sort_unstable();
    names.dedup();

    assert_eq!(names.len(), RULES.len());
}

#[test]
fn test_evaluate_rules() {
    let temperature = MembershipDegree::new(0.25, 0.75, 0.);
    let occupancy = MembershipDegree::new(0.5, 0.5, 1.);
    let results = evaluate_rules(&temperature, &occupancy);

    assert_eq!(results.len(), 9);
    assert_eq!(results[0].rule_name, "Cold & Empty");
    assert_eq!(results[0].firing_strength, 0.25);
    assert_eq!(results[4].firing_strength, 0.5);
    assert_eq!(results[5].firing_strength, 0.75);
    assert_eq!(results[5].output_set, High);
    assert_eq!(results[8].firing_strength, 0.);

    let product = evaluate_rules_with(AndOp::Prod, &temperature, &occupancy);

    assert_eq!(product[4].firing_strength, 0.375);
}
