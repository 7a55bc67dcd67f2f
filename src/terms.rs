use std::fmt;

use fixed_map::{Key, Map as FixedMap};
use serde::{Deserialize, Serialize};

/// Linguistic label shared by every variable, input and output alike.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Key, Ord, PartialEq, PartialOrd, Serialize)]
pub enum LinguisticSet {
    Low,
    Medium,
    High,
}

impl LinguisticSet {
    pub const ALL: [LinguisticSet; 3] = [Self::Low, Self::Medium, Self::High];
}

impl fmt::Display for LinguisticSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };

        f.write_str(label)
    }
}

/// Degree of membership of a crisp value in each linguistic set.
///
/// Every set always has an entry; the degrees need not sum to one since sets overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipDegree(FixedMap<LinguisticSet, f64>);

impl MembershipDegree {
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        let mut map = FixedMap::new();

        map.insert(LinguisticSet::Low, low);
        map.insert(LinguisticSet::Medium, medium);
        map.insert(LinguisticSet::High, high);

        Self(map)
    }

    pub fn from_fn(mut f: impl FnMut(LinguisticSet) -> f64) -> Self {
        let mut map = FixedMap::new();

        for set in LinguisticSet::ALL {
            map.insert(set, f(set));
        }

        Self(map)
    }

    pub fn degree(&self, set: LinguisticSet) -> f64 {
        self.0.get(set).copied().unwrap_or(0.)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LinguisticSet, f64)> + '_ {
        self.0.iter().map(|(set, degree)| (set, *degree))
    }
}

impl Default for MembershipDegree {
    fn default() -> Self {
        Self::new(0., 0., 0.)
    }
}

#[test]
fn test_membership_degree() {
    let degrees = MembershipDegree::new(0.25, 0.75, 0.);

    assert_eq!(degrees.degree(LinguisticSet::Low), 0.25);
    assert_eq!(degrees.degree(LinguisticSet::Medium), 0.75);
    assert_eq!(degrees.degree(LinguisticSet::High), 0.);
    assert_eq!(degrees.iter().count(), 3);
    assert!(MembershipDegree::default().iter().all(|(_, degree)| degree == 0.));

    let doubled = MembershipDegree::from_fn(|set| degrees.degree(set) * 2.);

    assert_eq!(doubled, MembershipDegree::new(0.5, 1.5, 0.));
}

#[test]
fn test_linguistic_set_order() {
    assert_eq!(LinguisticSet::ALL, [LinguisticSet::Low, LinguisticSet::Medium, LinguisticSet::High]);
    assert!(LinguisticSet::Low < LinguisticSet::High);
    assert_eq!(LinguisticSet::Medium.to_string(), "Medium");
}
