use std::ops::RangeInclusive;

use crate::math::{trapezoidal, triangular};
use crate::terms::{LinguisticSet, MembershipDegree};

/// Range of temperatures (°C) a control surface normally offers. Values outside are extrapolated.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 10.0..=40.0;

/// Range of head counts a control surface normally offers. Values outside are extrapolated.
pub const OCCUPANCY_RANGE: RangeInclusive<f64> = 0.0..=20.0;

/// Fan speed universe, in percent.
pub const FAN_SPEED_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Piecewise-linear membership function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Triangular(f64, f64, f64),
    Trapezoidal(f64, f64, f64, f64),
}

impl Shape {
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular(a, b, c) => triangular(x, a, b, c),
            Self::Trapezoidal(a, b, c, d) => trapezoidal(x, a, b, c, d),
        }
    }
}

/// A linguistic variable: one shape per set, in `LinguisticSet::ALL` order.
#[derive(Clone, Copy, Debug)]
pub struct Variable {
    pub name: &'static str,
    pub low: Shape,
    pub medium: Shape,
    pub high: Shape,
}

impl Variable {
    pub fn shape(&self, set: LinguisticSet) -> Shape {
        match set {
            LinguisticSet::Low => self.low,
            LinguisticSet::Medium => self.medium,
            LinguisticSet::High => self.high,
        }
    }

    pub fn fuzzify(&self, x: f64) -> MembershipDegree {
        MembershipDegree::from_fn(|set| self.shape(set).eval(x))
    }
}

pub const TEMPERATURE: Variable = Variable {
    name: "temperature",
    // Cold
    low: Shape::Trapezoidal(-10., 10., 18., 22.),
    // Comfortable
    medium: Shape::Triangular(20., 24., 28.),
    // Hot
    high: Shape::Trapezoidal(26., 30., 50., 50.),
};

pub const OCCUPANCY: Variable = Variable {
    name: "occupancy",
    low: Shape::Trapezoidal(-1., 0., 3., 6.),
    medium: Shape::Triangular(4., 8., 12.),
    high: Shape::Trapezoidal(10., 14., 25., 25.),
};

pub const FAN_SPEED: Variable = Variable {
    name: "fan_speed",
    low: Shape::Trapezoidal(-10., 0., 30., 50.),
    medium: Shape::Triangular(30., 50., 70.),
    high: Shape::Trapezoidal(50., 80., 110., 110.),
};

pub fn temperature_membership(celsius: f64) -> MembershipDegree {
    TEMPERATURE.fuzzify(celsius)
}

pub fn occupancy_membership(people: f64) -> MembershipDegree {
    OCCUPANCY.fuzzify(people)
}

/// Raw (unclipped) membership of a fan speed in each output set.
pub fn output_membership(speed: f64) -> MembershipDegree {
    FAN_SPEED.fuzzify(speed)
}

#[test]
fn test_temperature_membership() {
    assert_eq!(temperature_membership(10.), MembershipDegree::new(1., 0., 0.));
    assert_eq!(temperature_membership(24.), MembershipDegree::new(0., 1., 0.));
    assert_eq!(temperature_membership(21.), MembershipDegree::new(0.25, 0.25, 0.));
    assert_eq!(temperature_membership(27.), MembershipDegree::new(0., 0.25, 0.25));
    assert_eq!(temperature_membership(40.), MembershipDegree::new(0., 0., 1.));
    // Beyond the hot trapezoid's coincident edge the set stays saturated
    assert_eq!(temperature_membership(50.), MembershipDegree::new(0., 0., 1.));
    assert_eq!(temperature_membership(65.), MembershipDegree::new(0., 0., 1.));
    assert_eq!(temperature_membership(-20.), MembershipDegree::new(0., 0., 0.));
}

#[test]
fn test_occupancy_membership() {
    assert_eq!(occupancy_membership(0.), MembershipDegree::new(1., 0., 0.));
    assert_eq!(occupancy_membership(5.), MembershipDegree::new(1. / 3., 0.25, 0.));
    assert_eq!(occupancy_membership(8.), MembershipDegree::new(0., 1., 0.));
    assert_eq!(occupancy_membership(11.), MembershipDegree::new(0., 0.25, 0.25));
    assert_eq!(occupancy_membership(20.), MembershipDegree::new(0., 0., 1.));
    assert_eq!(occupancy_membership(25.), MembershipDegree::new(0., 0., 1.));
    assert_eq!(occupancy_membership(-3.), MembershipDegree::new(0., 0., 0.));
}

#[test]
fn test_output_membership() {
    assert_eq!(output_membership(0.), MembershipDegree::new(1., 0., 0.));
    assert_eq!(output_membership(40.), MembershipDegree::new(0.5, 0.5, 0.));
    assert_eq!(output_membership(50.), MembershipDegree::new(0., 1., 0.));
    assert_eq!(output_membership(100.), MembershipDegree::new(0., 0., 1.));
}

#[test]
fn test_advertised_ranges() {
    assert!(TEMPERATURE_RANGE.contains(&24.));
    assert!(OCCUPANCY_RANGE.contains(&20.));
    assert_eq!(*FAN_SPEED_RANGE.end(), 100.);
}
