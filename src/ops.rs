use num::Float;
use serde::Deserialize;

use crate::math::interp;

/// And operator method for combining the two propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
        }
    }
}

/// Implication method: how a rule's firing strength shapes its consequent set.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum ImplicationOp {
    /// Mamdani: clip the consequent at the firing strength
    #[default]
    Min,
    /// Larsen: scale the consequent by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(membership, strength),
            Self::Prod => membership * strength,
        }
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum ProductionLink {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl ProductionLink {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
        }
    }

    pub fn fold<F: Float>(self, values: impl IntoIterator<Item = F>) -> F {
        values.into_iter().fold(F::zero(), |acc, v| self.call(acc, v))
    }
}

/// Method for defuzzificating the aggregated membership function.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum DefuzzificationOp {
    /// Weighted mean of the sampled universe
    #[default]
    Centroid,
    /// Point splitting the area under the curve in half
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
}

impl DefuzzificationOp {
    /// Returns zero when nothing fired, i.e. the membership is zero everywhere.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> F {
        debug_assert_eq!(universe.len(), membership.len());

        let total = membership.iter().fold(F::zero(), |acc, m| acc + *m);

        if total == F::zero() {
            return F::zero();
        }

        match self {
            Self::Centroid => {
                let num = universe.iter().zip(membership).fold(F::zero(), |acc, (x, m)| acc + *x * *m);

                num / total
            },
            Self::Bisector => {
                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(x, m)| (m[0] + m[1]) * (x[1] - x[0]) / two)
                    .collect();
                let target = areas.iter().fold(F::zero(), |acc, a| acc + *a) / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().enumerate() {
                    cum_area = cum_area + *area;

                    if cum_area >= target {
                        let xp = [cum_area - *area, cum_area];
                        let fp = [universe[i], universe[i + 1]];

                        return interp(target, xp.into_iter().zip(fp));
                    }
                }

                // Single point universe
                universe.first().copied().unwrap_or_else(F::zero)
            },
            Self::MeanOfMaximum => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);
                let (len, sum) = universe
                    .iter()
                    .zip(membership)
                    .filter(|(_, m)| **m == maximum)
                    .fold((F::zero(), F::zero()), |(len, sum), (u, _)| (len + F::one(), sum + *u));

                sum / len
            },
        }
    }
}

#[test]
fn test_and_op() {
    assert_eq!(AndOp::Min.call(0.25, 0.75), 0.25);
    assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.call(0.5, 0.25), 0.);
    assert_eq!(AndOp::BoundedProd.call(0.75, 0.75), 0.5);
}

#[test]
fn test_implication_and_production_link() {
    assert_eq!(ImplicationOp::Min.call(0.5, 0.75), 0.5);
    assert_eq!(ImplicationOp::Prod.call(0.5, 0.75), 0.375);

    assert_eq!(ProductionLink::Max.fold([0.25, 0.75, 0.5]), 0.75);
    assert_eq!(ProductionLink::ProbOr.call(0.5, 0.5), 0.75);
    assert_eq!(ProductionLink::BoundedSum.fold([0.5, 0.75]), 1.);
    assert_eq!(ProductionLink::Max.fold(Vec::<f64>::new()), 0.);
}

#[test]
fn test_defuzzification() {
    let universe = [0., 1., 2., 3., 4.];
    let symmetric = [0., 0.5, 1., 0.5, 0.];
    let skewed = [1., 1., 0., 0., 0.];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &symmetric), 2.);
    assert_eq!(DefuzzificationOp::Bisector.call(&universe, &symmetric), 2.);
    assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&universe, &symmetric), 2.);

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &skewed), 0.5);
    assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&universe, &skewed), 0.5);

    let zeros = [0.; 5];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &zeros), 0.);
    assert_eq!(DefuzzificationOp::Bisector.call(&universe, &zeros), 0.);
    assert_eq!(DefuzzificationOp::MeanOfMaximum.call(&universe, &zeros), 0.);
}
