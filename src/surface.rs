use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FanControlError, Result};
use crate::inference::FanController;
use crate::linspace::Linspace;
use crate::variable::{OCCUPANCY, OCCUPANCY_RANGE, TEMPERATURE, TEMPERATURE_RANGE};

/// Upper bound on the samples along a single axis.
pub const MAX_AXIS_POINTS: usize = 10_000;

/// Closed, evenly stepped range of one surface axis.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl AxisRange {
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    fn linspace(&self, axis: &'static str) -> Result<Linspace> {
        let invalid = |reason: &str| Err(FanControlError::InvalidAxis { axis, reason: reason.to_owned() });

        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite()) {
            return invalid("bounds and step must be finite");
        }
        if self.end < self.start {
            return invalid("end must not be less than start");
        }
        if self.step <= 0. {
            return invalid("step must be positive");
        }

        match Linspace::stepped(self.start, self.end, self.step) {
            Some(linspace) if linspace.len() <= MAX_AXIS_POINTS => Ok(linspace),
            _ => invalid(format!("more than {MAX_AXIS_POINTS} points").as_str()),
        }
    }

    pub fn validate(&self, axis: &'static str) -> Result<()> {
        self.linspace(axis).map(drop)
    }

    pub fn points(&self, axis: &'static str) -> Result<Vec<f64>> {
        Ok(self.linspace(axis)?.collect())
    }
}

/// Grid over which a control surface is sampled.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SurfaceAxes {
    pub temperature: AxisRange,
    pub occupancy: AxisRange,
}

impl SurfaceAxes {
    pub fn new(temperature: AxisRange, occupancy: AxisRange) -> Result<Self> {
        let axes = Self { temperature, occupancy };

        axes.validate()?;

        Ok(axes)
    }

    pub fn validate(&self) -> Result<()> {
        self.temperature.validate(TEMPERATURE.name)?;
        self.occupancy.validate(OCCUPANCY.name)
    }
}

impl Default for SurfaceAxes {
    /// 10 to 40 °C by degree, 0 to 20 people by head.
    fn default() -> Self {
        Self { temperature: AxisRange::new(10., 40., 1.), occupancy: AxisRange::new(0., 20., 1.) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurfaceGrid {
    pub temperature_axis: Vec<f64>,
    pub occupancy_axis: Vec<f64>,
    /// Indexed `[occupancy][temperature]`, i.e. one row per occupancy value
    pub speed_matrix: Vec<Vec<f64>>,
}

impl SurfaceGrid {
    pub fn speed_at(&self, occupancy_index: usize, temperature_index: usize) -> Option<f64> {
        self.speed_matrix.get(occupancy_index)?.get(temperature_index).copied()
    }
}

impl FanController {
    /// Samples the control surface over custom axes.
    pub fn sample_surface_with(&self, axes: &SurfaceAxes) -> Result<SurfaceGrid> {
        let temperature_axis = axes.temperature.points(TEMPERATURE.name)?;
        let occupancy_axis = axes.occupancy.points(OCCUPANCY.name)?;

        Ok(self.sample(temperature_axis, occupancy_axis))
    }

    fn sample(&self, temperature_axis: Vec<f64>, occupancy_axis: Vec<f64>) -> SurfaceGrid {
        log::debug!("sampling {}x{} control surface", temperature_axis.len(), occupancy_axis.len());

        // Cells are independent; collect keeps rows in axis order
        let speed_matrix: Vec<Vec<f64>> = occupancy_axis
            .par_iter()
            .map(|&occupancy| {
                temperature_axis.iter().map(|&temperature| self.eval(temperature, occupancy).speed).collect::<Vec<_>>()
            })
            .collect();

        SurfaceGrid { temperature_axis, occupancy_axis, speed_matrix }
    }
}

/// Samples the default control surface: 31 temperatures by 21 occupancies.
///
/// Takes no parameters and always returns the same grid, so callers may compute it once.
pub fn sample_surface() -> SurfaceGrid {
    let temperature_axis = Linspace::new(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end(), 31).collect();
    let occupancy_axis = Linspace::new(*OCCUPANCY_RANGE.start(), *OCCUPANCY_RANGE.end(), 21).collect();

    FanController::default().sample(temperature_axis, occupancy_axis)
}

#[test]
fn test_default_surface_shape() {
    let grid = sample_surface();

    assert_eq!(grid.temperature_axis, (10..=40).map(f64::from).collect::<Vec<_>>());
    assert_eq!(grid.occupancy_axis, (0..=20).map(f64::from).collect::<Vec<_>>());
    assert_eq!(grid.speed_matrix.len(), 21);
    assert!(grid.speed_matrix.iter().all(|row| row.len() == 31));
    assert_eq!(grid.speed_at(21, 0), None);
    assert_eq!(grid.speed_at(0, 31), None);
}

#[test]
fn test_surface_matches_evaluate() {
    use crate::inference::evaluate;

    let grid = sample_surface();

    for (i, &occupancy) in grid.occupancy_axis.iter().enumerate() {
        for (j, &temperature) in grid.temperature_axis.iter().enumerate() {
            assert_eq!(grid.speed_matrix[i][j], evaluate(temperature, occupancy).speed);
        }
    }

    assert_eq!(grid, sample_surface());
    assert_eq!(Ok(grid), FanController::default().sample_surface_with(&SurfaceAxes::default()));
}

#[test]
fn test_surface_is_continuous() {
    let grid = sample_surface();
    let mut max_jump = 0.0f64;

    for i in 0..grid.occupancy_axis.len() {
        for j in 0..grid.temperature_axis.len() {
            let here = grid.speed_matrix[i][j];

            if let Some(right) = grid.speed_at(i, j + 1) {
                max_jump = max_jump.max((here - right).abs());
            }
            if let Some(below) = grid.speed_at(i + 1, j) {
                max_jump = max_jump.max((here - below).abs());
            }
            assert!((0. ..=100.).contains(&here));
        }
    }

    // A crisp controller would jump across whole bands at its thresholds
    assert!(max_jump < 25., "{max_jump}");
}

#[test]
fn test_custom_axes() {
    let axes: SurfaceAxes = serde_json::from_str(r#"{"temperature": {"start": 20, "end": 30, "step": 2.5}}"#).unwrap();

    assert_eq!(axes.occupancy, SurfaceAxes::default().occupancy);

    let grid = FanController::default().sample_surface_with(&axes).unwrap();

    assert_eq!(grid.temperature_axis, vec![20., 22.5, 25., 27.5, 30.]);
    assert_eq!(grid.speed_matrix.len(), 21);
    assert_eq!(grid.speed_matrix[0].len(), 5);
}

#[test]
fn test_invalid_axes() {
    let valid = AxisRange::new(0., 20., 1.);

    let err = SurfaceAxes::new(AxisRange::new(40., 10., 1.), valid).unwrap_err();
    assert_eq!(
        err,
        FanControlError::InvalidAxis { axis: "temperature", reason: "end must not be less than start".into() }
    );

    let err = SurfaceAxes::new(valid, AxisRange::new(0., 20., 0.)).unwrap_err();
    assert_eq!(err, FanControlError::InvalidAxis { axis: "occupancy", reason: "step must be positive".into() });

    assert!(SurfaceAxes::new(AxisRange::new(f64::NAN, 40., 1.), valid).is_err());
    assert!(SurfaceAxes::new(valid, valid).is_ok());

    let axes = SurfaceAxes { temperature: AxisRange::new(10., 40., -1.), occupancy: valid };
    assert!(FanController::default().sample_surface_with(&axes).is_err());
}

#[test]
fn test_oversized_axes() {
    let too_many = |axis| FanControlError::InvalidAxis { axis, reason: format!("more than {MAX_AXIS_POINTS} points") };
    let occupancy = SurfaceAxes::default().occupancy;

    // Finite and positive, but the point count does not fit in a usize
    let tiny_step = AxisRange::new(10., 40., 1e-300);

    assert_eq!(SurfaceAxes::new(tiny_step, occupancy), Err(too_many("temperature")));

    let axes = SurfaceAxes { temperature: tiny_step, occupancy };
    assert_eq!(FanController::default().sample_surface_with(&axes), Err(too_many("temperature")));

    let huge_range = AxisRange::new(0., 1e12, 1.);
    assert_eq!(SurfaceAxes::new(SurfaceAxes::default().temperature, huge_range), Err(too_many("occupancy")));

    let widest = AxisRange::new(0., (MAX_AXIS_POINTS - 1) as f64, 1.);
    assert_eq!(widest.points("occupancy").map(|points| points.len()), Ok(MAX_AXIS_POINTS));
    assert!(AxisRange::new(0., MAX_AXIS_POINTS as f64, 1.).validate("occupancy").is_err());
}

#[test]
fn test_surface_serializes() {
    let json = serde_json::to_value(sample_surface()).unwrap();

    assert_eq!(json["temperature_axis"].as_array().map(Vec::len), Some(31));
    assert_eq!(json["occupancy_axis"][20], 20.);
    assert_eq!(json["speed_matrix"].as_array().map(Vec::len), Some(21));
}
