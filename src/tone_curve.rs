//! Piecewise-linear tone curves and the 256-entry lookup tables built from them.
//!
//! The curve is a plain value: the caller owns it, edits it through
//! [ToneCurve::insert] / [ToneCurve::move_point], and hands a reference to
//! [ToneCurve::lut] whenever a table is needed.

use std::ops::Index;

use itertools::Itertools;

use crate::{
    error::{FilterError, Result},
    utils::num::round_u8,
};

/// Lowest and highest intensity a control point may take.
pub const CURVE_MIN: f64 = 0.0;
pub const CURVE_MAX: f64 = 255.0;

/// Input intensity (x) mapped to output intensity (y), both in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn validate(&self, name: &'static str) -> Result {
        for (axis, value) in [("x", self.x), ("y", self.y)] {
            if !(CURVE_MIN..=CURVE_MAX).contains(&value) {
                return Err(FilterError::invalid(
                    name,
                    format!("{} = {} is outside [0, 255]", axis, value),
                ));
            }
        }
        Ok(())
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((x, y): (f64, f64)) -> Self {
        ControlPoint::new(x, y)
    }
}

/// Fixed table mapping every 8-bit intensity to its transformed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lut([u8; 256]);

impl Lut {
    pub fn identity() -> Self {
        Self::from_fn(|c| c)
    }

    /// Build the table by evaluating `f` on every intensity.
    pub fn from_fn<F: Fn(u8) -> u8>(f: F) -> Self {
        let mut table = [0u8; 256];
        table
            .iter_mut()
            .enumerate()
            .for_each(|(c, entry)| *entry = f(c as u8));
        Self(table)
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[u8; 256] {
        &self.0
    }

    #[inline(always)]
    pub fn get(&self, value: u8) -> u8 {
        self.0[value as usize]
    }
}

impl Default for Lut {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<u8> for Lut {
    type Output = u8;

    #[inline(always)]
    fn index(&self, index: u8) -> &Self::Output {
        &self.0[index as usize]
    }
}

/// Ordered sequence of control points, ascending by x, at least two long.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    points: Vec<ControlPoint>,
}

impl Default for ToneCurve {
    fn default() -> Self {
        Self::identity()
    }
}

impl ToneCurve {
    /// (0, 0) -> (255, 255)
    pub fn identity() -> Self {
        Self {
            points: vec![
                ControlPoint::new(CURVE_MIN, CURVE_MIN),
                ControlPoint::new(CURVE_MAX, CURVE_MAX),
            ],
        }
    }

    /// Validate and sort (stable, by x) a snapshot of control points.
    pub fn new<P: Into<ControlPoint>>(points: impl IntoIterator<Item = P>) -> Result<Self> {
        let points = points.into_iter().map(Into::into).collect_vec();
        if points.len() < 2 {
            return Err(FilterError::invalid(
                "points",
                format!("a tone curve needs at least 2 points, got {}", points.len()),
            ));
        }
        for point in &points {
            point.validate("points")?;
        }
        let points = points
            .into_iter()
            .sorted_by(|a, b| a.x.total_cmp(&b.x))
            .collect_vec();
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Evaluate the curve at `x`.
    ///
    /// Outside the first/last point the curve is flat. A zero-width segment
    /// evaluates to its left point's y.
    pub fn interpolate(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        let segment = self
            .points
            .iter()
            .tuple_windows()
            .find(|(p1, p2)| p1.x <= x && x <= p2.x);

        match segment {
            Some((p1, p2)) if p2.x == p1.x => p1.y,
            Some((p1, p2)) => {
                let t = (x - p1.x) / (p2.x - p1.x);
                p1.y + t * (p2.y - p1.y)
            }
            // sorted points always bracket x once the bounds checks pass
            None => last.y,
        }
    }

    /// Sample the curve on every intensity, rounding to the nearest level.
    pub fn lut(&self) -> Lut {
        Lut::from_fn(|c| round_u8(self.interpolate(c as f64).clamp(CURVE_MIN, CURVE_MAX)))
    }

    /// Insert a point strictly inside an existing segment.
    ///
    /// Returns `false` (curve unchanged) when `point.x` coincides with or lies
    /// outside the existing points. y is clamped to `[0, 255]`.
    pub fn insert(&mut self, point: ControlPoint) -> bool {
        let position = self
            .points
            .iter()
            .tuple_windows()
            .position(|(p1, p2)| p1.x < point.x && point.x < p2.x);

        match position {
            Some(idx) => {
                let y = point.y.clamp(CURVE_MIN, CURVE_MAX);
                self.points.insert(idx + 1, ControlPoint::new(point.x, y));
                true
            }
            None => false,
        }
    }

    /// Move the point at `index`.
    ///
    /// Endpoints only move vertically, interior points keep their order by
    /// clamping x between their neighbours. y is clamped to `[0, 255]`.
    pub fn move_point(&mut self, index: usize, x: f64, y: f64) -> Result {
        let last = self.points.len() - 1;
        if index > last {
            return Err(FilterError::invalid(
                "index",
                format!("point {} does not exist, curve has {} points", index, last + 1),
            ));
        }
        if x.is_nan() || y.is_nan() {
            return Err(FilterError::invalid("point", "coordinates must not be NaN"));
        }

        let y = y.clamp(CURVE_MIN, CURVE_MAX);
        if index == 0 || index == last {
            self.points[index].y = y;
            return Ok(());
        }

        let prev_x = self.points[index - 1].x;
        let next_x = self.points[index + 1].x;
        self.points[index] = ControlPoint::new(x.clamp(prev_x, next_x), y);
        Ok(())
    }
}
