//! Uniform cubic B-spline evaluation.
//!
//! A parameter `u` selects segment `i = floor(u)` and local `t = u - i`. The
//! segment blends the four control points `CP[i-3] ..= CP[i]` with the uniform
//! cubic basis or one of its first two derivatives.

use crate::control_points::{ControlPointSet, ParameterDomain};
use crate::{CoasterError, Result, Vec3};

/// Which derivative of the curve to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivative {
    /// q(u)
    Position,
    /// q'(u)
    Velocity,
    /// q''(u)
    Acceleration,
}

impl Derivative {
    pub fn order(self) -> u8 {
        match self {
            Derivative::Position => 0,
            Derivative::Velocity => 1,
            Derivative::Acceleration => 2,
        }
    }

    pub fn from_order(order: u8) -> Option<Self> {
        match order {
            0 => Some(Derivative::Position),
            1 => Some(Derivative::Velocity),
            2 => Some(Derivative::Acceleration),
            _ => None,
        }
    }
}

/// Basis weights `[r3, r2, r1, r0]` for local parameter `t`.
///
/// `r3` weighs the oldest stencil point `CP[i-3]`, `r0` the newest `CP[i]`.
pub fn basis_weights(t: f32, derivative: Derivative) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    let s = 1.0 - t;
    match derivative {
        Derivative::Position => [
            s * s * s / 6.0,
            (3.0 * t3 - 6.0 * t2 + 4.0) / 6.0,
            (-3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0) / 6.0,
            t3 / 6.0,
        ],
        Derivative::Velocity => [
            -0.5 * s * s,
            1.5 * t2 - 2.0 * t,
            -1.5 * t2 + t + 0.5,
            0.5 * t2,
        ],
        Derivative::Acceleration => [s, 3.0 * t - 2.0, -3.0 * t + 1.0, t],
    }
}

/// Position, velocity and acceleration at one path parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub u: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
}

/// Evaluates the spline defined by a borrowed control point set
#[derive(Debug, Clone, Copy)]
pub struct CurveEvaluator<'a> {
    points: &'a ControlPointSet,
}

impl<'a> CurveEvaluator<'a> {
    pub fn new(points: &'a ControlPointSet) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &'a ControlPointSet {
        self.points
    }

    pub fn domain(&self) -> ParameterDomain {
        self.points.domain()
    }

    /// Evaluate the curve or one of its derivatives at `u`.
    ///
    /// # Panics
    ///
    /// Panics if `u` lies outside [`CurveEvaluator::domain`]. The stencil would
    /// otherwise read control points that do not exist.
    pub fn evaluate(&self, u: f32, derivative: Derivative) -> Vec3 {
        let domain = self.domain();
        assert!(
            domain.contains(u),
            "path parameter {u} outside of [{}, {})",
            domain.start,
            domain.end
        );
        self.blend(u, derivative)
    }

    /// Checked variant of [`CurveEvaluator::evaluate`]
    pub fn try_evaluate(&self, u: f32, derivative: Derivative) -> Result<Vec3> {
        self.check(u)?;
        Ok(self.blend(u, derivative))
    }

    /// Position, velocity and acceleration at the same `u`.
    ///
    /// # Panics
    ///
    /// Same precondition as [`CurveEvaluator::evaluate`].
    pub fn sample(&self, u: f32) -> CurveSample {
        CurveSample {
            u,
            position: self.evaluate(u, Derivative::Position),
            velocity: self.evaluate(u, Derivative::Velocity),
            acceleration: self.evaluate(u, Derivative::Acceleration),
        }
    }

    pub fn try_sample(&self, u: f32) -> Result<CurveSample> {
        self.check(u)?;
        Ok(self.sample(u))
    }

    fn check(&self, u: f32) -> Result<()> {
        let domain = self.domain();
        if domain.contains(u) {
            Ok(())
        } else {
            Err(CoasterError::ParameterOutOfDomain {
                value: u,
                min: domain.start,
                max: domain.end,
            })
        }
    }

    fn blend(&self, u: f32, derivative: Derivative) -> Vec3 {
        let index = u.floor() as usize;
        let t = u - index as f32;
        let [r3, r2, r1, r0] = basis_weights(t, derivative);
        let [p3, p2, p1, p0] = self.points.stencil(index);
        p3 * r3 + p2 * r2 + p1 * r1 + p0 * r0
    }
}
