//! Control point table for the ride path.
//!
//! The path is a closed loop: the last three points repeat the first three so
//! the four-point B-spline stencil runs across the seam without wrapping
//! indices. The table is compiled in and never changes after construction;
//! alternate layouts plug in through [`ControlPointSource`].

use crate::{CoasterError, Result, Vec3};

/// Number of points in one B-spline stencil.
pub const STENCIL_SIZE: usize = 4;

/// First valid path parameter (the stencil needs three points behind it).
pub const PARAMETER_START: f32 = (STENCIL_SIZE - 1) as f32;

/// Supplies the anchor points of a path.
pub trait ControlPointSource {
    /// Human-readable name for logs and reports
    fn name(&self) -> &str;

    /// Ordered anchor points, seam duplicates included
    fn control_points(&self) -> Vec<Vec3>;
}

/// The shipped 18-point loop: a climb to a 37 m crest and a long drop back.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicLoop;

const CLASSIC_LOOP: [Vec3; 18] = [
    Vec3::new(10.0, 10.0, 0.0),
    Vec3::new(8.0, 12.0, -3.0),
    Vec3::new(3.0, 17.0, -8.0),
    Vec3::new(-4.0, 17.0, -6.0),
    Vec3::new(-8.0, 17.0, -5.0),
    Vec3::new(-12.0, 20.0, 0.0),
    Vec3::new(-12.0, 20.0, 5.0),
    Vec3::new(-7.0, 30.0, 5.0),
    Vec3::new(-3.0, 37.0, 5.0),
    Vec3::new(-1.0, 37.0, 5.0),
    Vec3::new(1.0, 32.0, 5.0),
    Vec3::new(3.0, 27.0, 5.0),
    Vec3::new(5.0, 22.0, 5.0),
    Vec3::new(7.0, 17.0, 5.0),
    Vec3::new(9.0, 15.0, 5.0),
    Vec3::new(10.0, 10.0, 0.0),
    Vec3::new(8.0, 12.0, -3.0),
    Vec3::new(3.0, 17.0, -8.0),
];

impl ControlPointSource for ClassicLoop {
    fn name(&self) -> &str {
        "classic-loop"
    }

    fn control_points(&self) -> Vec<Vec3> {
        CLASSIC_LOOP.to_vec()
    }
}

/// Half-open range of valid path parameters, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDomain {
    pub start: f32,
    pub end: f32,
}

impl ParameterDomain {
    pub fn contains(&self, u: f32) -> bool {
        u >= self.start && u < self.end
    }

    /// Number of whole spline segments covered by the domain
    pub fn segment_count(&self) -> usize {
        (self.end - self.start) as usize
    }
}

/// Immutable, ordered set of path anchor points.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSet {
    name: String,
    points: Vec<Vec3>,
}

impl ControlPointSet {
    /// Build a set from raw points. At least one full stencil is required.
    pub fn new(name: impl Into<String>, points: Vec<Vec3>) -> Result<Self> {
        if points.len() < STENCIL_SIZE {
            return Err(CoasterError::TooFewControlPoints {
                count: points.len(),
                required: STENCIL_SIZE,
            });
        }
        Ok(Self {
            name: name.into(),
            points,
        })
    }

    pub fn from_source(source: &dyn ControlPointSource) -> Result<Self> {
        let set = Self::new(source.name(), source.control_points())?;
        tracing::debug!(
            source = source.name(),
            points = set.len(),
            "loaded control points"
        );
        Ok(set)
    }

    /// The shipped loop
    pub fn classic() -> Self {
        Self {
            name: ClassicLoop.name().to_string(),
            points: CLASSIC_LOOP.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// The four points feeding the segment that ends at `index`.
    ///
    /// Callers guarantee `STENCIL_SIZE - 1 <= index < len()`.
    pub(crate) fn stencil(&self, index: usize) -> [Vec3; STENCIL_SIZE] {
        [
            self.points[index - 3],
            self.points[index - 2],
            self.points[index - 1],
            self.points[index],
        ]
    }

    /// Highest anchor point, which bounds the curve from above (convex hull).
    pub fn max_height(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn domain(&self) -> ParameterDomain {
        ParameterDomain {
            start: PARAMETER_START,
            end: self.points.len() as f32,
        }
    }
}

impl Default for ControlPointSet {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Square;

    impl ControlPointSource for Square {
        fn name(&self) -> &str {
            "square"
        }

        fn control_points(&self) -> Vec<Vec3> {
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(0.0, 0.0, 10.0),
                Vec3::new(0.0, 0.0, 0.0),
            ]
        }
    }

    #[test]
    fn classic_loop_shape() {
        let set = ControlPointSet::classic();
        assert_eq!(set.len(), 18);
        assert_eq!(set.name(), "classic-loop");
        assert_eq!(set.max_height(), 37.0);
        assert_eq!(
            set.domain(),
            ParameterDomain {
                start: 3.0,
                end: 18.0
            }
        );
    }

    #[test]
    fn classic_loop_seam_repeats_first_points() {
        let set = ControlPointSet::classic();
        for i in 0..3 {
            assert_eq!(set.get(i), set.get(i + 15));
        }
    }

    #[test]
    fn custom_source_is_accepted() {
        let set = ControlPointSet::from_source(&Square).unwrap();
        assert_eq!(set.name(), "square");
        assert_eq!(set.domain().segment_count(), 2);
    }

    #[test]
    fn too_few_points_rejected() {
        let err = ControlPointSet::new("tiny", vec![Vec3::ZERO; 3]).unwrap_err();
        assert!(matches!(
            err,
            CoasterError::TooFewControlPoints {
                count: 3,
                required: 4
            }
        ));
    }

    #[test]
    fn domain_is_half_open() {
        let domain = ControlPointSet::classic().domain();
        assert!(domain.contains(3.0));
        assert!(domain.contains(17.999));
        assert!(!domain.contains(18.0));
        assert!(!domain.contains(2.999));
    }

    #[test]
    fn stencil_reads_the_four_trailing_points() {
        let set = ControlPointSet::classic();
        let s = set.stencil(3);
        assert_eq!(s[0], Vec3::new(10.0, 10.0, 0.0));
        assert_eq!(s[3], Vec3::new(-4.0, 17.0, -6.0));
    }
}
