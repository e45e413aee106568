//! Candidate topology seam.
//!
//! The spanning tree over cluster centroids is computed elsewhere; the planner
//! only consumes the resulting straight-line segments.

use electrify_core::{Coord, ElectrifyError, ElectrifyResult};
use serde::{Deserialize, Serialize};

/// A raw straight-line segment between two centroids (undirected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Coord,
    pub end: Coord,
}

impl Segment {
    pub fn new(start: Coord, end: Coord) -> Self {
        Self { start, end }
    }

    /// Segment from projected floating-point endpoints, snapped like centroids.
    pub fn from_float(xs: f64, ys: f64, xe: f64, ye: f64) -> ElectrifyResult<Self> {
        match (Coord::try_snap(xs, ys), Coord::try_snap(xe, ye)) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(ElectrifyError::Input(format!(
                "segment ({xs}, {ys}) -> ({xe}, {ye}) has a non-finite endpoint"
            ))),
        }
    }
}

/// Source of candidate segments whose union spans every centroid.
pub trait TopologySource {
    fn spanning_segments(&self, points: &[Coord]) -> ElectrifyResult<Vec<Segment>>;
}

/// Segments computed ahead of time (e.g. read from a table).
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTopology {
    segments: Vec<Segment>,
}

impl PrecomputedTopology {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl TopologySource for PrecomputedTopology {
    fn spanning_segments(&self, _points: &[Coord]) -> ElectrifyResult<Vec<Segment>> {
        Ok(self.segments.clone())
    }
}

impl<F> TopologySource for F
where
    F: Fn(&[Coord]) -> ElectrifyResult<Vec<Segment>>,
{
    fn spanning_segments(&self, points: &[Coord]) -> ElectrifyResult<Vec<Segment>> {
        self(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_float_snaps() {
        let seg = Segment::from_float(1.9, 2.1, -3.5, 4.0).unwrap();
        assert_eq!(seg.start, Coord::new(1, 2));
        assert_eq!(seg.end, Coord::new(-3, 4));
    }

    #[test]
    fn test_from_float_rejects_non_finite() {
        for (xs, ye) in [(f64::NAN, 0.0), (0.0, f64::INFINITY), (f64::NEG_INFINITY, 1.0)] {
            let err = Segment::from_float(xs, 0.0, 5.0, ye).unwrap_err();
            assert!(matches!(err, ElectrifyError::Input(_)));
        }
    }

    #[test]
    fn test_closure_source() {
        let chain = |points: &[Coord]| -> ElectrifyResult<Vec<Segment>> {
            Ok(points
                .windows(2)
                .map(|pair| Segment::new(pair[0], pair[1]))
                .collect())
        };
        let points = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)];
        let segments = chain.spanning_segments(&points).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].end, Coord::new(2, 0));
    }
}
