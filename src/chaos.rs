use rand::rngs::StdRng;
use rand::{RngExt as _, SeedableRng as _};

use crate::{
    core::{Point, Rgba8},
    error::{StrangeloopError, StrangeloopResult},
    event::{DrawOp, Frame, StepEvent},
    process::Process,
};

const POINT_COLOR: Rgba8 = Rgba8::opaque(0x1A, 0x1A, 0x1A);
const POINT_RADIUS: f64 = 1.0;

/// Initial arguments for a chaos-game point generator.
///
/// The pseudo-random source is seeded from `seed` and threaded through the
/// process explicitly; equal specs produce identical event sequences.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChaosSpec {
    /// Anchor vertices the current point jumps toward (at least 3).
    pub anchors: Vec<Point>,
    /// Starting position of the wandering point.
    pub start: Point,
    /// Number of points to plot.
    pub points: u64,
    /// Determinism seed for anchor selection.
    pub seed: u64,
}

impl Default for ChaosSpec {
    fn default() -> Self {
        // Corners of the lesson's 300x300 triangle.
        Self {
            anchors: vec![
                Point::new(150.0, 10.0),
                Point::new(10.0, 290.0),
                Point::new(290.0, 290.0),
            ],
            start: Point::new(150.0, 150.0),
            points: 2000,
            seed: 1,
        }
    }
}

impl ChaosSpec {
    pub fn validate(&self) -> StrangeloopResult<()> {
        if self.anchors.len() < 3 {
            return Err(StrangeloopError::validation(
                "chaos game needs at least 3 anchor vertices",
            ));
        }
        if self.points == 0 {
            return Err(StrangeloopError::validation("chaos points must be > 0"));
        }
        Ok(())
    }
}

enum Phase {
    Open,
    Plot,
    Close,
    Done,
}

/// The stochastic degenerate case of a stepped process: a single
/// long-lived frame whose body is Emit-only.
///
/// Every `advance` past the opening `Push` jumps the current point halfway
/// toward a randomly chosen anchor and emits a `Dot` there; after `points`
/// jumps the frame pops and the process exhausts.
pub struct ChaosProcess {
    anchors: Vec<Point>,
    current: Point,
    remaining: u64,
    total: u64,
    rng: StdRng,
    phase: Phase,
}

impl ChaosProcess {
    pub fn new(spec: &ChaosSpec) -> Self {
        Self {
            anchors: spec.anchors.clone(),
            current: spec.start,
            remaining: spec.points,
            total: spec.points,
            rng: StdRng::seed_from_u64(spec.seed),
            phase: Phase::Open,
        }
    }
}

impl Process for ChaosProcess {
    fn advance(&mut self) -> Option<StepEvent> {
        match self.phase {
            Phase::Open => {
                self.phase = if self.remaining == 0 {
                    Phase::Close
                } else {
                    Phase::Plot
                };
                Some(StepEvent::Push(Frame {
                    id: 0,
                    label: "wander".to_string(),
                    depth: 0,
                    args: format!("points={}", self.total),
                }))
            }
            Phase::Plot => {
                let anchor = self.anchors[self.rng.random_range(0..self.anchors.len())];
                self.current = Point::new(
                    (self.current.x + anchor.x) / 2.0,
                    (self.current.y + anchor.y) / 2.0,
                );
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.phase = Phase::Close;
                }
                Some(StepEvent::Emit(DrawOp::Dot {
                    center: self.current,
                    radius: POINT_RADIUS,
                    color: POINT_COLOR,
                }))
            }
            Phase::Close => {
                self.phase = Phase::Done;
                Some(StepEvent::Pop)
            }
            Phase::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::drain;

    fn spec(points: u64, seed: u64) -> ChaosSpec {
        ChaosSpec {
            points,
            seed,
            ..ChaosSpec::default()
        }
    }

    #[test]
    fn event_shape_is_push_dots_pop() {
        let mut p = ChaosProcess::new(&spec(10, 7));
        let events = drain(&mut p);
        assert_eq!(events.len(), 12);
        assert!(matches!(events[0], StepEvent::Push(_)));
        assert_eq!(events[11], StepEvent::Pop);
        assert!(
            events[1..11]
                .iter()
                .all(|e| matches!(e, StepEvent::Emit(DrawOp::Dot { .. })))
        );
        assert!(p.advance().is_none());
    }

    #[test]
    fn equal_seeds_replay_identically() {
        let a = drain(&mut ChaosProcess::new(&spec(200, 42)));
        let b = drain(&mut ChaosProcess::new(&spec(200, 42)));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = drain(&mut ChaosProcess::new(&spec(200, 1)));
        let b = drain(&mut ChaosProcess::new(&spec(200, 2)));
        assert_ne!(a, b);
    }

    #[test]
    fn points_stay_inside_the_anchor_hull() {
        let s = spec(500, 9);
        let mut p = ChaosProcess::new(&s);
        for event in drain(&mut p) {
            if let StepEvent::Emit(DrawOp::Dot { center, .. }) = event {
                assert!(center.x >= 10.0 && center.x <= 290.0);
                assert!(center.y >= 10.0 && center.y <= 290.0);
            }
        }
    }

    #[test]
    fn validation_rejects_too_few_anchors_and_zero_points() {
        let mut s = spec(10, 1);
        s.anchors.truncate(2);
        assert!(s.validate().is_err());
        assert!(spec(0, 1).validate().is_err());
        assert!(spec(10, 1).validate().is_ok());
    }
}
