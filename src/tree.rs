use std::f64::consts::FRAC_PI_6;

use crate::{
    core::{Point, Rgba8},
    error::{StrangeloopError, StrangeloopResult},
    event::{DrawOp, Frame, StepEvent},
    process::Process,
};

/// Trunk color at depth 0.
const TRUNK: Rgba8 = Rgba8::opaque(0x8B, 0x45, 0x13);
/// Branch color below the trunk.
const BRANCH: Rgba8 = Rgba8::opaque(0xD4, 0xAF, 0x37);
const STROKE_WIDTH: f64 = 2.0;

/// Initial arguments and depth bound for a binary fractal-tree recursion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TreeSpec {
    /// Base of the trunk.
    pub origin: Point,
    /// Trunk length in pixels.
    pub start_length: f64,
    /// Length multiplier per generation, in (0, 1).
    pub shrink: f64,
    /// Angle between a child branch and its parent's heading, radians.
    pub spread: f64,
    /// Maximum recursion depth `D >= 0`; calls at depth `D` have no
    /// children.
    pub max_depth: u32,
}

impl Default for TreeSpec {
    fn default() -> Self {
        Self {
            origin: Point::new(150.0, 280.0),
            start_length: 80.0,
            shrink: 0.7,
            spread: FRAC_PI_6,
            max_depth: 4,
        }
    }
}

impl TreeSpec {
    pub fn validate(&self) -> StrangeloopResult<()> {
        if !(self.start_length > 0.0) {
            return Err(StrangeloopError::validation(
                "tree start_length must be > 0",
            ));
        }
        if !(self.shrink > 0.0 && self.shrink < 1.0) {
            return Err(StrangeloopError::validation(
                "tree shrink must be in (0, 1)",
            ));
        }
        if !self.spread.is_finite() {
            return Err(StrangeloopError::validation("tree spread must be finite"));
        }
        Ok(())
    }
}

/// One pending worklist entry.
///
/// Each entry yields exactly one [`StepEvent`] when popped, so the
/// traversal can be suspended between any two events. The worklist is the
/// explicit replacement for the call stack a direct recursion keeps
/// hidden.
#[derive(Clone, Debug)]
enum Task {
    /// Open a call: emit `Push`, then schedule its body.
    Enter {
        base: Point,
        length: f64,
        heading: f64,
        depth: u32,
    },
    /// Emit the branch segment drawn by the current call.
    Draw { from: Point, to: Point, depth: u32 },
    /// Close the current call: emit `Pop`.
    Leave,
}

/// Binary tree recursion encoded as an explicit worklist.
///
/// Events come out in the canonical pre-order: `Push` for a call, its own
/// `Emit`, the entire left-child sequence, the entire right-child
/// sequence, then `Pop`. Frame ids count up from 0 in creation order
/// regardless of depth, so the sequence is fully deterministic for a
/// given spec.
pub struct TreeProcess {
    spec: TreeSpec,
    work: Vec<Task>,
    next_id: u64,
}

impl TreeProcess {
    pub fn new(spec: &TreeSpec) -> Self {
        let work = vec![Task::Enter {
            base: spec.origin,
            length: spec.start_length,
            heading: 0.0,
            depth: 0,
        }];
        Self {
            spec: spec.clone(),
            work,
            next_id: 0,
        }
    }

    /// Endpoint of a branch growing from `base`. Heading 0 points straight
    /// up in canvas coordinates (y grows downward).
    fn tip(base: Point, length: f64, heading: f64) -> Point {
        Point::new(
            base.x + length * heading.sin(),
            base.y - length * heading.cos(),
        )
    }
}

impl Process for TreeProcess {
    fn advance(&mut self) -> Option<StepEvent> {
        match self.work.pop()? {
            Task::Enter {
                base,
                length,
                heading,
                depth,
            } => {
                let id = self.next_id;
                self.next_id += 1;
                let tip = Self::tip(base, length, heading);

                // Pushed in reverse so they pop as: draw, left subtree,
                // right subtree, leave.
                self.work.push(Task::Leave);
                if depth < self.spec.max_depth {
                    let child_length = length * self.spec.shrink;
                    self.work.push(Task::Enter {
                        base: tip,
                        length: child_length,
                        heading: heading + self.spec.spread,
                        depth: depth + 1,
                    });
                    self.work.push(Task::Enter {
                        base: tip,
                        length: child_length,
                        heading: heading - self.spec.spread,
                        depth: depth + 1,
                    });
                }
                self.work.push(Task::Draw {
                    from: base,
                    to: tip,
                    depth,
                });

                Some(StepEvent::Push(Frame {
                    id,
                    label: "branch".to_string(),
                    depth,
                    args: format!("len={}", length.round()),
                }))
            }
            Task::Draw { from, to, depth } => Some(StepEvent::Emit(DrawOp::Line {
                from,
                to,
                color: if depth == 0 { TRUNK } else { BRANCH },
                width: STROKE_WIDTH,
            })),
            Task::Leave => Some(StepEvent::Pop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::drain;

    fn spec(max_depth: u32) -> TreeSpec {
        TreeSpec {
            max_depth,
            ..TreeSpec::default()
        }
    }

    #[test]
    fn depth_zero_is_push_emit_pop() {
        let mut p = TreeProcess::new(&spec(0));
        let events = drain(&mut p);
        assert_eq!(events.len(), 3);
        let StepEvent::Push(frame) = &events[0] else {
            panic!("expected Push first, got {:?}", events[0]);
        };
        assert_eq!(frame.id, 0);
        assert_eq!(frame.depth, 0);
        assert_eq!(frame.label, "branch");
        assert_eq!(frame.args, "len=80");
        assert!(matches!(events[1], StepEvent::Emit(DrawOp::Line { .. })));
        assert_eq!(events[2], StepEvent::Pop);
        assert!(p.advance().is_none());
    }

    #[test]
    fn trunk_grows_straight_up() {
        let mut p = TreeProcess::new(&spec(0));
        p.advance();
        let Some(StepEvent::Emit(DrawOp::Line { from, to, color, .. })) = p.advance() else {
            panic!("expected the trunk segment");
        };
        assert_eq!(from, Point::new(150.0, 280.0));
        assert!((to.x - 150.0).abs() < 1e-9);
        assert!((to.y - 200.0).abs() < 1e-9);
        assert_eq!(color, TRUNK);
    }

    #[test]
    fn node_count_is_complete_binary_tree() {
        // depth bound D gives 2^(D+1) - 1 calls, 3 events each.
        for d in 0..5u32 {
            let mut p = TreeProcess::new(&spec(d));
            let events = drain(&mut p);
            let calls = (1u64 << (d + 1)) - 1;
            assert_eq!(events.len() as u64, 3 * calls);
        }
    }

    #[test]
    fn frame_ids_count_up_in_creation_order() {
        let mut p = TreeProcess::new(&spec(3));
        let ids: Vec<u64> = drain(&mut p)
            .iter()
            .filter_map(|e| match e {
                StepEvent::Push(f) => Some(f.id),
                _ => None,
            })
            .collect();
        let expected: Vec<u64> = (0..ids.len() as u64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn left_child_precedes_right_child() {
        let mut p = TreeProcess::new(&spec(1));
        let events = drain(&mut p);

        // Push(0) Emit Push(1) Emit Pop Push(2) Emit Pop Pop
        let shape: Vec<&str> = events
            .iter()
            .map(|e| match e {
                StepEvent::Push(_) => "push",
                StepEvent::Emit(_) => "emit",
                StepEvent::Pop => "pop",
            })
            .collect();
        assert_eq!(
            shape,
            [
                "push", "emit", "push", "emit", "pop", "push", "emit", "pop", "pop"
            ]
        );

        // The left child leans against the spread direction (negative
        // heading bends the tip toward -x).
        let tips: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                StepEvent::Emit(DrawOp::Line { to, .. }) => Some(to.x),
                _ => None,
            })
            .collect();
        assert_eq!(tips.len(), 3);
        assert!(tips[1] < tips[0], "left child should bend toward -x");
        assert!(tips[2] > tips[0], "right child should bend toward +x");
    }

    #[test]
    fn spec_validation_rejects_degenerate_trees() {
        let mut s = spec(4);
        s.start_length = 0.0;
        assert!(s.validate().is_err());

        let mut s = spec(4);
        s.shrink = 1.0;
        assert!(s.validate().is_err());

        let mut s = spec(4);
        s.spread = f64::NAN;
        assert!(s.validate().is_err());

        assert!(spec(4).validate().is_ok());
    }
}
