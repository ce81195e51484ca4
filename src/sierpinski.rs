use crate::{
    core::{Point, Rgba8},
    error::{StrangeloopError, StrangeloopResult},
    event::DrawOp,
};

const FILL: Rgba8 = Rgba8::opaque(0xD4, 0xAF, 0x37);
const STROKE: Rgba8 = Rgba8::opaque(0x1A, 0x1A, 0x1A);

/// Deepest subdivision the lesson offers.
pub const MAX_DEPTH: u32 = 6;

/// Triangle subdivision parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SierpinskiSpec {
    pub top: Point,
    pub left: Point,
    pub right: Point,
    /// Subdivision depth, 0 (one solid triangle) through [`MAX_DEPTH`].
    pub depth: u32,
}

impl Default for SierpinskiSpec {
    fn default() -> Self {
        // The lesson's 300x300 layout with a 10 px margin.
        Self {
            top: Point::new(150.0, 10.0),
            left: Point::new(10.0, 290.0),
            right: Point::new(290.0, 290.0),
            depth: 4,
        }
    }
}

impl SierpinskiSpec {
    pub fn validate(&self) -> StrangeloopResult<()> {
        if self.depth > MAX_DEPTH {
            return Err(StrangeloopError::validation(format!(
                "sierpinski depth must be <= {MAX_DEPTH}"
            )));
        }
        Ok(())
    }
}

/// Draw-immediately subdivision: the shape defined by itself, computed to
/// completion by direct recursion. Yields `3^depth` filled triangles.
pub fn subdivide(spec: &SierpinskiSpec) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    subdivide_into(spec.top, spec.left, spec.right, spec.depth, &mut ops);
    ops
}

fn subdivide_into(p1: Point, p2: Point, p3: Point, depth: u32, out: &mut Vec<DrawOp>) {
    if depth == 0 {
        out.push(DrawOp::Poly {
            points: vec![p1, p2, p3],
            fill: FILL,
            stroke: Some(STROKE),
        });
        return;
    }

    let mid = |a: Point, b: Point| Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let m12 = mid(p1, p2);
    let m23 = mid(p2, p3);
    let m13 = mid(p1, p3);

    subdivide_into(p1, m12, m13, depth - 1, out);
    subdivide_into(m12, p2, m23, depth - 1, out);
    subdivide_into(m13, m23, p3, depth - 1, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_count_is_three_to_the_depth() {
        for depth in 0..=MAX_DEPTH {
            let spec = SierpinskiSpec {
                depth,
                ..SierpinskiSpec::default()
            };
            assert_eq!(subdivide(&spec).len(), 3usize.pow(depth));
        }
    }

    #[test]
    fn depth_zero_is_the_outer_triangle() {
        let spec = SierpinskiSpec {
            depth: 0,
            ..SierpinskiSpec::default()
        };
        let ops = subdivide(&spec);
        let DrawOp::Poly { points, .. } = &ops[0] else {
            panic!("expected a polygon");
        };
        assert_eq!(*points, [spec.top, spec.left, spec.right]);
    }

    #[test]
    fn subdivision_stays_inside_the_outer_triangle() {
        let spec = SierpinskiSpec::default();
        for op in subdivide(&spec) {
            let DrawOp::Poly { points, .. } = op else {
                panic!("expected polygons only");
            };
            for p in points {
                assert!(p.x >= 10.0 && p.x <= 290.0);
                assert!(p.y >= 10.0 && p.y <= 290.0);
            }
        }
    }

    #[test]
    fn validation_clamps_depth() {
        let spec = SierpinskiSpec {
            depth: MAX_DEPTH + 1,
            ..SierpinskiSpec::default()
        };
        assert!(spec.validate().is_err());
        assert!(SierpinskiSpec::default().validate().is_ok());
    }
}
