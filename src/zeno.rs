//! Zeno's halving walk: infinitely many steps whose durations sum to a
//! finite total. Finite float precision is all the lesson needs.

/// One step of the walk toward the goal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ZenoStep {
    /// 1-based step number.
    pub step: u32,
    /// Distance covered so far.
    pub position: f64,
    /// Time elapsed so far; converges to 1.
    pub elapsed: f64,
}

/// Iterator over the partial sums `sum(total / 2^n)` / `sum(1 / 2^n)`.
/// Unbounded; take as many steps as the lesson wants to show.
#[derive(Clone, Copy, Debug)]
pub struct Zeno {
    total: f64,
    step: u32,
    position: f64,
    elapsed: f64,
}

impl Zeno {
    pub fn new(total: f64) -> Self {
        Self {
            total,
            step: 0,
            position: 0.0,
            elapsed: 0.0,
        }
    }
}

impl Iterator for Zeno {
    type Item = ZenoStep;

    fn next(&mut self) -> Option<ZenoStep> {
        self.step += 1;
        let half = 0.5f64.powi(self.step as i32);
        self.position += self.total * half;
        self.elapsed += half;
        Some(ZenoStep {
            step: self.step,
            position: self.position,
            elapsed: self.elapsed,
        })
    }
}
