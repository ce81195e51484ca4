use crate::{
    error::{StrangeloopError, StrangeloopResult},
    event::{Frame, StepEvent},
};

/// Explicit LIFO mirror of the open-call set, built and torn down strictly
/// from step events.
///
/// Index 0 is the top of the stack, matching the top-first order a
/// call-stack panel displays. For every prefix of the event stream applied
/// so far, `#Push - #Pop` equals `len()`, and frames pop in exact reverse
/// order of their push.
#[derive(Clone, Debug, Default)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    ///
    /// `Push` inserts at the top, `Pop` removes the top, `Emit` is a
    /// structural no-op (draw-log attribution happens in the driver).
    /// `Pop` on an empty stack is [`StrangeloopError::StackUnderflow`]:
    /// an assertion-grade bug in the process's event generation.
    pub fn apply(&mut self, event: &StepEvent) -> StrangeloopResult<()> {
        match event {
            StepEvent::Push(frame) => {
                self.frames.insert(0, frame.clone());
                Ok(())
            }
            StepEvent::Pop => {
                if self.frames.is_empty() {
                    return Err(StrangeloopError::StackUnderflow);
                }
                self.frames.remove(0);
                Ok(())
            }
            StepEvent::Emit(_) => Ok(()),
        }
    }

    /// Read-only snapshot of the open frames, top-first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The currently executing frame, if any.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.first()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
