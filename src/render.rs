use crate::{
    core::{Canvas, Rgba8},
    driver::{Snapshot, Status},
    error::StrangeloopResult,
};

/// Configuration provided to a [`RenderSink`] before any snapshots arrive.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub background: Rgba8,
}

/// Sink contract for consuming stepper snapshots.
///
/// `frame` is called once per applied event, in applied order, plus once
/// for the terminal Finished state. The snapshot is read-only; a sink must
/// render from it, never mutate through it.
pub trait RenderSink {
    /// Called once before any snapshots are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StrangeloopResult<()>;
    /// Consume the current snapshot and produce a visual frame.
    fn frame(&mut self, snapshot: &Snapshot<'_>) -> StrangeloopResult<()>;
    /// Called once after the last snapshot.
    fn end(&mut self) -> StrangeloopResult<()>;
}

/// What a [`RecordingSink`] remembers about one delivered snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub status: Status,
    /// Open-frame count at delivery time.
    pub stack_len: usize,
    /// Draw-log length at delivery time.
    pub draw_len: usize,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    cfg: Option<SinkConfig>,
    observations: Vec<Observation>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

impl RenderSink for RecordingSink {
    fn begin(&mut self, cfg: SinkConfig) -> StrangeloopResult<()> {
        self.cfg = Some(cfg);
        self.observations.clear();
        Ok(())
    }

    fn frame(&mut self, snapshot: &Snapshot<'_>) -> StrangeloopResult<()> {
        self.observations.push(Observation {
            status: snapshot.status,
            stack_len: snapshot.frames.len(),
            draw_len: snapshot.draw_log.len(),
        });
        Ok(())
    }

    fn end(&mut self) -> StrangeloopResult<()> {
        Ok(())
    }
}
