use std::time::Duration;

use crate::{
    chaos::{ChaosProcess, ChaosSpec},
    error::StrangeloopResult,
    event::{DrawRecord, Frame, StepEvent},
    process::Process,
    render::RenderSink,
    stack::FrameStack,
    tree::{TreeProcess, TreeSpec},
};

/// Driver lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Constructed, no process loaded yet.
    Idle,
    /// Process constructed, zero events consumed.
    Ready,
    /// Ticking.
    Running,
    /// Ticking suspended; the process retains its position.
    Paused,
    /// Process exhausted; further steps and ticks have no effect.
    Finished,
}

/// Token issued by [`Driver::start`]. A tick carrying a token from an
/// earlier running period is stale and is discarded, so a pacing source
/// scheduled before a `pause()` or `reset()` cannot mutate the driver
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken(u64);

/// Buildable process description. The driver keeps the spec it was loaded
/// with so `reset()` can reconstruct the run from its original arguments;
/// there is no in-place rewind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "process", rename_all = "snake_case")]
pub enum StepperSpec {
    Tree(TreeSpec),
    Chaos(ChaosSpec),
}

impl StepperSpec {
    pub fn validate(&self) -> StrangeloopResult<()> {
        match self {
            Self::Tree(spec) => spec.validate(),
            Self::Chaos(spec) => spec.validate(),
        }
    }

    /// Construct a fresh process from the initial arguments.
    pub fn build(&self) -> Box<dyn Process> {
        match self {
            Self::Tree(spec) => Box::new(TreeProcess::new(spec)),
            Self::Chaos(spec) => Box::new(ChaosProcess::new(spec)),
        }
    }
}

/// Read-only view handed to a render sink on every state change.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Snapshot<'a> {
    pub status: Status,
    /// Open frames, top-first.
    pub frames: &'a [Frame],
    /// Append-only draw log, oldest first.
    pub draw_log: &'a [DrawRecord],
}

/// Paces a stepped process and owns its externally visible state.
///
/// One `step()` consumes exactly one event from the process, applies it to
/// the frame stack, and appends any emitted op to the draw log. The applied
/// event sequence (and therefore the final frame stack and draw log) is
/// identical for a given spec regardless of pacing; only wall-clock timing
/// differs.
pub struct Driver {
    spec: Option<StepperSpec>,
    process: Option<Box<dyn Process>>,
    stack: FrameStack,
    draw_log: Vec<DrawRecord>,
    status: Status,
    epoch: u64,
    events_applied: u64,
}

impl Driver {
    /// An idle driver with no process; every control operation is a no-op
    /// until a spec is loaded.
    pub fn new() -> Self {
        Self {
            spec: None,
            process: None,
            stack: FrameStack::new(),
            draw_log: Vec::new(),
            status: Status::Idle,
            epoch: 0,
            events_applied: 0,
        }
    }

    pub fn with_spec(spec: StepperSpec) -> StrangeloopResult<Self> {
        let mut driver = Self::new();
        driver.load(spec)?;
        Ok(driver)
    }

    /// Validate and load a spec, discarding any previous run wholesale.
    pub fn load(&mut self, spec: StepperSpec) -> StrangeloopResult<()> {
        spec.validate()?;
        self.process = Some(spec.build());
        self.spec = Some(spec);
        self.stack.clear();
        self.draw_log.clear();
        self.events_applied = 0;
        self.status = Status::Ready;
        self.epoch += 1;
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Events applied since the last load/reset.
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            status: self.status,
            frames: self.stack.frames(),
            draw_log: &self.draw_log,
        }
    }

    /// Ready/Paused -> Running. Returns the token ticks must present.
    /// Already Running returns the current token; Idle and Finished are
    /// no-ops returning `None`.
    pub fn start(&mut self) -> Option<TickToken> {
        match self.status {
            Status::Ready | Status::Paused => {
                self.status = Status::Running;
                Some(TickToken(self.epoch))
            }
            Status::Running => Some(TickToken(self.epoch)),
            Status::Idle | Status::Finished => None,
        }
    }

    /// Running -> Paused; invalidates outstanding tick tokens. No-op in
    /// any other state.
    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
            self.epoch += 1;
        }
    }

    /// Consume exactly one event from the process and apply it.
    ///
    /// Legal in any state; Idle and Finished are no-ops returning
    /// `Ok(None)`. Hitting exhaustion transitions to Finished and also
    /// returns `Ok(None)`.
    pub fn step(&mut self) -> StrangeloopResult<Option<StepEvent>> {
        if self.status == Status::Finished {
            return Ok(None);
        }
        let Some(process) = self.process.as_mut() else {
            return Ok(None);
        };
        match process.advance() {
            Some(event) => {
                self.stack.apply(&event)?;
                if let StepEvent::Emit(op) = &event {
                    self.draw_log.push(DrawRecord {
                        frame_id: self.stack.top().map(|f| f.id),
                        op: op.clone(),
                    });
                }
                self.events_applied += 1;
                Ok(Some(event))
            }
            None => {
                self.status = Status::Finished;
                self.epoch += 1;
                Ok(None)
            }
        }
    }

    /// Apply one externally paced tick.
    ///
    /// Steps only while Running and only when `token` belongs to the
    /// current running period; anything else is discarded and returns
    /// `Ok(false)`. Returns `Ok(true)` when an event was applied.
    pub fn tick(&mut self, token: TickToken) -> StrangeloopResult<bool> {
        if self.status != Status::Running || token.0 != self.epoch {
            return Ok(false);
        }
        Ok(self.step()?.is_some())
    }

    /// Discard the current process and rebuild it from the original spec;
    /// the frame stack and draw log are emptied. Idle stays Idle.
    pub fn reset(&mut self) {
        let Some(spec) = self.spec.as_ref() else {
            return;
        };
        self.process = Some(spec.build());
        self.stack.clear();
        self.draw_log.clear();
        self.events_applied = 0;
        self.status = Status::Ready;
        self.epoch += 1;
    }

    /// Step to exhaustion under manual pacing, handing the sink a snapshot
    /// after every applied event and once more for the Finished state.
    #[tracing::instrument(skip(self, sink))]
    pub fn run_to_completion(&mut self, sink: &mut dyn RenderSink) -> StrangeloopResult<()> {
        while self.step()?.is_some() {
            sink.frame(&self.snapshot())?;
        }
        if self.status == Status::Finished {
            sink.frame(&self.snapshot())?;
        }
        Ok(())
    }

    /// Drive ticks on a fixed cadence until Finished.
    ///
    /// The pacing loop communicates with the driver only through
    /// `tick(token)`; the applied event sequence is identical to manual
    /// stepping for any interval, including zero.
    #[tracing::instrument(skip(self, sink))]
    pub fn play(&mut self, interval: Duration, sink: &mut dyn RenderSink) -> StrangeloopResult<()> {
        let Some(token) = self.start() else {
            return Ok(());
        };
        sink.frame(&self.snapshot())?;
        while self.tick(token)? {
            sink.frame(&self.snapshot())?;
            if self.status == Status::Running && !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }
        if self.status == Status::Finished {
            sink.frame(&self.snapshot())?;
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}
