//! Step-by-step visualization engine for recursive mathematical
//! processes.
//!
//! The core is the stepper: a recursive traversal re-encoded as an
//! explicit worklist ([`Process`]) advanced one [`StepEvent`] at a time
//! by a [`Driver`], with the otherwise-invisible call stack mirrored in
//! an inspectable [`FrameStack`] and every emitted primitive collected in
//! an append-only draw log for a [`RenderSink`] to consume.
#![forbid(unsafe_code)]

pub mod chaos;
pub mod core;
pub mod driver;
pub mod error;
pub mod event;
pub mod godel;
pub mod miu;
pub mod model;
pub mod pipeline;
pub mod pq;
pub mod process;
pub mod render;
pub mod render_cpu;
pub mod sierpinski;
pub mod stack;
pub mod tree;
pub mod zeno;

pub use crate::chaos::{ChaosProcess, ChaosSpec};
pub use crate::core::{Canvas, Point, Rgba8, Vec2};
pub use crate::driver::{Driver, Snapshot, Status, StepperSpec, TickToken};
pub use crate::error::{StrangeloopError, StrangeloopResult};
pub use crate::event::{DrawOp, DrawRecord, Frame, StepEvent};
pub use crate::model::{Scene, SceneKind};
pub use crate::pipeline::{render_scene, trace_scene};
pub use crate::process::Process;
pub use crate::render::{RecordingSink, RenderSink, SinkConfig};
pub use crate::render_cpu::{CpuRasterSink, FrameRgba, Rasterizer};
pub use crate::sierpinski::SierpinskiSpec;
pub use crate::stack::FrameStack;
pub use crate::tree::{TreeProcess, TreeSpec};
