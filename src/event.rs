use crate::core::{Point, Rgba8};

/// One atomic, externally observable unit of progress in a stepped
/// computation.
///
/// A process that obeys its contract emits these in the exact order the
/// equivalent unstepped recursion would produce them; pausing between any
/// two events is therefore always safe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    /// A new logical call frame begins.
    Push(Frame),
    /// A side effect to be rendered, attributable to the topmost open frame.
    Emit(DrawOp),
    /// The topmost frame has completed all of its work, children included.
    Pop,
}

/// Explicit record standing in for one open, not-yet-returned recursive
/// call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Unique id, assigned in creation order starting at 0.
    pub id: u64,
    /// Procedure name as shown in the call-stack panel.
    pub label: String,
    /// Number of currently-open ancestor frames.
    pub depth: u32,
    /// Display string for the call's arguments, e.g. `len=80`.
    pub args: String,
}

/// Immutable geometric primitive appended to the draw log.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Line {
        from: Point,
        to: Point,
        color: Rgba8,
        width: f64,
    },
    Dot {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    Poly {
        points: Vec<Point>,
        fill: Rgba8,
        stroke: Option<Rgba8>,
    },
}

/// Draw-log entry: an emitted op plus the id of the frame that was on top
/// when it was emitted. The id is diagnostic; `None` means the op was
/// emitted outside any open frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawRecord {
    pub frame_id: Option<u64>,
    pub op: DrawOp,
}
