use crate::{
    chaos::ChaosSpec,
    core::{Canvas, Rgba8},
    driver::StepperSpec,
    error::{StrangeloopError, StrangeloopResult},
    sierpinski::SierpinskiSpec,
    tree::TreeSpec,
};

/// Background the lessons draw on.
const LESSON_BG: Rgba8 = Rgba8::opaque(0xF9, 0xFA, 0xFB);

/// One renderable teaching widget plus its canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub kind: SceneKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum SceneKind {
    /// Stepped fractal-tree recursion.
    Tree(TreeSpec),
    /// Stepped chaos-game point generation.
    Chaos(ChaosSpec),
    /// Draw-immediately triangle subdivision.
    Sierpinski(SierpinskiSpec),
}

impl Scene {
    fn lesson(kind: SceneKind) -> Self {
        Self {
            canvas: Canvas {
                width: 300,
                height: 300,
            },
            background: LESSON_BG,
            kind,
        }
    }

    /// The lesson's 300x300 tree scene.
    pub fn tree(spec: TreeSpec) -> Self {
        Self::lesson(SceneKind::Tree(spec))
    }

    /// The lesson's 300x300 chaos-game scene.
    pub fn chaos(spec: ChaosSpec) -> Self {
        Self::lesson(SceneKind::Chaos(spec))
    }

    /// The lesson's 300x300 subdivision scene.
    pub fn sierpinski(spec: SierpinskiSpec) -> Self {
        Self::lesson(SceneKind::Sierpinski(spec))
    }

    pub fn validate(&self) -> StrangeloopResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(StrangeloopError::validation(
                "canvas width/height must be > 0",
            ));
        }
        match &self.kind {
            SceneKind::Tree(spec) => spec.validate(),
            SceneKind::Chaos(spec) => spec.validate(),
            SceneKind::Sierpinski(spec) => spec.validate(),
        }
    }

    /// The stepper spec for scenes that step; `None` for draw-immediately
    /// scenes.
    pub fn stepper_spec(&self) -> Option<StepperSpec> {
        match &self.kind {
            SceneKind::Tree(spec) => Some(StepperSpec::Tree(spec.clone())),
            SceneKind::Chaos(spec) => Some(StepperSpec::Chaos(spec.clone())),
            SceneKind::Sierpinski(_) => None,
        }
    }

    pub fn from_json(s: &str) -> StrangeloopResult<Self> {
        serde_json::from_str(s).map_err(|e| StrangeloopError::serde(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> StrangeloopResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StrangeloopError::serde(e.to_string()))
    }
}
