use crate::{
    driver::{Driver, StepperSpec},
    error::{StrangeloopError, StrangeloopResult},
    event::{DrawOp, StepEvent},
    model::{Scene, SceneKind},
    process,
    render_cpu::{FrameRgba, Rasterizer},
    sierpinski,
};

/// Render a scene to a single RGBA frame.
///
/// Stepped scenes run their driver for the first `steps` events (or to
/// completion when `None`); passing a small `steps` renders the paused
/// mid-run picture. Draw-immediately scenes ignore `steps`.
#[tracing::instrument(skip(scene))]
pub fn render_scene(scene: &Scene, steps: Option<u64>) -> StrangeloopResult<FrameRgba> {
    scene.validate()?;
    let ops = scene_ops(scene, steps)?;
    Ok(Rasterizer::new(scene.canvas, scene.background).render(&ops))
}

/// The full step-event trace of a stepped scene.
pub fn trace_scene(scene: &Scene) -> StrangeloopResult<Vec<StepEvent>> {
    scene.validate()?;
    let Some(spec) = scene.stepper_spec() else {
        return Err(StrangeloopError::validation(
            "scene draws immediately and has no event trace",
        ));
    };
    let mut built = spec.build();
    Ok(process::drain(built.as_mut()))
}

fn scene_ops(scene: &Scene, steps: Option<u64>) -> StrangeloopResult<Vec<DrawOp>> {
    match &scene.kind {
        SceneKind::Sierpinski(spec) => Ok(sierpinski::subdivide(spec)),
        SceneKind::Tree(spec) => stepped_ops(StepperSpec::Tree(spec.clone()), steps),
        SceneKind::Chaos(spec) => stepped_ops(StepperSpec::Chaos(spec.clone()), steps),
    }
}

fn stepped_ops(spec: StepperSpec, steps: Option<u64>) -> StrangeloopResult<Vec<DrawOp>> {
    let mut driver = Driver::with_spec(spec)?;
    match steps {
        None => {
            while driver.step()?.is_some() {}
        }
        Some(n) => {
            for _ in 0..n {
                if driver.step()?.is_none() {
                    break;
                }
            }
        }
    }
    Ok(driver
        .snapshot()
        .draw_log
        .iter()
        .map(|r| r.op.clone())
        .collect())
}
