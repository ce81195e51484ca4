use crate::{
    core::{Canvas, Point, Rgba8},
    driver::Snapshot,
    error::{StrangeloopError, StrangeloopResult},
    event::DrawOp,
    render::{RenderSink, SinkConfig},
};

/// Straight-alpha RGBA8 frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        let mut data = Vec::with_capacity(canvas.area() * 4);
        for _ in 0..canvas.area() {
            data.extend_from_slice(&color.to_array());
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// CPU rasterizer for the draw-op vocabulary (lines, dots, polygons).
///
/// Replays an append-only draw log into a fresh frame; equal logs always
/// produce byte-identical frames.
#[derive(Clone, Copy, Debug)]
pub struct Rasterizer {
    canvas: Canvas,
    background: Rgba8,
}

impl Rasterizer {
    pub fn new(canvas: Canvas, background: Rgba8) -> Self {
        Self { canvas, background }
    }

    #[tracing::instrument(skip(self, ops), fields(ops = ops.len()))]
    pub fn render(&self, ops: &[DrawOp]) -> FrameRgba {
        let mut frame = FrameRgba::filled(self.canvas, self.background);
        for op in ops {
            match op {
                DrawOp::Line {
                    from,
                    to,
                    color,
                    width,
                } => plot_line(&mut frame, *from, *to, *color, *width),
                DrawOp::Dot {
                    center,
                    radius,
                    color,
                } => stamp(&mut frame, *center, (*radius).max(0.5), *color),
                DrawOp::Poly {
                    points,
                    fill,
                    stroke,
                } => {
                    fill_poly(&mut frame, points, *fill);
                    if let Some(stroke) = stroke {
                        for i in 0..points.len() {
                            let a = points[i];
                            let b = points[(i + 1) % points.len()];
                            plot_line(&mut frame, a, b, *stroke, 1.0);
                        }
                    }
                }
            }
        }
        frame
    }
}

/// Source-over one pixel. Channel math assumes the destination is opaque
/// or near-opaque (the canvas background always is).
fn blend_px(frame: &mut FrameRgba, x: i64, y: i64, color: Rgba8) {
    if x < 0 || y < 0 || x >= i64::from(frame.width) || y >= i64::from(frame.height) {
        return;
    }
    let idx = ((y as u32 * frame.width + x as u32) * 4) as usize;
    if color.a == 255 {
        frame.data[idx..idx + 4].copy_from_slice(&color.to_array());
        return;
    }
    if color.a == 0 {
        return;
    }
    let sa = u16::from(color.a);
    let inv = 255 - sa;
    let src = color.to_array();
    for c in 0..3 {
        let blended = mul_div255(u16::from(src[c]), sa) + mul_div255(u16::from(frame.data[idx + c]), inv);
        frame.data[idx + c] = blended.min(255) as u8;
    }
    let da = u16::from(frame.data[idx + 3]);
    frame.data[idx + 3] = (sa + mul_div255(da, inv)).min(255) as u8;
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y)) + 127) as u16 / 255
}

/// Fill every pixel whose center lies within `radius` of `center`. The
/// pixel containing `center` always lands, so sub-pixel brushes stay
/// visible.
fn stamp(frame: &mut FrameRgba, center: Point, radius: f64, color: Rgba8) {
    let cx = center.x.floor() as i64;
    let cy = center.y.floor() as i64;
    blend_px(frame, cx, cy, color);

    let r2 = radius * radius;
    let x0 = (center.x - radius).floor() as i64;
    let x1 = (center.x + radius).ceil() as i64;
    let y0 = (center.y - radius).floor() as i64;
    let y1 = (center.y + radius).ceil() as i64;
    for py in y0..=y1 {
        for px in x0..=x1 {
            if px == cx && py == cy {
                continue;
            }
            let dx = px as f64 + 0.5 - center.x;
            let dy = py as f64 + 0.5 - center.y;
            if dx * dx + dy * dy <= r2 {
                blend_px(frame, px, py, color);
            }
        }
    }
}

/// Stroke a segment by stamping a round brush along it at sub-pixel
/// spacing.
fn plot_line(frame: &mut FrameRgba, from: Point, to: Point, color: Rgba8, width: f64) {
    let radius = (width / 2.0).max(0.5);
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        stamp(
            frame,
            Point::new(from.x + dx * t, from.y + dy * t),
            radius,
            color,
        );
    }
}

/// Even-odd scanline fill over pixel centers.
fn fill_poly(frame: &mut FrameRgba, points: &[Point], color: Rgba8) {
    if points.len() < 3 {
        return;
    }
    let y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let y0 = (y_min.floor() as i64).max(0);
    let y1 = (y_max.ceil() as i64).min(i64::from(frame.height) - 1);

    let mut xs: Vec<f64> = Vec::new();
    for py in y0..=y1 {
        let yc = py as f64 + 0.5;
        xs.clear();
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                let t = (yc - a.y) / (b.y - a.y);
                xs.push(a.x + t * (b.x - a.x));
            }
        }
        xs.sort_by(f64::total_cmp);
        for pair in xs.chunks_exact(2) {
            let px0 = ((pair[0] - 0.5).ceil() as i64).max(0);
            let px1 = ((pair[1] - 0.5).floor() as i64).min(i64::from(frame.width) - 1);
            for px in px0..=px1 {
                blend_px(frame, px, py, color);
            }
        }
    }
}

/// Render sink that rasterizes each snapshot's draw log on the CPU and
/// keeps the most recent frame.
#[derive(Debug, Default)]
pub struct CpuRasterSink {
    rasterizer: Option<Rasterizer>,
    last_frame: Option<FrameRgba>,
    frames_rendered: u64,
}

impl CpuRasterSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&FrameRgba> {
        self.last_frame.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl RenderSink for CpuRasterSink {
    fn begin(&mut self, cfg: SinkConfig) -> StrangeloopResult<()> {
        self.rasterizer = Some(Rasterizer::new(cfg.canvas, cfg.background));
        self.last_frame = None;
        self.frames_rendered = 0;
        Ok(())
    }

    fn frame(&mut self, snapshot: &Snapshot<'_>) -> StrangeloopResult<()> {
        let Some(rasterizer) = self.rasterizer.as_ref() else {
            return Err(StrangeloopError::render(
                "CpuRasterSink received a frame before begin",
            ));
        };
        let ops: Vec<DrawOp> = snapshot.draw_log.iter().map(|r| r.op.clone()).collect();
        self.last_frame = Some(rasterizer.render(&ops));
        self.frames_rendered += 1;
        Ok(())
    }

    fn end(&mut self) -> StrangeloopResult<()> {
        Ok(())
    }
}
