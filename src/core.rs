use crate::error::{StrangeloopError, StrangeloopResult};

pub use kurbo::{Point, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated non-empty canvas.
    pub fn new(width: u32, height: u32) -> StrangeloopResult<Self> {
        if width == 0 || height == 0 {
            return Err(StrangeloopError::validation(
                "canvas width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 100).is_err());
        assert!(Canvas::new(100, 0).is_err());
        assert!(Canvas::new(1, 1).is_ok());
    }

    #[test]
    fn canvas_area() {
        assert_eq!(Canvas::new(300, 300).unwrap().area(), 90_000);
    }

    #[test]
    fn rgba8_roundtrips_array() {
        let c = Rgba8::new(1, 2, 3, 4);
        assert_eq!(c.to_array(), [1, 2, 3, 4]);
        assert_eq!(Rgba8::opaque(9, 8, 7).a, 255);
    }
}
