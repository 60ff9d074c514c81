use std::time::Duration;

use crate::foundation::error::{ShowreelError, ShowreelResult};

pub use kurbo::{Point, Rect, Vec2};

/// Absolute 0-based frame index in a playback sequence.
///
/// On-disk frame files are 1-indexed (see [`crate::assets::sequence`]); the
/// engine works in 0-based indices everywhere else.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ShowreelResult<Self> {
        if num == 0 {
            return Err(ShowreelError::validation("Fps num must be > 0"));
        }
        if den == 0 {
            return Err(ShowreelError::validation("Fps den must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame.
    pub fn frame_period(self) -> Duration {
        Duration::from_secs_f64(f64::from(self.den) / f64::from(self.num))
    }
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a validated size with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ShowreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ShowreelError::validation(
                "SurfaceSize dimensions must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(50, 0).is_err());
        assert!(Fps::new(50, 1).is_ok());
    }

    #[test]
    fn frame_period_is_inverse_of_rate() {
        let fps = Fps::new(50, 1).unwrap();
        assert_eq!(fps.frame_period(), Duration::from_millis(20));
        let ntsc = Fps::new(30_000, 1_001).unwrap();
        let period = ntsc.frame_period().as_secs_f64();
        assert!((period - 1_001.0 / 30_000.0).abs() < 1e-12);
    }

    #[test]
    fn surface_size_rejects_zero_dims() {
        assert!(SurfaceSize::new(0, 10).is_err());
        assert!(SurfaceSize::new(10, 0).is_err());
        assert!(SurfaceSize::new(1280, 720).is_ok());
    }
}
