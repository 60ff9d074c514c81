use std::time::Duration;

use kurbo::Point;

use crate::animation::ease::Ease;
use crate::animation::tween::Tween;

/// Duration of the scale tweens (show/hide and hot-region grow/shrink).
const SCALE_TWEEN: Duration = Duration::from_millis(300);

/// Time constant of the positional smoothing. Roughly: the follower covers
/// ~63% of the remaining distance per constant.
const FOLLOW_TAU: Duration = Duration::from_millis(120);

/// The custom cursor dot that trails the pointer.
///
/// Position eases toward the pointer with exponential smoothing; scale tweens
/// between 0 (outside the window), 1 (idle) and 2 (over text-like hot
/// regions).
#[derive(Debug)]
pub struct CursorFollower {
    position: Point,
    target: Point,
    scale: Tween,
    last_update: Duration,
}

impl CursorFollower {
    /// Start hidden at the origin.
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            target: Point::ZERO,
            scale: Tween::resting(0.0),
            last_update: Duration::ZERO,
        }
    }

    /// Current dot position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current dot scale at `now`.
    pub fn scale(&self, now: Duration) -> f64 {
        self.scale.sample(now)
    }

    /// Pointer entered the window: grow to idle size.
    pub fn pointer_entered(&mut self, now: Duration) {
        self.retarget_scale(now, 1.0);
    }

    /// Pointer left the window: shrink away.
    pub fn pointer_left(&mut self, now: Duration) {
        self.retarget_scale(now, 0.0);
    }

    /// Pointer moved. `over_hot` marks text-like regions the dot should grow
    /// over.
    pub fn pointer_moved(&mut self, now: Duration, to: Point, over_hot: bool) {
        self.target = to;
        self.retarget_scale(now, if over_hot { 2.0 } else { 1.0 });
    }

    /// Advance the positional smoothing to `now`.
    pub fn advance(&mut self, now: Duration) {
        let dt = now.saturating_sub(self.last_update);
        self.last_update = now;
        if dt.is_zero() {
            return;
        }
        let alpha = 1.0 - (-dt.as_secs_f64() / FOLLOW_TAU.as_secs_f64()).exp();
        self.position += (self.target - self.position) * alpha;
    }

    fn retarget_scale(&mut self, now: Duration, to: f64) {
        if (self.scale.target() - to).abs() > f64::EPSILON {
            self.scale.retarget(now, to, SCALE_TWEEN, Ease::OutQuad);
        }
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new()
    }
}
