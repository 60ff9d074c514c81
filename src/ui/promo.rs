use std::time::Duration;

use crate::animation::ease::Ease;

/// Offsets applied to the promo launcher badge by its looping shake.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShakeOffset {
    /// Rotation in degrees.
    pub rotate_deg: f64,
    /// Horizontal offset in pixels.
    pub dx: f64,
    /// Vertical offset in pixels.
    pub dy: f64,
}

/// The promotional popup and its launcher badge.
///
/// While the modal is open the badge is hidden; closing restores it. Clicks
/// on the modal content are swallowed so only the backdrop (or the close
/// control) dismisses it.
#[derive(Debug, Default)]
pub struct PromoModal {
    open: bool,
}

impl PromoModal {
    /// Closed modal with the badge showing.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while the popup is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `true` while the launcher badge should be rendered.
    pub fn badge_visible(&self) -> bool {
        !self.open
    }

    /// Open the popup (badge click).
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the popup.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// A click on the backdrop dismisses the popup.
    pub fn backdrop_clicked(&mut self) {
        self.close();
    }

    /// A click on the popup content does not propagate; nothing changes.
    pub fn content_clicked(&mut self) {}

    /// Sample the badge's continuous shake at `now`.
    ///
    /// Rotation and horizontal wobble loop every 2 s, the vertical wobble
    /// every 2.2 s, so the combined motion drifts instead of repeating
    /// verbatim.
    pub fn badge_shake(&self, now: Duration) -> ShakeOffset {
        const WOBBLE: [f64; 6] = [0.0, -1.0, 1.0, -1.0, 1.0, 0.0];
        ShakeOffset {
            rotate_deg: 3.0 * sample_loop(&WOBBLE, Duration::from_millis(2_000), now),
            dx: 2.0 * sample_loop(&WOBBLE, Duration::from_millis(2_000), now),
            dy: 1.0 * sample_loop(&WOBBLE, Duration::from_millis(2_200), now),
        }
    }
}

/// Sample a looping keyframe track, easing each segment in/out.
fn sample_loop(keys: &[f64], period: Duration, now: Duration) -> f64 {
    debug_assert!(keys.len() >= 2);
    let phase = now.as_secs_f64().rem_euclid(period.as_secs_f64()) / period.as_secs_f64();
    let segments = (keys.len() - 1) as f64;
    let pos = phase * segments;
    let seg = (pos.floor() as usize).min(keys.len() - 2);
    let t = Ease::InOutQuad.apply(pos - seg as f64);
    keys[seg] + (keys[seg + 1] - keys[seg]) * t
}
