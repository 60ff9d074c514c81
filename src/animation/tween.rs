use std::time::Duration;

use crate::animation::ease::Ease;

/// A scalar value animated from `from` to `to` over a fixed window, sampled by
/// absolute time.
///
/// Tweens are plain data: there is no timer behind them. Sampling after the
/// window ends returns `to`, so a finished tween doubles as a resting value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    ease: Ease,
}

impl Tween {
    /// A tween already at rest on `value`.
    pub fn resting(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            ease: Ease::Linear,
        }
    }

    /// Start animating from the current sample toward `to`.
    ///
    /// Retargeting an in-flight tween picks up from wherever it currently is,
    /// so repeated retargets stay continuous.
    pub fn retarget(&mut self, now: Duration, to: f64, duration: Duration, ease: Ease) {
        let from = self.sample(now);
        *self = Self {
            from,
            to,
            start: now,
            duration,
            ease,
        };
    }

    /// The value the tween is heading toward (or resting at).
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Sample the tween at `now`.
    pub fn sample(&self, now: Duration) -> f64 {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start).as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// `true` once the animation window has fully elapsed.
    pub fn is_done(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn resting_tween_samples_its_value_forever() {
        let t = Tween::resting(2.0);
        assert_eq!(t.sample(ms(0)), 2.0);
        assert_eq!(t.sample(ms(100_000)), 2.0);
        assert!(t.is_done(ms(0)));
    }

    #[test]
    fn samples_interpolate_and_clamp() {
        let mut t = Tween::resting(0.0);
        t.retarget(ms(100), 1.0, ms(200), Ease::Linear);
        assert_eq!(t.sample(ms(50)), 0.0);
        assert_eq!(t.sample(ms(100)), 0.0);
        assert!((t.sample(ms(200)) - 0.5).abs() < 1e-12);
        assert_eq!(t.sample(ms(300)), 1.0);
        assert_eq!(t.sample(ms(999)), 1.0);
    }

    #[test]
    fn retarget_mid_flight_is_continuous() {
        let mut t = Tween::resting(0.0);
        t.retarget(ms(0), 1.0, ms(100), Ease::Linear);
        let mid = t.sample(ms(50));
        t.retarget(ms(50), 0.0, ms(100), Ease::Linear);
        assert_eq!(t.sample(ms(50)), mid);
        assert_eq!(t.sample(ms(150)), 0.0);
    }
}
