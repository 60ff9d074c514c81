/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    ///
    /// Input outside the unit interval is clamped first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        for ease in ALL {
            assert_eq!(ease.apply(-3.0), 0.0);
            assert_eq!(ease.apply(7.5), 1.0);
        }
    }

    #[test]
    fn curves_are_monotone_on_a_grid() {
        for ease in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = ease.apply(f64::from(i) / 100.0);
                assert!(v >= prev, "{ease:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn in_out_curves_hit_the_midpoint() {
        assert!((Ease::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
