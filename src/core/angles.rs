use crate::error::{ChartError, ChartResult};

const FULL_TURN_DEG: f64 = 360.0;

/// Normalized pie-wedge angles in degrees.
///
/// 0° points at 12 o'clock and positive spans sweep clockwise as seen on the
/// device, where `y` grows downward. Models and canvases both use this
/// convention; backends convert at the last moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WedgeAngles {
    start_deg: f64,
    span_deg: f64,
}

impl WedgeAngles {
    /// Normalizes `start_deg` into `[0, 360)` and clamps spans above a full turn.
    ///
    /// Non-finite values and negative spans are degenerate.
    pub fn new(start_deg: f64, span_deg: f64) -> ChartResult<Self> {
        if !start_deg.is_finite() || !span_deg.is_finite() {
            return Err(ChartError::DegenerateGeometry(
                "pie angles must be finite".to_owned(),
            ));
        }
        if span_deg < 0.0 {
            return Err(ChartError::DegenerateGeometry(format!(
                "pie span must be >= 0, got {span_deg}"
            )));
        }

        let mut start = start_deg.rem_euclid(FULL_TURN_DEG);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        if start >= FULL_TURN_DEG {
            start = 0.0;
        }

        Ok(Self {
            start_deg: start,
            span_deg: span_deg.min(FULL_TURN_DEG),
        })
    }

    #[must_use]
    pub fn start_deg(self) -> f64 {
        self.start_deg
    }

    #[must_use]
    pub fn span_deg(self) -> f64 {
        self.span_deg
    }

    #[must_use]
    pub fn is_full_circle(self) -> bool {
        self.span_deg >= FULL_TURN_DEG
    }

    /// Start and end angles in radians measured from the positive x axis,
    /// increasing toward positive y (Cairo's arc convention).
    #[must_use]
    pub fn to_screen_radians(self) -> (f64, f64) {
        let start = (self.start_deg - 90.0).to_radians();
        (start, start + self.span_deg.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use super::WedgeAngles;

    #[test]
    fn start_angle_is_normalized() {
        let angles = WedgeAngles::new(-90.0, 45.0).expect("angles");
        assert_abs_diff_eq!(angles.start_deg(), 270.0);
        assert_abs_diff_eq!(WedgeAngles::new(720.0, 10.0).expect("angles").start_deg(), 0.0);
    }

    #[test]
    fn oversized_span_is_clamped_to_full_circle() {
        let angles = WedgeAngles::new(0.0, 400.0).expect("angles");
        assert!(angles.is_full_circle());
        assert_abs_diff_eq!(angles.span_deg(), 360.0);
    }

    #[test]
    fn negative_or_non_finite_angles_are_degenerate() {
        assert!(WedgeAngles::new(0.0, -1.0).is_err());
        assert!(WedgeAngles::new(f64::NAN, 10.0).is_err());
        assert!(WedgeAngles::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn twelve_o_clock_maps_to_negative_half_pi() {
        let (start, end) = WedgeAngles::new(0.0, 90.0).expect("angles").to_screen_radians();
        assert_abs_diff_eq!(start, -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(end, 0.0, epsilon = 1e-12);

        let (start, _) = WedgeAngles::new(270.0, 10.0).expect("angles").to_screen_radians();
        assert_abs_diff_eq!(start, PI, epsilon = 1e-12);
    }
}
