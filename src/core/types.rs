use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Device surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceSize {
    pub width: u32,
    pub height: u32,
}

impl DeviceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[must_use]
    pub fn bounds(self) -> DeviceRect {
        DeviceRect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Point in the model's own unit system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

impl LogicalPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn validate(self, what: &str) -> ChartResult<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(ChartError::DegenerateGeometry(format!(
                "{what} must be finite, got ({}, {})",
                self.x, self.y
            )))
        }
    }
}

/// Axis-aligned rectangle in logical units. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LogicalRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Unit square `(0, 0)-(1, 1)`.
    #[must_use]
    pub const fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// Builds a normalized rectangle from two opposite corners.
    #[must_use]
    pub fn from_corners(a: LogicalPoint, b: LogicalPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Same rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::from_corners(self.origin(), self.far_corner())
    }

    #[must_use]
    pub fn origin(self) -> LogicalPoint {
        LogicalPoint::new(self.x, self.y)
    }

    #[must_use]
    pub fn far_corner(self) -> LogicalPoint {
        LogicalPoint::new(self.x + self.width, self.y + self.height)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub(crate) fn validate(self, what: &str) -> ChartResult<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(ChartError::DegenerateGeometry(format!(
                "{what} must have finite origin and size"
            )))
        }
    }
}

/// Point in device pixels, origin at the top-left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in device pixels with non-negative size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DeviceRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn from_corners(a: DevicePoint, b: DevicePoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Smallest rectangle containing every point; `None` for an empty slice.
    #[must_use]
    pub fn bounding(points: &[DevicePoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn inflate(self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// True when `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Closed-interval overlap test, so zero-area shapes on an edge still count.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::{DevicePoint, DeviceRect, DeviceSize, LogicalPoint, LogicalRect};

    #[test]
    fn logical_rect_from_swapped_corners_is_normalized() {
        let rect =
            LogicalRect::from_corners(LogicalPoint::new(4.0, 3.0), LogicalPoint::new(1.0, 1.0));
        assert_eq!(rect, LogicalRect::new(1.0, 1.0, 3.0, 2.0));
        assert_eq!(
            LogicalRect::new(2.0, 2.0, -1.0, -2.0).normalized(),
            LogicalRect::new(1.0, 0.0, 1.0, 2.0)
        );
    }

    #[test]
    fn device_rect_bounding_and_intersection() {
        let bounds = DeviceRect::bounding(&[
            DevicePoint::new(3.0, 9.0),
            DevicePoint::new(-1.0, 2.0),
            DevicePoint::new(5.0, 4.0),
        ])
        .expect("non-empty");
        assert_eq!(bounds, DeviceRect::new(-1.0, 2.0, 6.0, 7.0));
        assert!(DeviceRect::bounding(&[]).is_none());

        let region = DeviceRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(region.intersects(DeviceRect::new(10.0, 5.0, 0.0, 0.0)));
        assert!(!region.intersects(DeviceRect::new(10.5, 5.0, 1.0, 1.0)));
        assert!(region.contains(DeviceRect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!region.contains(DeviceRect::new(5.0, 5.0, 6.0, 1.0)));
    }

    #[test]
    fn zero_device_size_is_invalid() {
        assert!(DeviceSize::new(0, 10).validate().is_err());
        assert!(DeviceSize::new(10, 10).validate().is_ok());
    }
}
