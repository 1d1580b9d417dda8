use serde::{Deserialize, Serialize};

use crate::core::types::{DevicePoint, DeviceRect, DeviceSize, LogicalPoint, LogicalRect};
use crate::error::{ChartError, ChartResult};

/// Aspect policy applied to every command of one repaint pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalePolicy {
    /// Uniform scale preserving shape; content is centered in the leftover margin.
    #[default]
    Fit,
    /// Independent horizontal and vertical scales filling the whole canvas.
    Stretch,
}

/// Logical-to-device mapping for one canvas size and logical extent.
///
/// Logical `y` grows downward, matching device space, so no axis is flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    device: DeviceSize,
    extent: LogicalRect,
    policy: ScalePolicy,
    scale_x: f64,
    scale_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ViewportTransform {
    pub fn new(device: DeviceSize, extent: LogicalRect, policy: ScalePolicy) -> ChartResult<Self> {
        device.validate()?;
        if !extent.is_finite() || extent.width <= 0.0 || extent.height <= 0.0 {
            return Err(ChartError::DegenerateGeometry(format!(
                "logical extent must be finite with positive size, got {}x{}",
                extent.width, extent.height
            )));
        }

        let width = f64::from(device.width);
        let height = f64::from(device.height);
        let fill_x = width / extent.width;
        let fill_y = height / extent.height;
        let (scale_x, scale_y) = match policy {
            ScalePolicy::Fit => {
                let scale = fill_x.min(fill_y);
                (scale, scale)
            }
            ScalePolicy::Stretch => (fill_x, fill_y),
        };

        let margin_x = (width - extent.width * scale_x) / 2.0;
        let margin_y = (height - extent.height * scale_y) / 2.0;

        Ok(Self {
            device,
            extent,
            policy,
            scale_x,
            scale_y,
            offset_x: margin_x - extent.x * scale_x,
            offset_y: margin_y - extent.y * scale_y,
        })
    }

    #[must_use]
    pub fn device_size(&self) -> DeviceSize {
        self.device
    }

    #[must_use]
    pub fn logical_extent(&self) -> LogicalRect {
        self.extent
    }

    #[must_use]
    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Device rectangle covered by the logical extent.
    #[must_use]
    pub fn content_rect(&self) -> DeviceRect {
        self.rect_to_device(self.extent)
    }

    #[must_use]
    pub fn to_device(&self, point: LogicalPoint) -> DevicePoint {
        DevicePoint::new(
            point.x * self.scale_x + self.offset_x,
            point.y * self.scale_y + self.offset_y,
        )
    }

    #[must_use]
    pub fn to_logical(&self, point: DevicePoint) -> LogicalPoint {
        LogicalPoint::new(
            (point.x - self.offset_x) / self.scale_x,
            (point.y - self.offset_y) / self.scale_y,
        )
    }

    #[must_use]
    pub fn rect_to_device(&self, rect: LogicalRect) -> DeviceRect {
        DeviceRect::from_corners(self.to_device(rect.origin()), self.to_device(rect.far_corner()))
    }

    /// Maps a logical length such as a pie radius.
    ///
    /// Uses the smaller axis scale so circles stay circular under `Stretch`.
    #[must_use]
    pub fn length_to_device(&self, length: f64) -> f64 {
        length * self.scale_x.min(self.scale_y)
    }
}
