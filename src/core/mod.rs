pub mod angles;
pub mod geometry;
pub mod types;

pub use angles::WedgeAngles;
pub use geometry::{ScalePolicy, ViewportTransform};
pub use types::{DevicePoint, DeviceRect, DeviceSize, LogicalPoint, LogicalRect};
