use chart_canvas::core::{
    DevicePoint, DeviceSize, LogicalPoint, LogicalRect, ScalePolicy, ViewportTransform,
};
use proptest::prelude::*;

fn policy_strategy() -> impl Strategy<Value = ScalePolicy> {
    prop_oneof![Just(ScalePolicy::Fit), Just(ScalePolicy::Stretch)]
}

proptest! {
    #[test]
    fn device_to_logical_round_trips_inside_canvas(
        width in 1_u32..4_000,
        height in 1_u32..4_000,
        ex in -1_000.0f64..1_000.0,
        ey in -1_000.0f64..1_000.0,
        ew in 0.01f64..10_000.0,
        eh in 0.01f64..10_000.0,
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
        policy in policy_strategy(),
    ) {
        let transform = ViewportTransform::new(
            DeviceSize::new(width, height),
            LogicalRect::new(ex, ey, ew, eh),
            policy,
        ).expect("transform");

        let point = DevicePoint::new(f64::from(width) * fx, f64::from(height) * fy);
        let back = transform.to_device(transform.to_logical(point));
        let tolerance = 1e-6 * f64::from(width.max(height));
        prop_assert!((back.x - point.x).abs() <= tolerance);
        prop_assert!((back.y - point.y).abs() <= tolerance);
    }

    #[test]
    fn extent_corners_stay_inside_the_canvas(
        width in 1_u32..4_000,
        height in 1_u32..4_000,
        ew in 0.01f64..10_000.0,
        eh in 0.01f64..10_000.0,
        policy in policy_strategy(),
    ) {
        let extent = LogicalRect::new(0.0, 0.0, ew, eh);
        let transform = ViewportTransform::new(DeviceSize::new(width, height), extent, policy)
            .expect("transform");
        let slack = 1e-6 * f64::from(width.max(height));

        for corner in [extent.origin(), extent.far_corner(), LogicalPoint::new(ew, 0.0)] {
            let device = transform.to_device(corner);
            prop_assert!(device.x >= -slack && device.x <= f64::from(width) + slack);
            prop_assert!(device.y >= -slack && device.y <= f64::from(height) + slack);
        }

        if policy == ScalePolicy::Fit {
            let (sx, sy) = transform.scale();
            prop_assert_eq!(sx, sy);
        }
    }
}
