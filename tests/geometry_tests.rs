use approx::assert_abs_diff_eq;
use chart_canvas::core::{
    DevicePoint, DeviceRect, DeviceSize, LogicalPoint, LogicalRect, ScalePolicy, ViewportTransform,
    WedgeAngles,
};
use chart_canvas::error::ChartError;

#[test]
fn fit_policy_leaves_equal_margins_on_the_long_axis() {
    let transform = ViewportTransform::new(
        DeviceSize::new(200, 100),
        LogicalRect::unit(),
        ScalePolicy::Fit,
    )
    .expect("transform");

    assert_eq!(transform.scale(), (100.0, 100.0));
    assert_eq!(transform.content_rect(), DeviceRect::new(50.0, 0.0, 100.0, 100.0));
    assert_eq!(
        transform.to_device(LogicalPoint::new(0.0, 0.0)),
        DevicePoint::new(50.0, 0.0)
    );
    assert_eq!(
        transform.to_device(LogicalPoint::new(1.0, 1.0)),
        DevicePoint::new(150.0, 100.0)
    );
}

#[test]
fn stretch_policy_fills_both_axes() {
    let transform = ViewportTransform::new(
        DeviceSize::new(200, 100),
        LogicalRect::unit(),
        ScalePolicy::Stretch,
    )
    .expect("transform");

    assert_eq!(transform.scale(), (200.0, 100.0));
    assert_eq!(transform.content_rect(), DeviceRect::new(0.0, 0.0, 200.0, 100.0));
    assert_abs_diff_eq!(transform.length_to_device(0.25), 25.0);
}

#[test]
fn offset_extent_maps_its_origin_to_the_content_corner() {
    let extent = LogicalRect::new(-10.0, 5.0, 40.0, 20.0);
    let transform = ViewportTransform::new(DeviceSize::new(400, 400), extent, ScalePolicy::Fit)
        .expect("transform");

    let origin = transform.to_device(extent.origin());
    let far = transform.to_device(extent.far_corner());
    assert_abs_diff_eq!(origin.x, 0.0);
    assert_abs_diff_eq!(origin.y, 100.0);
    assert_abs_diff_eq!(far.x, 400.0);
    assert_abs_diff_eq!(far.y, 300.0);

    let back = transform.to_logical(DevicePoint::new(200.0, 200.0));
    assert_abs_diff_eq!(back.x, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(back.y, 15.0, epsilon = 1e-12);
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert_eq!(
        ViewportTransform::new(DeviceSize::new(0, 10), LogicalRect::unit(), ScalePolicy::Fit),
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 10
        })
    );
    assert!(matches!(
        ViewportTransform::new(
            DeviceSize::new(10, 10),
            LogicalRect::new(0.0, 0.0, f64::NAN, 1.0),
            ScalePolicy::Fit
        ),
        Err(ChartError::DegenerateGeometry(_))
    ));
    assert!(matches!(
        ViewportTransform::new(
            DeviceSize::new(10, 10),
            LogicalRect::new(0.0, 0.0, 1.0, -1.0),
            ScalePolicy::Stretch
        ),
        Err(ChartError::DegenerateGeometry(_))
    ));
}

#[test]
fn wedge_angles_normalize_start_and_clamp_span() {
    let wedge = WedgeAngles::new(-90.0, 720.0).expect("angles");
    assert_abs_diff_eq!(wedge.start_deg(), 270.0);
    assert_abs_diff_eq!(wedge.span_deg(), 360.0);
    assert!(wedge.is_full_circle());

    let (start, end) = WedgeAngles::new(0.0, 90.0)
        .expect("angles")
        .to_screen_radians();
    assert_abs_diff_eq!(start, -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(end, 0.0, epsilon = 1e-12);

    assert!(WedgeAngles::new(0.0, -1.0).is_err());
    assert!(WedgeAngles::new(f64::INFINITY, 10.0).is_err());
}
