use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_local_is_relative_to_start() {
    let r = FrameRange::with_len(FrameIndex(10), 4);
    assert_eq!(r.local(FrameIndex(10)), Some(0));
    assert_eq!(r.local(FrameIndex(13)), Some(3));
    assert_eq!(r.local(FrameIndex(14)), None);
    assert_eq!(r.local(FrameIndex(9)), None);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(24, 0).is_err());
}

#[test]
fn secs_to_frames_ceil_ignores_float_noise() {
    let fps = Fps::new(24, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(13.0), 312);
    assert_eq!(fps.secs_to_frames_ceil(0.1 + 0.2), 8);
    assert_eq!(fps.secs_to_frames_ceil(0.5), 12);
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D::translate(10.0, -2.5);
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn scale_about_keeps_anchor_fixed() {
    let anchor = Point::new(100.0, 50.0);
    let t = Transform2D::scale_about(0.5, anchor).to_affine();
    let mapped = t * anchor;
    assert!((mapped.x - anchor.x).abs() < 1e-9);
    assert!((mapped.y - anchor.y).abs() < 1e-9);
}

#[test]
fn rgba_hex_and_alpha() {
    let c = Rgba8::hex(0x2388ce);
    assert_eq!(c.css_rgb(), "#2388ce");
    assert_eq!(c.with_alpha(0.5).a, 128);
    assert_eq!(c.with_alpha(2.0).a, 255);
}
