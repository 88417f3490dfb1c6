use super::*;

#[test]
fn defaults_are_the_stock_video() {
    let c = VideoConfig::default();
    c.validate().unwrap();
    assert_eq!(c.fps.as_f64(), 24.0);
    assert_eq!((c.canvas.width, c.canvas.height), (1280, 720));
    assert_eq!(c.transition_frames(), 12);
    assert_eq!(c.per_file_frames(), 120);
    assert_eq!(c.frames(c.default_secs), 360);
}

#[test]
fn partial_json_keeps_other_defaults() {
    let c: VideoConfig = serde_json::from_str(r#"{"title_secs": 2.0, "max_files_shown": 5}"#).unwrap();
    assert_eq!(c.title_secs, 2.0);
    assert_eq!(c.max_files_shown, 5);
    assert_eq!(c.stats_secs, 5.0);
    c.validate().unwrap();
}

#[test]
fn fractional_frame_lengths_are_rejected() {
    let c = VideoConfig {
        title_secs: 4.01,
        ..VideoConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn zero_scene_length_and_odd_canvas_are_rejected() {
    let c = VideoConfig {
        final_secs: 0.0,
        ..VideoConfig::default()
    };
    assert!(c.validate().is_err());

    let c = VideoConfig {
        canvas: Canvas {
            width: 641,
            height: 360,
        },
        ..VideoConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn zero_transition_is_allowed() {
    let c = VideoConfig {
        transition_secs: 0.0,
        ..VideoConfig::default()
    };
    c.validate().unwrap();
    assert_eq!(c.transition_frames(), 0);
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("video.json");
    std::fs::write(&p, r#"{"fps": {"num": 30, "den": 1}}"#).unwrap();
    let c = VideoConfig::from_json_file(&p).unwrap();
    assert_eq!(c.fps.num, 30);

    std::fs::write(&p, r#"{"fps": {"num": 0, "den": 1}}"#).unwrap();
    assert!(VideoConfig::from_json_file(&p).is_err());
}
