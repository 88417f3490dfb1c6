use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(24, 1).unwrap(),
    }
}

#[test]
fn encode_args_target_vp9_webm() {
    let opts = FfmpegSinkOpts::new("out/pr-visualizer-7.webm");
    let args = encode_args(&cfg(1280, 720), &opts);
    let joined = args.join(" ");
    assert!(joined.contains("-s 1280x720 -r 24/1 -i pipe:0"));
    assert!(joined.contains("-c:v libvpx-vp9 -pix_fmt yuv420p -b:v 0 -crf 32"));
    assert_eq!(args.last().map(String::as_str), Some("out/pr-visualizer-7.webm"));
}

#[test]
fn crf_is_capped() {
    let mut opts = FfmpegSinkOpts::new("a.webm");
    opts.crf = 200;
    let args = encode_args(&cfg(2, 2), &opts);
    assert!(args.contains(&"63".to_owned()));
}

#[test]
fn begin_rejects_odd_or_empty_sizes() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never-written.webm"));
    assert!(matches!(sink.begin(cfg(11, 10)), Err(VizError::Validation(_))));
    assert!(matches!(sink.begin(cfg(0, 10)), Err(VizError::Validation(_))));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("never-written.webm"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame),
        Err(VizError::Encode(_))
    ));
    assert!(matches!(sink.end(), Err(VizError::Encode(_))));
}

#[test]
fn opaque_pixels_pass_through() {
    assert_eq!(
        over_background(&[9, 8, 7, 255], false, [0, 0, 0, 255]),
        [9, 8, 7, 255]
    );
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_over_background(&mut dst, &src, true, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_straight_half_alpha_over_black() {
    let src = vec![255u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_over_background(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_over_background(&mut dst, &[0u8; 4], true, [0, 0, 0, 255]).is_err());
}
