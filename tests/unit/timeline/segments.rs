use pretty_assertions::assert_eq;

use super::*;
use crate::github::sample::sample_snapshot;
use crate::timeline::duration::calculate_video_duration;

fn sample_timeline() -> VisualizationTimeline {
    VisualizationTimeline::build(&sample_snapshot(), &VideoConfig::default())
}

#[test]
fn total_matches_duration_calculator() {
    let cfg = VideoConfig::default();
    let mut s = sample_snapshot();
    for _ in 0..4 {
        let t = VisualizationTimeline::build(&s, &cfg);
        assert_eq!(
            t.total_frames(),
            calculate_video_duration(Some(&s), &cfg).total_frames
        );
        s.check_runs.clear();
        if s.commits.pop().is_none() {
            s.files.clear();
        }
        s.commits.clear();
    }
}

#[test]
fn scenes_follow_playback_order() {
    let kinds: Vec<_> = sample_timeline().segments().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, SceneKind::ALL.to_vec());
}

#[test]
fn adjacent_segments_overlap_by_exactly_one_transition() {
    let t = sample_timeline();
    let segs = t.segments();
    assert_eq!(segs[0].lead_in, 0);
    assert_eq!(segs[segs.len() - 1].tail, 0);
    for pair in segs.windows(2) {
        let overlap = pair[0].range().end.0 - pair[1].start.0;
        assert_eq!(overlap, t.transition_frames());
        assert_eq!(pair[1].content_range().start, pair[0].range().end);
    }
}

#[test]
fn code_diff_content_spans_files_shown() {
    let t = sample_timeline();
    let diff = t.segment_of(SceneKind::CodeDiff).unwrap();
    assert_eq!(diff.content, 240);
}

#[test]
fn first_frames_show_title_alone() {
    let t = sample_timeline();
    assert_eq!(
        t.active_at(FrameIndex(0)),
        ActiveScenes::Single {
            segment: 0,
            local: 0
        }
    );
}

#[test]
fn transition_window_blends_into_stats_sliding_from_right() {
    let t = sample_timeline();
    // Title content is 96 frames; the window is [96, 108).
    match t.active_at(FrameIndex(96)) {
        ActiveScenes::Transition {
            outgoing,
            outgoing_local,
            incoming,
            incoming_local,
            presentation,
            progress,
        } => {
            assert_eq!((outgoing, incoming), (0, 1));
            assert_eq!(outgoing_local, 96);
            assert_eq!(incoming_local, 0);
            assert_eq!(presentation, Presentation::SlideFromRight);
            assert_eq!(progress, 0.0);
        }
        other => panic!("expected transition, got {other:?}"),
    }
    assert!(matches!(
        t.active_at(FrameIndex(108)),
        ActiveScenes::Single {
            segment: 1,
            local: 12
        }
    ));
}

#[test]
fn transition_progress_rises_within_window() {
    let t = sample_timeline();
    let mut last = -1.0;
    for f in 96..108 {
        let ActiveScenes::Transition { progress, .. } = t.active_at(FrameIndex(f)) else {
            panic!("frame {f} should be in a transition");
        };
        assert!((0.0..=1.0).contains(&progress));
        assert!(progress >= last);
        last = progress;
    }
    assert!(last > 0.9);
}

#[test]
fn presentations_depend_on_incoming_scene() {
    assert_eq!(Presentation::entering(SceneKind::CodeDiff), Presentation::Fade);
    assert_eq!(
        Presentation::entering(SceneKind::CommitHistory),
        Presentation::SlideFromBottom
    );
    assert_eq!(Presentation::entering(SceneKind::CiStatus), Presentation::Fade);
    assert_eq!(Presentation::entering(SceneKind::Final), Presentation::SlideFromTop);
}

#[test]
fn frames_past_the_end_show_nothing() {
    let t = sample_timeline();
    assert_eq!(t.active_at(FrameIndex(t.total_frames())), ActiveScenes::Nothing);
    assert!(matches!(
        t.active_at(FrameIndex(t.total_frames() - 1)),
        ActiveScenes::Single { segment: 5, .. }
    ));
}
