use super::*;
use crate::github::model::{ChangedFile, FileStatus};
use crate::github::sample::sample_snapshot;

fn bare_snapshot() -> PullRequestSnapshot {
    let mut s = sample_snapshot();
    s.files.clear();
    s.commits.clear();
    s.check_runs.clear();
    s
}

fn file(name: &str) -> ChangedFile {
    ChangedFile {
        filename: name.to_owned(),
        status: FileStatus::Modified,
        additions: 1,
        deletions: 1,
        patch: None,
        previous_filename: None,
    }
}

#[test]
fn no_snapshot_uses_default_length() {
    let m = calculate_video_duration(None, &VideoConfig::default());
    assert_eq!(m.total_frames, 360);
    assert_eq!((m.width, m.height), (1280, 720));
    assert_eq!(m.fps.num, 24);
}

#[test]
fn zero_data_snapshot_has_three_scenes_and_two_transitions() {
    let m = calculate_video_duration(Some(&bare_snapshot()), &VideoConfig::default());
    // (4 + 5 + 4) s + 2 * 0.5 s
    assert_eq!(m.total_frames, 336);
}

#[test]
fn code_diff_length_is_capped_at_max_files() {
    let cfg = VideoConfig::default();
    let mut s = bare_snapshot();
    s.files = (0..5).map(|i| file(&format!("f{i}.rs"))).collect();
    let m = calculate_video_duration(Some(&s), &cfg);
    // (4 + 5 + 3*5 + 4) s + 3 * 0.5 s
    assert_eq!(m.total_frames, 708);

    s.files.truncate(3);
    assert_eq!(calculate_video_duration(Some(&s), &cfg).total_frames, 708);
}

#[test]
fn full_sample_includes_every_scene() {
    let m = calculate_video_duration(Some(&sample_snapshot()), &VideoConfig::default());
    // (4 + 5 + 2*5 + 5 + 3 + 4) s + 5 * 0.5 s
    assert_eq!(m.total_frames, 804);
}

#[test]
fn duration_is_deterministic() {
    let s = sample_snapshot();
    let cfg = VideoConfig::default();
    assert_eq!(
        calculate_video_duration(Some(&s), &cfg),
        calculate_video_duration(Some(&s), &cfg)
    );
}
